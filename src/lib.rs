pub mod dataset;
pub mod http_client;
pub mod levenshtein;
pub mod player;
pub mod profiles;
pub mod radar;
pub mod roster;
pub mod sanitize;
pub mod stats;
pub mod text_norm;
