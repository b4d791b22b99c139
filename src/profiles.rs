use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};

/// Positional profiles, one PFI dataset each. Labels, file names, fit-index
/// fields and metric sets are defined centrally here instead of being
/// re-declared wherever a dataset is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Profile {
    Forward,
    Winger,
    AttackingMid,
    DefensiveMid,
    LeftBack,
    RightBack,
    CentreBack,
    Goalkeeper,
}

impl Profile {
    pub const ALL: [Profile; 8] = [
        Profile::Forward,
        Profile::Winger,
        Profile::AttackingMid,
        Profile::DefensiveMid,
        Profile::LeftBack,
        Profile::RightBack,
        Profile::CentreBack,
        Profile::Goalkeeper,
    ];

    /// Display label as used by the source datasets.
    pub fn label(self) -> &'static str {
        match self {
            Profile::Forward => "Delantero (A)",
            Profile::Winger => "Extremo (EX)",
            Profile::AttackingMid => "Mediapunta (M)",
            Profile::DefensiveMid => "Mediocentro Defensivo (MCD)",
            Profile::LeftBack => "Lateral Izquierdo (LI)",
            Profile::RightBack => "Lateral Derecho (LD)",
            Profile::CentreBack => "Defensa Central (DC)",
            Profile::Goalkeeper => "Arquero (GK)",
        }
    }

    /// Short code used in radar dataset file names.
    pub fn key(self) -> &'static str {
        match self {
            Profile::Forward => "a",
            Profile::Winger => "ex",
            Profile::AttackingMid => "m",
            Profile::DefensiveMid => "mcd",
            Profile::LeftBack => "li",
            Profile::RightBack => "ld",
            Profile::CentreBack => "dc",
            Profile::Goalkeeper => "gk",
        }
    }

    /// PFI dataset resource name. The goalkeeper export is the smaller
    /// 100-player file; all others carry 125 players.
    pub fn resource_name(self) -> &'static str {
        match self {
            Profile::Forward => "pfi_a_125_normalizado.json",
            Profile::Winger => "pfi_ex_125_normalizado.json",
            Profile::AttackingMid => "pfi_m_125_normalizado.json",
            Profile::DefensiveMid => "pfi_mcd_125_normalizado.json",
            Profile::LeftBack => "pfi_li_125_normalizado.json",
            Profile::RightBack => "pfi_ld_125_normalizado.json",
            Profile::CentreBack => "pfi_dc_125_normalizado.json",
            Profile::Goalkeeper => "pfi_gk_100_normalizado.json",
        }
    }

    /// Name of the fit-index field inside this profile's dataset.
    pub fn fit_field(self) -> &'static str {
        match self {
            Profile::Forward => "PFI_A",
            Profile::Winger => "PFI_EX",
            Profile::AttackingMid => "PFI_M",
            Profile::DefensiveMid => "PFI_MCD",
            Profile::LeftBack => "PFI_LI",
            Profile::RightBack => "PFI_LD",
            Profile::CentreBack => "PFI_DC",
            Profile::Goalkeeper => "PFI_GK",
        }
    }

    /// The nine display metrics of this profile, in chart order.
    pub fn metrics(self) -> &'static [&'static str; 9] {
        match self {
            Profile::Forward => &[
                "xG/90",
                "Remates/90",
                "Toques en el área de penalti/90",
                "Goles/90",
                "xA/90",
                "Jugadas claves/90",
                "Duelos atacantes/90",
                "Pases progresivos/90",
                "Duelos atacantes ganados, %",
            ],
            Profile::Winger => &[
                "Aceleraciones/90",
                "Carreras en progresión/90",
                "Centros/90",
                "Duelos atacantes/90",
                "Duelos atacantes ganados, %",
                "xA/90",
                "Regates/90",
                "Pases progresivos/90",
                "Toques en el área de penalti/90",
            ],
            Profile::AttackingMid => &[
                "xA/90",
                "Jugadas claves/90",
                "Pases en el último tercio/90",
                "Pases progresivos/90",
                "Carreras en progresión/90",
                "Centros desde el último tercio/90",
                "Asistencias/90",
                "Pases al área de penalti/90",
                "Ataque en profundidad/90",
            ],
            Profile::DefensiveMid => &[
                "Interceptaciones/90",
                "Acciones defensivas realizadas/90",
                "Duelos defensivos/90",
                "Duelos defensivos ganados, %",
                "Tiros interceptados/90",
                "Pases progresivos/90",
                "Pases largos/90",
                "Precisión pases largos, %",
                "Pases hacia adelante/90",
            ],
            Profile::LeftBack => &[
                "Carreras en progresión/90",
                "Aceleraciones/90",
                "Centros desde la banda izquierda/90",
                "Precisión centros desde la banda izquierda, %",
                "Acciones defensivas realizadas/90",
                "Duelos defensivos ganados, %",
                "Interceptaciones/90",
                "Pases progresivos/90",
                "Jugadas claves/90",
            ],
            Profile::RightBack => &[
                "Acciones defensivas realizadas/90",
                "Interceptaciones/90",
                "Centros desde la banda derecha/90",
                "Precisión centros desde la banda derecha, %",
                "Carreras en progresión/90",
                "Pases progresivos/90",
                "Aceleraciones/90",
                "Duelos defensivos ganados, %",
                "Jugadas claves/90",
            ],
            Profile::CentreBack => &[
                "Acciones defensivas realizadas/90",
                "Duelos defensivos/90",
                "Duelos defensivos ganados, %",
                "Duelos aéreos en los 90",
                "Interceptaciones/90",
                "Tiros interceptados/90",
                "Pases progresivos/90",
                "Pases hacia adelante/90",
                "Precisión pases largos, %",
            ],
            Profile::Goalkeeper => &[
                "Paradas, %",
                "Goles evitados/90",
                "Remates en contra/90",
                "Porterías imbatidas en los 90",
                "xG en contra/90",
                "Pases/90",
                "Precisión pases, %",
                "Pases largos/90",
                "Precisión pases largos, %",
            ],
        }
    }

    /// Source JSON key holding the normalized value for a display metric.
    /// The exports prefix every normalized column with `norm_`.
    pub fn metric_source_key(self, display_metric: &str) -> String {
        format!("norm_{display_metric}")
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        for profile in Profile::ALL {
            if needle.eq_ignore_ascii_case(profile.key()) || needle == profile.label() {
                return Ok(profile);
            }
        }
        Err(anyhow!("unknown profile: {needle}"))
    }
}
