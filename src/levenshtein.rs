/// Levenshtein edit distance over chars, full DP matrix, unit costs.
/// O(|a|*|b|) time and space; inputs here are canonical player names
/// (tens of chars), so the quadratic matrix is a non-issue.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut matrix = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        matrix[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            if a[i - 1] == b[j - 1] {
                matrix[i][j] = matrix[i - 1][j - 1];
            } else {
                let deletion = matrix[i - 1][j] + 1;
                let insertion = matrix[i][j - 1] + 1;
                let substitution = matrix[i - 1][j - 1] + 1;
                matrix[i][j] = deletion.min(insertion).min(substitution);
            }
        }
    }

    matrix[a.len()][b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_is_zero() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("haaland", "haaland"), 0);
    }

    #[test]
    fn symmetric() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("sitting", "kitten"), 3);
    }

    #[test]
    fn empty_against_word_is_length() {
        assert_eq!(levenshtein("", "messi"), 5);
        assert_eq!(levenshtein("messi", ""), 5);
    }

    #[test]
    fn single_edits() {
        assert_eq!(levenshtein("muller", "miller"), 1);
        assert_eq!(levenshtein("jonsmith", "jhonsmith"), 1);
    }

    #[test]
    fn multibyte_chars_count_once() {
        assert_eq!(levenshtein("müller", "muller"), 1);
    }
}
