//! Canonical form of a customer name, used as a lookup sort-key fragment.

/// Trims, uppercases, and collapses every run of whitespace to a single `_`.
/// Must be applied to both the stored and the incoming name before comparing,
/// since the comparison decides which lookup rows get rewritten.
pub fn normalize(name: &str) -> String {
    name.trim()
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_case_and_whitespace() {
        assert_eq!(normalize("Jane  Doe"), "JANE_DOE");
        assert_eq!(normalize("jane doe"), "JANE_DOE");
        assert_eq!(normalize("  jane\t doe \n"), "JANE_DOE");
    }

    #[test]
    fn test_idempotent() {
        for s in ["Jane  Doe", " mr.  o'brien ", "JANE_DOE", "", "   "] {
            assert_eq!(normalize(&normalize(s)), normalize(s));
        }
    }

    #[test]
    fn test_single_word_and_empty() {
        assert_eq!(normalize("alice"), "ALICE");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
