//! Splitting and joining for list-valued testcase fields.
//!
//! Preconditions and steps are edited as newline-delimited text; the
//! compliance list is edited as comma-delimited text. The two formats
//! deliberately do NOT share semantics: line splitting preserves every
//! segment verbatim (a trailing blank line yields a trailing empty
//! entry), while compliance tokens are trimmed and empty tokens dropped.

/// Split newline-delimited editor text back into an ordered sequence.
///
/// No trimming or filtering is applied — `"a\nb\n"` yields
/// `["a", "b", ""]`.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(|s| s.to_string()).collect()
}

/// Join a list field for display in a newline-delimited editor.
pub fn join_lines(items: &[String]) -> String {
    items.join("\n")
}

/// Split comma-delimited compliance text, trimming each token and
/// filtering out empties.
pub fn split_compliance(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Join the compliance list for display in a comma-delimited editor.
pub fn join_compliance(items: &[String]) -> String {
    items.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_preserves_trailing_empty() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_split_lines_no_trimming() {
        assert_eq!(split_lines("  a \nb"), vec!["  a ", "b"]);
    }

    #[test]
    fn test_split_lines_empty_input() {
        // An empty buffer is a single empty entry, matching what a
        // newline-join of [""] displays as.
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn test_join_then_split_lines_round_trips() {
        let items = vec!["one".to_string(), "".to_string(), "three".to_string()];
        assert_eq!(split_lines(&join_lines(&items)), items);
    }

    #[test]
    fn test_split_compliance_filters_empty_tokens() {
        assert_eq!(
            split_compliance("ISO 13485, , 21 CFR Part 11"),
            vec!["ISO 13485", "21 CFR Part 11"]
        );
    }

    #[test]
    fn test_split_compliance_trims_tokens() {
        assert_eq!(
            split_compliance("  IEC 62304 ,ISO 14971  "),
            vec!["IEC 62304", "ISO 14971"]
        );
    }

    #[test]
    fn test_split_compliance_empty_input() {
        assert!(split_compliance("").is_empty());
        assert!(split_compliance(" , ,, ").is_empty());
    }

    #[test]
    fn test_join_compliance() {
        let items = vec!["ISO 13485".to_string(), "21 CFR Part 11".to_string()];
        assert_eq!(join_compliance(&items), "ISO 13485, 21 CFR Part 11");
    }
}
