/// True when the string is empty after trimming.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Loose email check used across submissions: non-blank and contains `@`.
///
/// Deliverability is the mail gateway's problem; this only catches obvious typos.
pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value.contains('@')
}

/// Trim every entry and drop the ones left empty, keeping order.
pub fn normalize_entries(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Trim optional free text, mapping blank input to `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_entries_drops_blanks_and_keeps_order() {
        let entries = vec![
            "  first ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "second".to_string(),
        ];
        assert_eq!(
            normalize_entries(entries),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("a@b.com"));
        assert!(looks_like_email(" team@example.org "));
        assert!(!looks_like_email("no-at-sign"));
        assert!(!looks_like_email("   "));
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  ".to_string())), None);
        assert_eq!(
            normalize_optional(Some(" notes ".to_string())),
            Some("notes".to_string())
        );
        assert_eq!(normalize_optional(None), None);
    }
}
