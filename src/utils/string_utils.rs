/// Pure string processing utilities (Discord-agnostic)

/// Extract the first N characters of a string
pub fn take_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

/// Check if a string is empty after trimming
pub fn is_empty_or_whitespace(text: &str) -> bool {
    text.trim().is_empty()
}

/// Keep at most `budget` characters, appending "..." when anything was cut
pub fn truncate_with_ellipsis(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        text.to_string()
    } else {
        format!("{}...", take_chars(text, budget))
    }
}

/// Split a string by delimiter and trim each part
pub fn split_and_trim(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Join parts with a separator, or return the fallback when there is nothing to join
pub fn join_or(parts: &[String], separator: &str, fallback: &str) -> String {
    if parts.is_empty() {
        fallback.to_string()
    } else {
        parts.join(separator)
    }
}

/// First whitespace-separated word, ignoring anything after it
pub fn first_token(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}

/// Render a flag the way cards show it
pub fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("Hello World", 5), "Hello");
        assert_eq!(take_chars("Short", 10), "Short");
        assert_eq!(take_chars("Test", 0), "");
    }

    #[test]
    fn test_first_token() {
        assert_eq!(first_token("123456789"), Some("123456789"));
        assert_eq!(first_token("  123 extra words "), Some("123"));
        assert_eq!(first_token("<@42>\tnow"), Some("<@42>"));
        assert_eq!(first_token("   "), None);
        assert_eq!(first_token(""), None);
    }

    #[test]
    fn test_is_empty_or_whitespace() {
        assert!(is_empty_or_whitespace(""));
        assert!(is_empty_or_whitespace("   "));
        assert!(is_empty_or_whitespace("\t\n"));

        assert!(!is_empty_or_whitespace("text"));
        assert!(!is_empty_or_whitespace("  text  "));
    }

    #[test]
    fn test_truncate_with_ellipsis_short() {
        assert_eq!(truncate_with_ellipsis("Lounge", 25), "Lounge");
    }

    #[test]
    fn test_truncate_with_ellipsis_exact_budget() {
        let name = "a".repeat(25);
        assert_eq!(truncate_with_ellipsis(&name, 25), name);
    }

    #[test]
    fn test_truncate_with_ellipsis_long() {
        let name = "The Extremely Long Server Name Of Doom";
        assert_eq!(
            truncate_with_ellipsis(name, 25),
            "The Extremely Long Server..."
        );
    }

    #[test]
    fn test_truncate_with_ellipsis_counts_chars_not_bytes() {
        assert_eq!(truncate_with_ellipsis("ééééé", 5), "ééééé");
        assert_eq!(truncate_with_ellipsis("éééééé", 5), "ééééé...");
    }

    #[test]
    fn test_split_and_trim() {
        assert_eq!(
            split_and_trim("apple, banana, cherry", ','),
            vec!["apple", "banana", "cherry"]
        );
        assert_eq!(
            split_and_trim("one  ,  two  , three", ','),
            vec!["one", "two", "three"]
        );
        assert_eq!(split_and_trim("single", ','), vec!["single"]);
        assert!(split_and_trim(" , ,", ',').is_empty());
    }

    #[test]
    fn test_join_or() {
        let parts = vec!["Mod".to_string(), "Member".to_string()];
        assert_eq!(join_or(&parts, ", ", "No roles"), "Mod, Member");
        assert_eq!(join_or(&[], ", ", "No roles"), "No roles");
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(yes_no(true), "Yes");
        assert_eq!(yes_no(false), "No");
    }
}
