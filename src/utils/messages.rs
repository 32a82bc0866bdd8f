/// Pure functions for user-facing reply texts (Discord-agnostic)

/// Format an error message with emoji
pub fn format_error(message: &str) -> String {
    format!("❌ {}", message)
}

/// Format a progress notice with emoji
pub fn format_progress(message: &str) -> String {
    format!("🎧 {}", message)
}

/// Reply for callers outside the allow-list
pub fn build_permission_denied() -> String {
    format_error("You do not have permission to use this command.")
}

/// Usage hint for the lookup command
pub fn build_lookup_usage(prefix: &str, keyword: &str) -> String {
    format_error(&format!("Usage: `{}{} <userID>`", prefix, keyword))
}

pub fn build_user_not_found() -> String {
    format_error("The specified user was not found.")
}

pub fn build_no_shared_groups() -> String {
    format_error("The user is not in any shared servers.")
}

pub fn build_no_active_voice() -> String {
    format_error("No servers found with active voice users.")
}

/// Generic failure for the lookup flow (doesn't expose internals)
pub fn build_lookup_failure() -> String {
    format_error("An error occurred while processing the command.")
}

/// Generic failure for the leaderboard flow (doesn't expose internals)
pub fn build_leaderboard_failure() -> String {
    format_error("An error occurred while generating the voice stats image.")
}

pub fn build_leaderboard_notice() -> String {
    format_progress("Generating voice stats image...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error() {
        assert_eq!(format_error("Something failed"), "❌ Something failed");
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(format_progress("Working"), "🎧 Working");
    }

    #[test]
    fn test_build_lookup_usage() {
        assert_eq!(
            build_lookup_usage("!", "fullcheck"),
            "❌ Usage: `!fullcheck <userID>`"
        );
    }

    #[test]
    fn test_failure_texts_are_distinct() {
        let texts = [
            build_permission_denied(),
            build_user_not_found(),
            build_no_shared_groups(),
            build_no_active_voice(),
            build_lookup_failure(),
            build_leaderboard_failure(),
        ];

        for (i, a) in texts.iter().enumerate() {
            assert!(a.starts_with("❌"));
            for b in texts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_build_no_shared_groups() {
        assert!(build_no_shared_groups().contains("not in any shared servers"));
    }
}
