/// Pure functions for the command allow-list (Discord-agnostic)
use crate::utils::string_utils::split_and_trim;

/// Check if a user is in a list of authorized users
pub fn is_authorized(user_id: u64, authorized_users: &[u64]) -> bool {
    authorized_users.contains(&user_id)
}

/// Parse a comma-separated list of user IDs, skipping anything that isn't a valid ID
pub fn parse_user_ids(raw: &str) -> Vec<u64> {
    split_and_trim(raw, ',')
        .iter()
        .filter_map(|part| parse_user_id(part))
        .collect()
}

/// Parse a single user identifier, accepting a raw ID or a mention like `<@123>` / `<@!123>`
pub fn parse_user_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("<@")
        .and_then(|rest| rest.strip_suffix('>'))
        .map(|inner| inner.trim_start_matches('!'))
        .unwrap_or(trimmed);

    digits.parse::<u64>().ok().filter(|&id| id != 0)
}
