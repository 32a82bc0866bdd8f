use std::collections::HashSet;

use chrono::{DateTime, Utc};
use poise::serenity_prelude::{GuildId, UserId};
use tracing::debug;

use crate::{
    constants::{LEADERBOARD_SIZE, PLACEHOLDER_ICON_URL},
    directory::{GroupDirectory, GroupSnapshot, MemberSnapshot, UserSnapshot},
    error::LookupError,
    utils::permissions::parse_user_id,
};

/// The target user's membership in one server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupMembershipRecord {
    pub group_id: GuildId,
    pub group_name: String,
    pub icon_url: String,
    pub member_id: UserId,
    pub nickname: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    pub role_names: Vec<String>,
    pub is_owner: bool,
    pub is_admin: bool,
    pub is_booster: bool,
}

impl GroupMembershipRecord {
    fn new(group: &GroupSnapshot, member: MemberSnapshot) -> Self {
        Self {
            group_id: group.id,
            group_name: group.name.clone(),
            icon_url: icon_or_placeholder(group),
            member_id: member.user_id,
            nickname: member.nickname,
            joined_at: member.joined_at,
            role_names: member.role_names,
            is_owner: group.owner_id == member.user_id,
            is_admin: member.is_admin,
            is_booster: member.is_booster,
        }
    }
}

/// One server on the voice leaderboard
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub group_name: String,
    pub member_count: usize,
    pub icon_url: String,
}

fn icon_or_placeholder(group: &GroupSnapshot) -> String {
    group
        .icon_url
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_ICON_URL.to_string())
}

/// Resolve the raw identifier given to the lookup command
pub async fn resolve_user<D: GroupDirectory>(
    directory: &D,
    raw_id: &str,
) -> Result<UserSnapshot, LookupError> {
    let user_id = parse_user_id(raw_id)
        .map(UserId::new)
        .ok_or(LookupError::UserNotFound)?;

    directory.fetch_user(user_id).await.map_err(|e| {
        debug!("Could not resolve user {}: {}", user_id, e);
        LookupError::UserNotFound
    })
}

/// Collect the target's membership in every server the secondary session can see.
///
/// Servers where the member can't be fetched are skipped, whether the user
/// isn't there or the request failed.
pub async fn fetch_membership_across_groups<D: GroupDirectory>(
    directory: &D,
    target: UserId,
) -> Vec<GroupMembershipRecord> {
    let mut records = Vec::new();

    for group in directory.list_groups() {
        match directory.fetch_member(group.id, target).await {
            Ok(member) => records.push(GroupMembershipRecord::new(&group, member)),
            Err(e) => debug!("Skipping server {} for user {}: {}", group.id, target, e),
        }
    }

    records
}

/// Count distinct human voice users per server and rank the busiest ones
pub fn fetch_voice_occupancy<D: GroupDirectory>(directory: &D) -> Vec<LeaderboardEntry> {
    let entries = directory
        .list_groups()
        .into_iter()
        .filter_map(|group| {
            let occupants: HashSet<UserId> = directory
                .list_voice_channels(group.id)
                .into_iter()
                .flat_map(|channel_id| directory.list_voice_occupants(group.id, channel_id))
                .filter(|occupant| !occupant.is_bot)
                .map(|occupant| occupant.user_id)
                .collect();

            if occupants.is_empty() {
                return None;
            }

            Some(LeaderboardEntry {
                icon_url: icon_or_placeholder(&group),
                group_name: group.name,
                member_count: occupants.len(),
            })
        })
        .collect();

    rank_entries(entries)
}

/// Sort by count descending, keeping encounter order for ties, and keep the top entries
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| b.member_count.cmp(&a.member_count));
    entries.truncate(LEADERBOARD_SIZE);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::memory::{MemoryDirectory, member};

    fn entry(name: &str, count: usize) -> LeaderboardEntry {
        LeaderboardEntry {
            group_name: name.to_string(),
            member_count: count,
            icon_url: PLACEHOLDER_ICON_URL.to_string(),
        }
    }

    #[test]
    fn test_rank_entries_is_stable_and_descending() {
        let ranked = rank_entries(vec![
            entry("a", 7),
            entry("b", 7),
            entry("c", 3),
            entry("d", 9),
        ]);

        let order: Vec<(&str, usize)> = ranked
            .iter()
            .map(|e| (e.group_name.as_str(), e.member_count))
            .collect();
        assert_eq!(order, vec![("d", 9), ("a", 7), ("b", 7), ("c", 3)]);
    }

    #[test]
    fn test_rank_entries_keeps_top_ten() {
        let entries = (1..=15).map(|n| entry(&format!("s{}", n), n)).collect();
        let ranked = rank_entries(entries);

        assert_eq!(ranked.len(), LEADERBOARD_SIZE);
        assert_eq!(ranked[0].member_count, 15);
        assert_eq!(ranked[9].member_count, 6);
    }

    #[tokio::test]
    async fn test_resolve_user() {
        let directory = MemoryDirectory::new().with_user(42, "target");

        let user = resolve_user(&directory, "42").await.unwrap();
        assert_eq!(user.id, UserId::new(42));
        assert_eq!(user.name, "target");
    }

    #[tokio::test]
    async fn test_resolve_user_not_found() {
        let directory = MemoryDirectory::new().with_user(42, "target");

        assert_eq!(
            resolve_user(&directory, "43").await,
            Err(LookupError::UserNotFound)
        );
        assert_eq!(
            resolve_user(&directory, "not-an-id").await,
            Err(LookupError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn test_membership_skips_missing_and_failing_groups() {
        let mut admin = member(42);
        admin.is_admin = true;
        admin.role_names = vec!["Mod".to_string()];

        let directory = MemoryDirectory::new()
            .with_group(1, "Alpha", 42)
            .with_group(2, "Beta", 7)
            .with_iconless_group(3, "Gamma", 7)
            .with_group(4, "Delta", 7)
            .with_member(1, admin)
            .with_member(3, member(42))
            .with_broken_member(4, 42);

        let records = fetch_membership_across_groups(&directory, UserId::new(42)).await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].group_name, "Alpha");
        assert!(records[0].is_owner);
        assert!(records[0].is_admin);
        assert_eq!(records[0].role_names, vec!["Mod".to_string()]);
        assert_eq!(records[0].icon_url, "https://cdn.example/1.png");

        assert_eq!(records[1].group_name, "Gamma");
        assert!(!records[1].is_owner);
        assert_eq!(records[1].icon_url, PLACEHOLDER_ICON_URL);
    }

    #[tokio::test]
    async fn test_membership_empty_when_user_nowhere() {
        let directory = MemoryDirectory::new()
            .with_group(1, "Alpha", 7)
            .with_user(42, "target");

        let records = fetch_membership_across_groups(&directory, UserId::new(42)).await;
        assert!(records.is_empty());
    }

    #[test]
    fn test_voice_occupancy_counts_distinct_humans() {
        let directory = MemoryDirectory::new()
            .with_group(1, "Quiet", 7)
            .with_group(2, "Busy", 7)
            .with_group(3, "Bots Only", 7)
            .with_voice_channel(2, 20, &[(100, false), (101, false), (900, true)])
            .with_voice_channel(2, 21, &[(102, false)])
            .with_voice_channel(3, 30, &[(901, true)]);

        let entries = fetch_voice_occupancy(&directory);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].group_name, "Busy");
        assert_eq!(entries[0].member_count, 3);
    }

    #[test]
    fn test_voice_occupancy_ranks_groups() {
        let directory = MemoryDirectory::new()
            .with_group(1, "Small", 7)
            .with_group(2, "Large", 7)
            .with_voice_channel(1, 10, &[(100, false)])
            .with_voice_channel(2, 20, &[(100, false), (101, false)]);

        let names: Vec<String> = fetch_voice_occupancy(&directory)
            .into_iter()
            .map(|e| e.group_name)
            .collect();
        assert_eq!(names, vec!["Large", "Small"]);
    }
}
