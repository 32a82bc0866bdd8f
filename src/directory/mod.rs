//! Read-only view of the servers, members and voice channels the secondary
//! session can see. The aggregation code only talks to [`GroupDirectory`].

mod discord;
#[cfg(test)]
pub mod memory;

use std::future::Future;

use chrono::{DateTime, Utc};
use poise::serenity_prelude::{self as serenity, ChannelId, GuildId, UserId};

pub use discord::SecondarySession;

/// A server as seen by the secondary session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSnapshot {
    pub id: GuildId,
    pub name: String,
    pub icon_url: Option<String>,
    pub owner_id: UserId,
}

/// A resolved user account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserSnapshot {
    pub id: UserId,
    pub name: String,
}

/// One user's membership in one server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub user_id: UserId,
    pub nickname: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    /// Highest role first
    pub role_names: Vec<String>,
    pub is_admin: bool,
    pub is_booster: bool,
}

/// Someone currently connected to a voice channel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceOccupant {
    pub user_id: UserId,
    pub is_bot: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("server {0} is not visible to the secondary session")]
    UnknownGroup(GuildId),
    #[error("discord request failed: {0}")]
    Discord(#[from] serenity::Error),
}

/// Capabilities the aggregation needs from the secondary session
pub trait GroupDirectory: Sync {
    /// Every reachable server, in a stable order
    fn list_groups(&self) -> Vec<GroupSnapshot>;

    fn fetch_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<UserSnapshot, DirectoryError>> + Send;

    fn fetch_member(
        &self,
        group_id: GuildId,
        user_id: UserId,
    ) -> impl Future<Output = Result<MemberSnapshot, DirectoryError>> + Send;

    fn list_voice_channels(&self, group_id: GuildId) -> Vec<ChannelId>;

    fn list_voice_occupants(&self, group_id: GuildId, channel_id: ChannelId) -> Vec<VoiceOccupant>;
}
