//! In-memory directory used by tests.

use std::collections::HashMap;

use poise::serenity_prelude::{self as serenity, ChannelId, GuildId, UserId};

use super::{
    DirectoryError, GroupDirectory, GroupSnapshot, MemberSnapshot, UserSnapshot, VoiceOccupant,
};

#[derive(Default)]
pub struct MemoryDirectory {
    groups: Vec<GroupSnapshot>,
    users: HashMap<UserId, UserSnapshot>,
    members: HashMap<(GuildId, UserId), MemberSnapshot>,
    /// Members whose server drops out of view mid-lookup
    broken: Vec<(GuildId, UserId)>,
    voice: HashMap<GuildId, Vec<(ChannelId, Vec<VoiceOccupant>)>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, id: u64, name: &str, owner: u64) -> Self {
        self.groups.push(GroupSnapshot {
            id: GuildId::new(id),
            name: name.to_string(),
            icon_url: Some(format!("https://cdn.example/{}.png", id)),
            owner_id: UserId::new(owner),
        });
        self
    }

    pub fn with_iconless_group(mut self, id: u64, name: &str, owner: u64) -> Self {
        self.groups.push(GroupSnapshot {
            id: GuildId::new(id),
            name: name.to_string(),
            icon_url: None,
            owner_id: UserId::new(owner),
        });
        self
    }

    pub fn with_user(mut self, id: u64, name: &str) -> Self {
        self.users.insert(
            UserId::new(id),
            UserSnapshot {
                id: UserId::new(id),
                name: name.to_string(),
            },
        );
        self
    }

    pub fn with_member(mut self, group: u64, member: MemberSnapshot) -> Self {
        self.members
            .insert((GuildId::new(group), member.user_id), member);
        self
    }

    pub fn with_broken_member(mut self, group: u64, user: u64) -> Self {
        self.broken.push((GuildId::new(group), UserId::new(user)));
        self
    }

    /// Add a voice channel to a group with the given (user, is_bot) occupants
    pub fn with_voice_channel(mut self, group: u64, channel: u64, occupants: &[(u64, bool)]) -> Self {
        let occupants = occupants
            .iter()
            .map(|&(user, is_bot)| VoiceOccupant {
                user_id: UserId::new(user),
                is_bot,
            })
            .collect();
        self.voice
            .entry(GuildId::new(group))
            .or_default()
            .push((ChannelId::new(channel), occupants));
        self
    }
}

/// A plain member with no roles or flags
pub fn member(user: u64) -> MemberSnapshot {
    MemberSnapshot {
        user_id: UserId::new(user),
        nickname: None,
        joined_at: None,
        role_names: Vec::new(),
        is_admin: false,
        is_booster: false,
    }
}

impl GroupDirectory for MemoryDirectory {
    fn list_groups(&self) -> Vec<GroupSnapshot> {
        self.groups.clone()
    }

    async fn fetch_user(&self, user_id: UserId) -> Result<UserSnapshot, DirectoryError> {
        self.users
            .get(&user_id)
            .cloned()
            .ok_or(DirectoryError::Discord(serenity::Error::Other("Unknown User")))
    }

    async fn fetch_member(
        &self,
        group_id: GuildId,
        user_id: UserId,
    ) -> Result<MemberSnapshot, DirectoryError> {
        if self.broken.contains(&(group_id, user_id)) {
            return Err(DirectoryError::UnknownGroup(group_id));
        }
        self.members
            .get(&(group_id, user_id))
            .cloned()
            .ok_or(DirectoryError::Discord(serenity::Error::Other("Unknown Member")))
    }

    fn list_voice_channels(&self, group_id: GuildId) -> Vec<ChannelId> {
        self.voice
            .get(&group_id)
            .map(|channels| channels.iter().map(|(id, _)| *id).collect())
            .unwrap_or_default()
    }

    fn list_voice_occupants(&self, group_id: GuildId, channel_id: ChannelId) -> Vec<VoiceOccupant> {
        self.voice
            .get(&group_id)
            .and_then(|channels| channels.iter().find(|(id, _)| *id == channel_id))
            .map(|(_, occupants)| occupants.clone())
            .unwrap_or_default()
    }
}
