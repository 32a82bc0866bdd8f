use std::sync::Arc;
use std::time::Duration;

use poise::serenity_prelude::{
    self as serenity, ChannelId, ChannelType, GatewayIntents, GuildId, Member, UserId,
};
use tokio::sync::Notify;
use tracing::{error, info, warn};

use crate::constants::SECONDARY_READY_TIMEOUT;
use crate::utils::datetime::from_unix_seconds;

use super::{
    DirectoryError, GroupDirectory, GroupSnapshot, MemberSnapshot, UserSnapshot, VoiceOccupant,
};

/// Wakes `connect` once the secondary cache holds every server
struct CacheReadySignal(Arc<Notify>);

#[serenity::async_trait]
impl serenity::EventHandler for CacheReadySignal {
    async fn cache_ready(&self, _ctx: serenity::Context, guilds: Vec<GuildId>) {
        info!("Secondary session cached {} server(s)", guilds.len());
        self.0.notify_one();
    }
}

/// Wait for the ready signal; `false` when `limit` ran out first
async fn wait_until_ready(signal: &Notify, limit: Duration) -> bool {
    tokio::time::timeout(limit, signal.notified()).await.is_ok()
}

/// The second gateway connection whose cache backs every lookup
#[derive(Clone)]
pub struct SecondarySession {
    http: Arc<serenity::Http>,
    cache: Arc<serenity::Cache>,
}

impl SecondarySession {
    /// Log in with the secondary token, keep the gateway running in the background
    /// and return once its cache is filled (or the ready timeout passes)
    pub async fn connect(token: &str) -> Result<Self, serenity::Error> {
        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_VOICE_STATES;

        let ready = Arc::new(Notify::new());
        let mut client = serenity::ClientBuilder::new(token, intents)
            .event_handler(CacheReadySignal(Arc::clone(&ready)))
            .await?;

        let session = Self {
            http: Arc::clone(&client.http),
            cache: Arc::clone(&client.cache),
        };

        tokio::spawn(async move {
            info!("Starting secondary session...");
            if let Err(e) = client.start().await {
                error!("Secondary session stopped: {}", e);
            }
        });

        if !wait_until_ready(&ready, SECONDARY_READY_TIMEOUT).await {
            warn!(
                "Secondary session not ready after {}s, lookups may miss servers",
                SECONDARY_READY_TIMEOUT.as_secs()
            );
        }

        Ok(session)
    }

    fn cache_http(&self) -> (&Arc<serenity::Cache>, &serenity::Http) {
        (&self.cache, self.http.as_ref())
    }

    /// Build a snapshot from a fetched member using the cached guild for roles
    fn describe_member(
        &self,
        group_id: GuildId,
        member: &Member,
    ) -> Result<MemberSnapshot, DirectoryError> {
        let guild = self
            .cache
            .guild(group_id)
            .ok_or(DirectoryError::UnknownGroup(group_id))?;

        let mut roles: Vec<&serenity::Role> = member
            .roles
            .iter()
            .filter_map(|role_id| guild.roles.get(role_id))
            .collect();
        roles.sort_by(|a, b| b.position.cmp(&a.position));

        // @everyone shares the guild's ID and can carry ADMINISTRATOR too
        let everyone_is_admin = guild
            .roles
            .get(&group_id.everyone_role())
            .is_some_and(|role| role.permissions.administrator());
        let is_admin = guild.owner_id == member.user.id
            || everyone_is_admin
            || roles.iter().any(|role| role.permissions.administrator());

        Ok(MemberSnapshot {
            user_id: member.user.id,
            nickname: member.nick.clone(),
            joined_at: member
                .joined_at
                .and_then(|ts| from_unix_seconds(ts.unix_timestamp())),
            role_names: roles.iter().map(|role| role.name.clone()).collect(),
            is_admin,
            is_booster: member.premium_since.is_some(),
        })
    }
}

/// CDN URL of a server icon, always as PNG so the renderer can decode it
fn png_icon_url(guild_id: GuildId, icon_hash: &serenity::ImageHash) -> String {
    format!(
        "https://cdn.discordapp.com/icons/{}/{}.png?size=256",
        guild_id, icon_hash
    )
}

impl GroupDirectory for SecondarySession {
    fn list_groups(&self) -> Vec<GroupSnapshot> {
        let mut groups: Vec<GroupSnapshot> = self
            .cache
            .guilds()
            .into_iter()
            .filter_map(|guild_id| {
                let guild = self.cache.guild(guild_id)?;
                Some(GroupSnapshot {
                    id: guild_id,
                    name: guild.name.clone(),
                    icon_url: guild.icon.as_ref().map(|hash| png_icon_url(guild_id, hash)),
                    owner_id: guild.owner_id,
                })
            })
            .collect();

        groups.sort_by_key(|group| group.id);
        groups
    }

    async fn fetch_user(&self, user_id: UserId) -> Result<UserSnapshot, DirectoryError> {
        let user = user_id.to_user(self.cache_http()).await?;
        Ok(UserSnapshot {
            id: user.id,
            name: user.name,
        })
    }

    async fn fetch_member(
        &self,
        group_id: GuildId,
        user_id: UserId,
    ) -> Result<MemberSnapshot, DirectoryError> {
        let member = group_id.member(self.cache_http(), user_id).await?;
        self.describe_member(group_id, &member)
    }

    fn list_voice_channels(&self, group_id: GuildId) -> Vec<ChannelId> {
        self.cache
            .guild(group_id)
            .map(|guild| {
                guild
                    .channels
                    .values()
                    .filter(|channel| matches!(channel.kind, ChannelType::Voice | ChannelType::Stage))
                    .map(|channel| channel.id)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn list_voice_occupants(&self, group_id: GuildId, channel_id: ChannelId) -> Vec<VoiceOccupant> {
        let Some(guild) = self.cache.guild(group_id) else {
            return Vec::new();
        };

        guild
            .voice_states
            .values()
            .filter(|state| state.channel_id == Some(channel_id))
            .map(|state| {
                let member_flag = state
                    .member
                    .as_ref()
                    .or_else(|| guild.members.get(&state.user_id))
                    .map(|member| member.user.bot);
                let is_bot = bot_flag(member_flag, || {
                    self.cache.user(state.user_id).map(|user| user.bot)
                });
                VoiceOccupant {
                    user_id: state.user_id,
                    is_bot,
                }
            })
            .collect()
    }
}

/// Bot flag of a voice occupant: the member's when known, otherwise the cached
/// user's, otherwise human
fn bot_flag(member_flag: Option<bool>, cached_user_flag: impl FnOnce() -> Option<bool>) -> bool {
    member_flag.or_else(cached_user_flag).unwrap_or(false)
}
