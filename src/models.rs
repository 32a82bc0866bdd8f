use std::sync::Arc;

use ab_glyph::FontArc;
use poise::serenity_prelude::ComponentInteraction;

use crate::directory::SecondarySession;
use crate::pagination::SessionRegistry;

/// Bot state shared across all commands and handlers
pub struct Data {
    /// Secondary gateway session used for every cross-server lookup
    pub directory: SecondarySession,
    /// Users allowed to run commands
    pub allowed_users: Vec<u64>,
    /// Live pagination sessions keyed by the message they control
    pub sessions: Arc<SessionRegistry<ComponentInteraction>>,
    /// Font for leaderboard text, if one could be loaded
    pub font: Option<FontArc>,
    /// Client for downloading server icons
    pub http_client: reqwest::Client,
}

impl Data {
    pub fn new(directory: SecondarySession, allowed_users: Vec<u64>, font: Option<FontArc>) -> Self {
        Self {
            directory,
            allowed_users,
            sessions: Arc::new(SessionRegistry::new()),
            font,
            http_client: reqwest::Client::new(),
        }
    }
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
