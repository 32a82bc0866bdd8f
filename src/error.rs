use poise::serenity_prelude as serenity;

use crate::leaderboard::RenderError;
use crate::utils::messages::{build_no_active_voice, build_no_shared_groups, build_user_not_found};

/// Outcomes that end a command early with a specific reply
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("target user could not be resolved")]
    UserNotFound,
    #[error("target user shares no servers with the secondary session")]
    NoSharedGroups,
    #[error("no server has active voice users")]
    NoActiveVoice,
}

impl LookupError {
    /// The reply shown to the invoker
    pub fn user_message(&self) -> String {
        match self {
            LookupError::UserNotFound => build_user_not_found(),
            LookupError::NoSharedGroups => build_no_shared_groups(),
            LookupError::NoActiveVoice => build_no_active_voice(),
        }
    }
}

/// Everything a command body can fail with
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("discord request failed: {0}")]
    Discord(#[from] serenity::Error),
    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),
    #[error("render task aborted: {0}")]
    RenderTask(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_match_branch() {
        assert!(LookupError::UserNotFound.user_message().contains("not found"));
        assert!(LookupError::NoSharedGroups.user_message().contains("shared servers"));
        assert!(LookupError::NoActiveVoice.user_message().contains("active voice"));
    }

    #[test]
    fn test_lookup_error_converts_into_command_error() {
        let error: CommandError = LookupError::NoSharedGroups.into();
        assert!(matches!(error, CommandError::Lookup(LookupError::NoSharedGroups)));
    }
}
