mod aggregate;
mod commands;
mod constants;
mod directory;
mod error;
mod handlers;
mod leaderboard;
mod models;
mod pages;
mod pagination;
mod utils;

use std::path::PathBuf;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};

use crate::{
    constants::{
        DEFAULT_LEADERBOARD_COMMAND, DEFAULT_LOOKUP_COMMAND, DEFAULT_PREFIX, FONT_CANDIDATES,
        LOG_DIRECTIVE,
    },
    directory::SecondarySession,
    handlers::handle_interaction,
    leaderboard::locate_font,
    models::{Data, Error},
    utils::permissions::parse_user_ids,
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    initialize_logging();

    let config = match load_configuration() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Every lookup goes through the secondary session's cache
    let directory = match SecondarySession::connect(&config.secondary_token).await {
        Ok(directory) => directory,
        Err(e) => {
            error!("Failed to start secondary session: {}", e);
            std::process::exit(1);
        }
    };

    let font = locate_font(config.font_path.as_deref(), FONT_CANDIDATES);
    let data = Data::new(directory, config.allowed_users.clone(), font);

    if let Err(e) = start_bot(config, data).await {
        error!("Bot error: {}", e);
        std::process::exit(1);
    }
}

/// Configuration loaded from environment variables
struct Config {
    discord_token: String,
    secondary_token: String,
    prefix: String,
    lookup_command: String,
    leaderboard_command: String,
    allowed_users: Vec<u64>,
    font_path: Option<PathBuf>,
}

/// Initialize the logging system
fn initialize_logging() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    match LOG_DIRECTIVE.parse::<tracing_subscriber::filter::Directive>() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring invalid log directive {}: {}", LOG_DIRECTIVE, e),
    }

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Load configuration from environment variables
fn load_configuration() -> Result<Config, Box<dyn std::error::Error>> {
    let discord_token = std::env::var("DISCORD_TOKEN")
        .map_err(|_| "DISCORD_TOKEN environment variable not set. Set it with: export DISCORD_TOKEN=your_bot_token")?;

    let secondary_token = std::env::var("SECONDARY_TOKEN")
        .map_err(|_| "SECONDARY_TOKEN environment variable not set. Set it with: export SECONDARY_TOKEN=your_second_token")?;

    let allowed_users = std::env::var("ALLOWED_USER_IDS")
        .map(|raw| parse_user_ids(&raw))
        .unwrap_or_default();

    if allowed_users.is_empty() {
        warn!("ALLOWED_USER_IDS is empty: every command will be rejected");
    } else {
        info!("{} user(s) allowed to run commands", allowed_users.len());
    }

    let font_path = std::env::var("FONT_PATH").ok().map(PathBuf::from);

    Ok(Config {
        discord_token,
        secondary_token,
        prefix: env_or("COMMAND_PREFIX", DEFAULT_PREFIX),
        lookup_command: env_or("LOOKUP_COMMAND", DEFAULT_LOOKUP_COMMAND),
        leaderboard_command: env_or("LEADERBOARD_COMMAND", DEFAULT_LEADERBOARD_COMMAND),
        allowed_users,
        font_path,
    })
}

/// Commands under their configured keywords
fn build_commands(config: &Config) -> Vec<poise::Command<Data, Error>> {
    let mut lookup = commands::lookup();
    lookup.name = config.lookup_command.clone();

    let mut leaderboard = commands::leaderboard();
    leaderboard.name = config.leaderboard_command.clone();

    vec![lookup, leaderboard]
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Command {} failed: {}", ctx.command().name, error);
        }
        // The allow-list check already answered the caller
        poise::FrameworkError::CommandCheckFailed { error: None, ctx, .. } => {
            debug!("Check rejected {} for {}", ctx.command().name, ctx.author().id);
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling framework error: {}", e);
            }
        }
    }
}

/// Create and start the Discord bot
async fn start_bot(config: Config, data: Data) -> Result<(), Error> {
    let commands = build_commands(&config);
    info!(
        "Listening for {}{} and {}{}",
        config.prefix, config.lookup_command, config.prefix, config.leaderboard_command
    );

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands,
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.prefix.clone()),
                case_insensitive_commands: true,
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |_ctx, event, _framework, data| {
                Box::pin(async move {
                    if let serenity::FullEvent::InteractionCreate {
                        interaction: serenity::Interaction::Component(component),
                    } = event
                    {
                        handle_interaction(component.clone(), data);
                    }
                    Ok(())
                })
            },
            ..Default::default()
        })
        .setup(move |_ctx, ready, _framework| {
            Box::pin(async move {
                info!("Bot is ready as {}!", ready.user.name);
                Ok(data)
            })
        })
        .build();

    // Prefix commands need message content
    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(config.discord_token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot...");
    client.start().await?;

    Ok(())
}
