use std::sync::Arc;

use chrono::Utc;
use poise::CreateReply;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::{
    aggregate::{fetch_membership_across_groups, resolve_user},
    constants::INACTIVITY_WINDOW,
    error::{CommandError, LookupError},
    models::{Context, Error},
    pages::build_pages,
    pagination::{Controls, MessageSurface, PaginationSession, navigation_row, run_session},
    utils::messages::{build_lookup_failure, build_lookup_usage},
    utils::string_utils::first_token,
};

use super::support::{ensure_allowed, report_failure};

/// Show a user's membership in every shared server, one page per server
#[poise::command(prefix_command, check = "ensure_allowed")]
pub async fn lookup(ctx: Context<'_>, #[rest] args: Option<String>) -> Result<(), Error> {
    // Only the first word is the target; trailing words are ignored
    let Some(user_id) = args.as_deref().and_then(first_token) else {
        ctx.say(build_lookup_usage(ctx.prefix(), ctx.invoked_command_name()))
            .await?;
        return Ok(());
    };

    if let Err(e) = run_lookup(ctx, user_id).await {
        report_failure(ctx, e, build_lookup_failure()).await?;
    }

    Ok(())
}

async fn run_lookup(ctx: Context<'_>, raw_id: &str) -> Result<(), CommandError> {
    let data = ctx.data();
    let target = resolve_user(&data.directory, raw_id).await?;

    let records = fetch_membership_across_groups(&data.directory, target.id).await;
    let footer_icon = ctx.cache().current_user().face();
    let pages = build_pages(&records, Some(&footer_icon), Utc::now())
        .ok_or(LookupError::NoSharedGroups)?;

    let reply = CreateReply::default()
        .embed(pages.first().to_embed())
        .components(vec![navigation_row(Controls::at(0, pages.len()))]);
    let handle = ctx.send(reply).await?;
    let message = handle.message().await?;

    info!(
        "Sent {} page(s) about {} ({}) to {}",
        pages.len(),
        target.name,
        target.id,
        ctx.author().id
    );

    // Presses landing before this registration find no route and are dropped
    let artifact = message.id;
    let sessions = Arc::clone(&data.sessions);
    let events = sessions.register(artifact);
    debug!("{} pagination session(s) live", sessions.len());
    let session = PaginationSession::start(
        pages,
        ctx.author().id,
        artifact,
        Instant::now(),
        INACTIVITY_WINDOW,
    );
    let surface = MessageSurface::new(
        Arc::clone(&ctx.serenity_context().http),
        message.channel_id,
        artifact,
    );

    tokio::spawn(async move {
        run_session(session, surface, events).await;
        sessions.end(artifact);
    });

    Ok(())
}
