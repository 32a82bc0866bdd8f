use poise::{CreateReply, serenity_prelude::CreateAttachment};
use tracing::info;

use crate::{
    aggregate::fetch_voice_occupancy,
    constants::LEADERBOARD_CAPTION,
    error::{CommandError, LookupError},
    leaderboard::{load_icons, render},
    models::{Context, Error},
    utils::messages::{build_leaderboard_failure, build_leaderboard_notice},
};

use super::support::{ensure_allowed, report_failure};

/// Post an image ranking servers by how many people are in voice right now
#[poise::command(prefix_command, check = "ensure_allowed")]
pub async fn leaderboard(
    ctx: Context<'_>,
    #[rest] _trailing: Option<String>,
) -> Result<(), Error> {
    ctx.say(build_leaderboard_notice()).await?;

    if let Err(e) = run_leaderboard(ctx).await {
        report_failure(ctx, e, build_leaderboard_failure()).await?;
    }

    Ok(())
}

async fn run_leaderboard(ctx: Context<'_>) -> Result<(), CommandError> {
    let data = ctx.data();

    let entries = fetch_voice_occupancy(&data.directory);
    if entries.is_empty() {
        return Err(LookupError::NoActiveVoice.into());
    }

    let icons = load_icons(&data.http_client, &entries).await;
    let font = data.font.clone();
    let ranked = entries.len();

    // Rasterizing is CPU-bound
    let image =
        tokio::task::spawn_blocking(move || render(&entries, &icons, font.as_ref())).await??;

    info!(
        "Rendered voice leaderboard with {} server(s), {}x{}",
        ranked, image.width, image.height
    );

    let reply = CreateReply::default()
        .content(LEADERBOARD_CAPTION)
        .attachment(CreateAttachment::bytes(image.bytes, image.filename));
    ctx.send(reply).await?;

    Ok(())
}
