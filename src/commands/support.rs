use tracing::{error, warn};

use crate::{
    error::CommandError,
    models::{Context, Error},
    utils::messages::build_permission_denied,
    utils::permissions::is_authorized,
};

/// Command check: reply with a rejection and return `false` when the author
/// isn't allow-listed. Runs before arguments are parsed.
pub async fn ensure_allowed(ctx: Context<'_>) -> Result<bool, Error> {
    let author = ctx.author();
    if is_authorized(author.id.get(), &ctx.data().allowed_users) {
        return Ok(true);
    }

    warn!(
        "Rejected {} from {} ({})",
        ctx.invoked_command_name(),
        author.name,
        author.id
    );
    ctx.say(build_permission_denied()).await?;
    Ok(false)
}

/// Turn a failed flow into a reply: known outcomes get their own text,
/// everything else is logged and answered with `fallback`
pub async fn report_failure(
    ctx: Context<'_>,
    failure: CommandError,
    fallback: String,
) -> Result<(), Error> {
    let reply = match failure {
        CommandError::Lookup(outcome) => outcome.user_message(),
        other => {
            error!("Failed to run {}: {}", ctx.invoked_command_name(), other);
            fallback
        }
    };

    ctx.say(reply).await?;
    Ok(())
}
