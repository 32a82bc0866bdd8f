use std::future::Future;

use poise::serenity_prelude::{MessageId, UserId};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::models::Error;
use crate::pages::Page;

use super::state::{Controls, Direction, NavigationOutcome, PaginationSession};

/// A button press addressed to a delivered artifact
#[derive(Debug)]
pub struct NavigationEvent<A> {
    pub user_id: UserId,
    pub artifact_id: MessageId,
    pub direction: Direction,
    /// Handle used to answer the press when it is accepted
    pub ack: A,
}

/// The delivered message a session keeps up to date
pub trait ArtifactSurface: Send + Sync {
    type Ack: Send;

    /// Show a page with refreshed controls in answer to an accepted press
    fn show(
        &self,
        page: &Page,
        controls: Controls,
        ack: Self::Ack,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    /// Remove the navigation controls for good
    fn strip_controls(&self) -> impl Future<Output = Result<(), Error>> + Send;
}

/// Drive a session until it expires or its event channel closes.
///
/// Each accepted press replaces the single pending deadline. Failed edits are
/// logged and the session keeps going.
pub async fn run_session<S: ArtifactSurface>(
    mut session: PaginationSession,
    surface: S,
    mut events: mpsc::Receiver<NavigationEvent<S::Ack>>,
) -> PaginationSession {
    let artifact = session.artifact();

    while let Some(deadline) = session.deadline() {
        tokio::select! {
            _ = sleep_until(deadline) => {
                if session.is_due(Instant::now()) {
                    info!("Pagination on message {} expired after inactivity", artifact);
                    break;
                }
            }
            event = events.recv() => {
                let Some(event) = event else {
                    info!("Pagination on message {} ended", artifact);
                    break;
                };

                match session.navigate(event.user_id, event.artifact_id, event.direction, Instant::now()) {
                    NavigationOutcome::Moved(index) => {
                        debug!("Message {} moved to page {}", artifact, index + 1);
                        if let Err(e) = surface.show(session.current_page(), session.controls(), event.ack).await {
                            warn!("Failed to update paginated message {}: {}", artifact, e);
                        }
                    }
                    NavigationOutcome::Ignored(reason) => {
                        debug!(
                            "Ignored press from {} on message {}: {:?}",
                            event.user_id, artifact, reason
                        );
                    }
                }
            }
        }
    }

    session.expire();
    debug!("Pagination on message {} is now {:?}", artifact, session.state());

    if let Err(e) = surface.strip_controls().await {
        warn!("Failed to remove controls from message {}: {}", artifact, e);
    }

    session
}
