use dashmap::DashMap;
use poise::serenity_prelude::MessageId;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use crate::constants::SESSION_EVENT_BUFFER;

use super::controller::NavigationEvent;

/// Routes button presses to the live session of the message they were pressed on
pub struct SessionRegistry<A> {
    routes: DashMap<MessageId, mpsc::Sender<NavigationEvent<A>>>,
}

impl<A> Default for SessionRegistry<A> {
    fn default() -> Self {
        Self {
            routes: DashMap::new(),
        }
    }
}

impl<A> SessionRegistry<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a route for a delivered message. A second registration replaces
    /// the first, which ends the older session.
    pub fn register(&self, artifact: MessageId) -> mpsc::Receiver<NavigationEvent<A>> {
        let (tx, rx) = mpsc::channel(SESSION_EVENT_BUFFER);
        if self.routes.insert(artifact, tx).is_some() {
            warn!("Replaced an existing pagination session on message {}", artifact);
        }
        rx
    }

    /// Forward a press to its session. Returns false when no live session owns the message.
    pub fn route(&self, event: NavigationEvent<A>) -> bool {
        let artifact = event.artifact_id;
        let Some(tx) = self.routes.get(&artifact).map(|route| route.clone()) else {
            debug!("No pagination session on message {}", artifact);
            return false;
        };

        match tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("Dropped a press on message {}: session is busy", artifact);
                false
            }
            Err(TrySendError::Closed(_)) => {
                self.routes.remove(&artifact);
                false
            }
        }
    }

    /// Close the route; the session then strips its controls and stops
    pub fn end(&self, artifact: MessageId) -> bool {
        self.routes.remove(&artifact).is_some()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }
}
