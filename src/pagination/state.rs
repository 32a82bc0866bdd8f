use std::time::Duration;

use poise::serenity_prelude::{MessageId, UserId};
use tokio::time::Instant;

use crate::constants::{NAV_NEXT_ID, NAV_PREVIOUS_ID};
use crate::pages::{Page, PageSequence};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Map a button custom ID to a direction
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        match custom_id {
            NAV_PREVIOUS_ID => Some(Direction::Previous),
            NAV_NEXT_ID => Some(Direction::Next),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Active(usize),
    Expired,
}

/// Disabled flags of the two navigation buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl Controls {
    pub fn at(index: usize, len: usize) -> Self {
        Self {
            previous_disabled: index == 0,
            next_disabled: index + 1 >= len,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    Expired,
    Unauthorized,
    WrongArtifact,
    AtBoundary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationOutcome {
    Moved(usize),
    Ignored(IgnoreReason),
}

/// Interaction state of one delivered page sequence.
///
/// Time is passed in explicitly so transitions can be checked without a runtime.
#[derive(Debug)]
pub struct PaginationSession {
    pages: PageSequence,
    index: usize,
    expired: bool,
    authorized_user: UserId,
    artifact: MessageId,
    window: Duration,
    deadline: Option<Instant>,
}

impl PaginationSession {
    pub fn start(
        pages: PageSequence,
        authorized_user: UserId,
        artifact: MessageId,
        now: Instant,
        window: Duration,
    ) -> Self {
        Self {
            pages,
            index: 0,
            expired: false,
            authorized_user,
            artifact,
            window,
            deadline: Some(now + window),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.expired {
            SessionState::Expired
        } else {
            SessionState::Active(self.index)
        }
    }

    pub fn artifact(&self) -> MessageId {
        self.artifact
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn current_page(&self) -> &Page {
        self.pages.get(self.index).unwrap_or_else(|| self.pages.first())
    }

    pub fn controls(&self) -> Controls {
        Controls::at(self.index, self.pages.len())
    }

    /// Apply a button press. Only the authorized user's presses on the live
    /// artifact move the index, and only those reset the deadline.
    pub fn navigate(
        &mut self,
        user_id: UserId,
        artifact: MessageId,
        direction: Direction,
        now: Instant,
    ) -> NavigationOutcome {
        if self.expired {
            return NavigationOutcome::Ignored(IgnoreReason::Expired);
        }
        if artifact != self.artifact {
            return NavigationOutcome::Ignored(IgnoreReason::WrongArtifact);
        }
        if user_id != self.authorized_user {
            return NavigationOutcome::Ignored(IgnoreReason::Unauthorized);
        }

        let target = match direction {
            Direction::Previous => self.index.checked_sub(1),
            Direction::Next => Some(self.index + 1).filter(|&i| i <= self.pages.last_index()),
        };
        let Some(target) = target else {
            return NavigationOutcome::Ignored(IgnoreReason::AtBoundary);
        };

        self.index = target;
        self.deadline = Some(now + self.window);
        NavigationOutcome::Moved(target)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Terminal transition; clears the deadline
    pub fn expire(&mut self) {
        self.expired = true;
        self.deadline = None;
    }
}
