/// Lifecycle of paginated lookup results: state machine, timer-driven
/// session task, routing of button presses, and the Discord message surface
mod controller;
mod discord;
mod registry;
mod state;

pub use controller::{NavigationEvent, run_session};
pub use discord::{MessageSurface, navigation_row};
pub use registry::SessionRegistry;
pub use state::{Controls, Direction, PaginationSession};
