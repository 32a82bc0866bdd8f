/// Handler modules for Discord events and interactions
mod interaction;

// Re-export main handler functions
pub use interaction::handle_interaction;
