// Command modules
mod leaderboard;
mod lookup;
mod support;

// Re-export all commands
pub use leaderboard::leaderboard;
pub use lookup::lookup;
