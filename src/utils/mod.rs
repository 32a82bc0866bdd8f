/// Utility modules for common functionality
pub mod datetime;
pub mod messages;
pub mod permissions;
pub mod string_utils;
