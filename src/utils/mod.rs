//! Utility functions module
//!
//! Presentation helpers shared by the HTTP layer, plus signal handling.

pub mod format;
pub mod input;
pub mod signals;

// Re-export main functions
pub use format::format_time;
pub use input::parse_duration_input;
pub use signals::{register_shutdown_signals, shutdown_signal};
