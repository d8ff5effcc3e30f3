//! Background tasks module
//!
//! This module contains the tokio tasks that tick running countdowns.

pub mod ticker;

// Re-export main types
pub use ticker::TokioScheduler;
