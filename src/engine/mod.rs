//! Countdown engine module
//!
//! This module contains the countdown state machine and the scheduling
//! capability it ticks through.

pub mod countdown;
pub mod manual;
pub mod scheduler;

// Re-export main types
pub use countdown::{CountdownEngine, DurationPolicy, TICK_PERIOD};
pub use manual::ManualScheduler;
pub use scheduler::{Scheduler, TickCallback, TickHandle};
