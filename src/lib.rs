//! Countdown Timer - A countdown engine with an HTTP control surface
//!
//! This library provides the countdown state machine, the schedulers that
//! drive its one-second tick, and an HTTP binding for presentation layers.

pub mod config;
pub mod engine;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{CountdownEngine, DurationPolicy, ManualScheduler, Scheduler, TickHandle};
pub use state::{AppState, TimerState, TimerView};
pub use api::create_router;
pub use tasks::TokioScheduler;
pub use utils::{format_time, parse_duration_input};
