//! State management module
//!
//! This module contains the countdown state, its render-ready view, and the
//! shared state handed to the HTTP layer.

pub mod app_state;
pub mod timer_state;
pub mod view;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{Controls, TimerState};
pub use view::TimerView;
