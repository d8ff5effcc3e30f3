//! Render-ready view of the countdown

use serde::{Deserialize, Serialize};

use super::timer_state::{Controls, TimerState};
use crate::utils::format_time;

/// Everything a presentation layer needs to draw the timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    pub remaining_seconds: u64,
    /// Remaining time as `MM:SS`
    pub display: String,
    pub is_active: bool,
    pub controls: Controls,
    /// Text currently shown in the duration input field
    pub input: String,
}

impl TimerView {
    pub fn new(timer: TimerState, input: String) -> Self {
        Self {
            remaining_seconds: timer.remaining_seconds,
            display: format_time(timer.remaining_seconds),
            is_active: timer.is_active,
            controls: timer.controls(),
            input,
        }
    }
}
