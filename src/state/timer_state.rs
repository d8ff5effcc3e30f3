//! Timer state structure and the control view derived from it

use serde::{Deserialize, Serialize};

/// Observable countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_seconds: u64,
    pub is_active: bool,
}

impl TimerState {
    /// Create the initial idle state with nothing left to count
    pub fn new() -> Self {
        Self {
            remaining_seconds: 0,
            is_active: false,
        }
    }

    /// Check if the countdown is running
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Seconds left on the countdown
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Which controls a presentation layer should enable
    pub fn controls(&self) -> Controls {
        Controls::from(self)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Enabled flags for the Start/Stop/Reset controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start: bool,
    pub stop: bool,
    pub reset: bool,
}

impl From<&TimerState> for Controls {
    fn from(state: &TimerState) -> Self {
        Self {
            start: !state.is_active && state.remaining_seconds > 0,
            stop: state.is_active,
            // remaining time is unsigned, so reset is never disabled
            reset: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_idle_at_zero() {
        let state = TimerState::new();
        assert_eq!(state.remaining_seconds(), 0);
        assert!(!state.is_active());
    }

    #[test]
    fn start_needs_time_and_idle() {
        let idle_empty = TimerState::new();
        assert!(!idle_empty.controls().start);

        let idle_loaded = TimerState { remaining_seconds: 5, is_active: false };
        assert!(idle_loaded.controls().start);
        assert!(!idle_loaded.controls().stop);

        let running = TimerState { remaining_seconds: 5, is_active: true };
        let controls = running.controls();
        assert!(!controls.start);
        assert!(controls.stop);
        assert!(controls.reset);
    }
}
