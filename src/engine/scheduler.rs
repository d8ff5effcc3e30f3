//! Periodic scheduling capability injected into the countdown engine

use std::{fmt, sync::Arc, time::Duration};

/// Callback invoked on every firing of a periodic schedule
pub type TickCallback = Arc<dyn Fn() + Send + Sync + 'static>;

/// Something that can fire a callback at a fixed period until cancelled.
///
/// Implementations must not invoke the callback from inside
/// `schedule_every` itself; the engine registers schedules while holding
/// its own lock.
pub trait Scheduler: Send + Sync {
    /// Fire `callback` every `period`, starting one period from now
    fn schedule_every(&self, period: Duration, callback: TickCallback) -> TickHandle;
}

/// Cancellation handle for one outstanding schedule.
///
/// Dropping the handle cancels the schedule as well.
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TickHandle {
    /// Wrap the cancellation action of a scheduler.
    /// The action must not block or call back into the engine.
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop any further firings of this schedule
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}
