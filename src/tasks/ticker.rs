//! Wall-clock ticking on the tokio runtime

use std::time::Duration;
use tokio::{
    runtime::Handle,
    time::{interval_at, Instant},
};
use tracing::debug;

use crate::engine::{Scheduler, TickCallback, TickHandle};

/// Scheduler that drives each schedule from its own tokio interval task
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    /// Spawn ticker tasks onto the given runtime
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime the caller is running on
    pub fn current() -> Result<Self, String> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| format!("No tokio runtime available for ticking: {}", e))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_every(&self, period: Duration, callback: TickCallback) -> TickHandle {
        let task = self.runtime.spawn(ticker_task(period, callback));
        TickHandle::new(move || task.abort())
    }
}

/// Background task firing `callback` once per `period` until aborted
async fn ticker_task(period: Duration, callback: TickCallback) {
    debug!("Starting ticker task with period {:?}", period);

    // first firing one full period after scheduling, not immediately
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;
        callback();
    }
}
