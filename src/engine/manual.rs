//! Deterministic scheduler driven by explicit calls instead of a clock

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};
use tracing::debug;

use super::scheduler::{Scheduler, TickCallback, TickHandle};

struct Entry {
    callback: TickCallback,
    cancelled: Arc<AtomicBool>,
}

/// Scheduler whose time only moves when [`ManualScheduler::advance`] is called.
///
/// Meant for tests and simulations. Clones share the same set of schedules,
/// so a test can keep one clone and hand another to the engine. Cancelled
/// schedules are kept for [`ManualScheduler::fire_cancelled`] until
/// [`ManualScheduler::clear_cancelled`] drops them.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Let `periods` periods elapse, firing every live schedule once per period.
    ///
    /// Callbacks run without the scheduler lock held, and a schedule cancelled
    /// by an earlier callback in the same period does not fire.
    pub fn advance(&self, periods: usize) {
        for _ in 0..periods {
            let live: Vec<(TickCallback, Arc<AtomicBool>)> = self
                .entries()
                .iter()
                .filter(|entry| !entry.cancelled.load(Ordering::SeqCst))
                .map(|entry| (Arc::clone(&entry.callback), Arc::clone(&entry.cancelled)))
                .collect();

            for (callback, cancelled) in live {
                if !cancelled.load(Ordering::SeqCst) {
                    callback();
                }
            }
        }
    }

    /// Deliver one firing to every cancelled schedule, as if the firing had
    /// already been queued when the cancellation happened
    pub fn fire_cancelled(&self) {
        let stale: Vec<TickCallback> = self
            .entries()
            .iter()
            .filter(|entry| entry.cancelled.load(Ordering::SeqCst))
            .map(|entry| Arc::clone(&entry.callback))
            .collect();

        debug!("Delivering {} late firings", stale.len());
        for callback in stale {
            callback();
        }
    }

    /// Forget cancelled schedules, returning how many were dropped
    pub fn clear_cancelled(&self) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|entry| !entry.cancelled.load(Ordering::SeqCst));
        before - entries.len()
    }

    /// Number of schedules that have not been cancelled
    pub fn outstanding(&self) -> usize {
        self.entries()
            .iter()
            .filter(|entry| !entry.cancelled.load(Ordering::SeqCst))
            .count()
    }

    /// Number of schedules still held, cancelled ones included
    pub fn registered(&self) -> usize {
        self.entries().len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_every(&self, period: Duration, callback: TickCallback) -> TickHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.entries().push(Entry {
            callback,
            cancelled: Arc::clone(&cancelled),
        });
        debug!("Manual schedule registered with period {:?}", period);

        TickHandle::new(move || cancelled.store(true, Ordering::SeqCst))
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("outstanding", &self.outstanding())
            .field("registered", &self.registered())
            .finish()
    }
}
