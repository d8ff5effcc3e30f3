//! Countdown state machine
//!
//! ```text
//! Idle --start (remaining > 0)--> Running
//! Running --tick (remaining <= 1)--> Idle    auto-stop
//! Running --stop--> Idle
//! any --reset--> Idle, remaining = 0
//! ```
//!
//! Every transition, including the scheduled tick, runs under one mutex, so
//! a tick never observes a half-applied `stop` or `reset` and vice versa.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use super::scheduler::{Scheduler, TickCallback, TickHandle};
use crate::state::TimerState;

/// Period between two ticks of a running countdown
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// What `set_duration` does while a countdown is running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DurationPolicy {
    /// Leave the running countdown untouched
    #[default]
    Ignore,
    /// Stop the countdown, then apply the new duration
    StopFirst,
}

struct Inner {
    state: TimerState,
    tick_handle: Option<TickHandle>,
    /// Bumped on every start; firings stamped with an older value are stale.
    generation: u64,
    updates: watch::Sender<TimerState>,
}

impl Inner {
    /// Cancel the outstanding schedule, if any, and go idle
    fn halt(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            handle.cancel();
        }
        self.state.is_active = false;
    }

    fn publish(&self) {
        let state = self.state;
        self.updates.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }
}

/// Owner of the countdown state and of the single tick schedule.
///
/// Cloning yields another handle to the same countdown.
#[derive(Clone)]
pub struct CountdownEngine {
    inner: Arc<Mutex<Inner>>,
    scheduler: Arc<dyn Scheduler>,
    policy: DurationPolicy,
}

impl CountdownEngine {
    /// Create an idle engine with the default duration policy
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self::with_policy(scheduler, DurationPolicy::default())
    }

    pub fn with_policy(scheduler: Arc<dyn Scheduler>, policy: DurationPolicy) -> Self {
        let state = TimerState::new();
        let (updates, _) = watch::channel(state);

        Self {
            inner: Arc::new(Mutex::new(Inner {
                state,
                tick_handle: None,
                generation: 0,
                updates,
            })),
            scheduler,
            policy,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock_inner(&self.inner)
    }

    pub fn policy(&self) -> DurationPolicy {
        self.policy
    }

    /// Current state
    pub fn snapshot(&self) -> TimerState {
        self.lock().state
    }

    /// Watch every state change from now on
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.lock().updates.subscribe()
    }

    /// Load a new duration. Negative values clamp to zero.
    pub fn set_duration(&self, seconds: i64) {
        let mut inner = self.lock();

        if inner.state.is_active {
            match self.policy {
                DurationPolicy::Ignore => {
                    debug!("Ignoring duration {}s while countdown is running", seconds);
                    return;
                }
                DurationPolicy::StopFirst => {
                    info!("Stopping running countdown to apply duration {}s", seconds);
                    inner.halt();
                }
            }
        }

        inner.state.remaining_seconds = u64::try_from(seconds).unwrap_or(0);
        debug!("Duration set to {}s", inner.state.remaining_seconds);
        inner.publish();
    }

    /// Begin ticking. A no-op when already running or when nothing is left.
    pub fn start(&self) {
        let mut inner = self.lock();

        if inner.state.is_active || inner.state.remaining_seconds == 0 {
            debug!(
                "Start ignored: active={}, remaining={}s",
                inner.state.is_active, inner.state.remaining_seconds
            );
            return;
        }

        inner.generation = inner.generation.wrapping_add(1);
        let generation = inner.generation;
        let weak = Arc::downgrade(&self.inner);
        let callback: TickCallback = Arc::new(move || {
            if let Some(shared) = weak.upgrade() {
                tick(&shared, generation);
            }
        });

        inner.tick_handle = Some(self.scheduler.schedule_every(TICK_PERIOD, callback));
        inner.state.is_active = true;
        info!("Countdown started with {}s remaining", inner.state.remaining_seconds);
        inner.publish();
    }

    /// Pause the countdown, keeping the remaining time
    pub fn stop(&self) {
        let mut inner = self.lock();

        if !inner.state.is_active && inner.tick_handle.is_none() {
            return;
        }

        inner.halt();
        info!("Countdown stopped with {}s remaining", inner.state.remaining_seconds);
        inner.publish();
    }

    /// Stop and clear the remaining time
    pub fn reset(&self) {
        let mut inner = self.lock();

        inner.halt();
        if inner.state.remaining_seconds != 0 {
            info!("Countdown reset");
        }
        inner.state.remaining_seconds = 0;
        inner.publish();
    }
}

fn lock_inner(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    // transitions never leave the state half-written, so a poisoned lock is still usable
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One scheduled firing. Firings from an older generation are dropped.
fn tick(shared: &Mutex<Inner>, generation: u64) {
    let mut inner = lock_inner(shared);

    if !inner.state.is_active || inner.generation != generation {
        debug!("Discarding stale tick from generation {}", generation);
        return;
    }

    if inner.state.remaining_seconds <= 1 {
        inner.state.remaining_seconds = 0;
        inner.halt();
        info!("Countdown reached zero, auto-stopping");
    } else {
        inner.state.remaining_seconds -= 1;
        debug!("Tick: {}s remaining", inner.state.remaining_seconds);
    }

    inner.publish();
}

impl fmt::Debug for CountdownEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownEngine")
            .field("state", &self.snapshot())
            .field("policy", &self.policy)
            .finish()
    }
}
