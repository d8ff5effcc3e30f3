use std::sync::Arc;

use countdown_timer::{format_time, CountdownEngine, ManualScheduler};

fn engine() -> (CountdownEngine, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    (CountdownEngine::new(Arc::new(scheduler.clone())), scheduler)
}

#[test]
fn three_seconds_run_out_without_a_fourth_tick() {
    let (engine, scheduler) = engine();
    engine.set_duration(3);
    engine.start();

    scheduler.advance(3);
    let state = engine.snapshot();
    assert_eq!(state.remaining_seconds, 0);
    assert!(!state.is_active);

    // the schedule is gone, so more time changes nothing
    scheduler.advance(1);
    assert_eq!(engine.snapshot().remaining_seconds, 0);
    assert_eq!(scheduler.outstanding(), 0);
    assert_eq!(format_time(engine.snapshot().remaining_seconds), "00:00");
}

#[test]
fn stop_keeps_remaining_time() {
    let (engine, scheduler) = engine();
    engine.set_duration(10);
    engine.start();
    scheduler.advance(2);
    engine.stop();

    let state = engine.snapshot();
    assert_eq!(state.remaining_seconds, 8);
    assert!(!state.is_active);

    scheduler.advance(5);
    assert_eq!(engine.snapshot().remaining_seconds, 8);
}

#[test]
fn reset_mid_run_zeroes_and_idles() {
    let (engine, scheduler) = engine();
    engine.set_duration(10);
    engine.start();
    scheduler.advance(2);
    engine.reset();

    let state = engine.snapshot();
    assert_eq!(state.remaining_seconds, 0);
    assert!(!state.is_active);
    assert_eq!(scheduler.outstanding(), 0);
}

#[test]
fn stop_is_idempotent() {
    let (engine, scheduler) = engine();
    engine.set_duration(10);
    engine.start();
    scheduler.advance(1);

    engine.stop();
    let once = engine.snapshot();
    engine.stop();
    assert_eq!(engine.snapshot(), once);
}

#[test]
fn reset_is_idempotent() {
    let (engine, _) = engine();
    engine.set_duration(7);
    engine.reset();
    let once = engine.snapshot();
    engine.reset();
    assert_eq!(engine.snapshot(), once);
}

#[test]
fn repeated_start_keeps_one_schedule() {
    let (engine, scheduler) = engine();
    engine.set_duration(10);
    engine.start();
    engine.start();
    engine.start();
    assert_eq!(scheduler.outstanding(), 1);

    for expected in [9, 8, 7] {
        scheduler.advance(1);
        engine.start();
        assert_eq!(engine.snapshot().remaining_seconds, expected);
    }
    assert_eq!(scheduler.registered(), 1);
}

#[test]
fn resume_after_stop_continues_from_remaining() {
    let (engine, scheduler) = engine();
    engine.set_duration(5);
    engine.start();
    scheduler.advance(2);
    engine.stop();
    engine.start();
    scheduler.advance(3);

    let state = engine.snapshot();
    assert_eq!(state.remaining_seconds, 0);
    assert!(!state.is_active);
    assert_eq!(scheduler.outstanding(), 0);
}

#[test]
fn late_firing_after_stop_is_discarded() {
    let (engine, scheduler) = engine();
    engine.set_duration(10);
    engine.start();
    scheduler.advance(1);
    engine.stop();

    scheduler.fire_cancelled();
    assert_eq!(engine.snapshot().remaining_seconds, 9);
}

#[test]
fn late_firing_after_auto_stop_is_discarded() {
    let (engine, scheduler) = engine();
    engine.set_duration(1);
    engine.start();
    scheduler.advance(1);
    engine.set_duration(4);

    scheduler.fire_cancelled();
    let state = engine.snapshot();
    assert_eq!(state.remaining_seconds, 4);
    assert!(!state.is_active);
}
