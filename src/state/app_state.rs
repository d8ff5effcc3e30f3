//! Shared state behind the HTTP control surface

use std::{
    sync::Mutex,
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use super::{TimerState, TimerView};
use crate::{engine::CountdownEngine, utils::parse_duration_input};

/// State shared by every request: the countdown engine plus the input field
#[derive(Debug)]
pub struct AppState {
    /// The one countdown this server controls
    pub engine: CountdownEngine,
    /// Raw text of the duration input field. Held across the matching
    /// engine call so input text and duration change together.
    pub input: Mutex<String>,
    /// Channel for input field changes
    pub input_update_tx: watch::Sender<String>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create a new AppState around an engine
    pub fn new(port: u16, host: String, engine: CountdownEngine) -> Self {
        let (input_update_tx, _) = watch::channel(String::new());

        Self {
            engine,
            input: Mutex::new(String::new()),
            input_update_tx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Store new input text and feed its value to the engine
    pub fn set_input(&self, text: &str) -> Result<TimerView, String> {
        let seconds = parse_duration_input(text);
        debug!("Input {:?} parsed as {}s", text, seconds);

        {
            let mut input = self.input.lock()
                .map_err(|e| format!("Failed to lock input: {}", e))?;
            *input = text.to_string();
            self.engine.set_duration(seconds);
            self.input_update_tx.send_replace(text.to_string());
        }

        self.record_action("duration");
        self.view()
    }

    pub fn start(&self) -> Result<TimerView, String> {
        self.engine.start();
        self.record_action("start");
        self.view()
    }

    pub fn stop(&self) -> Result<TimerView, String> {
        self.engine.stop();
        self.record_action("stop");
        self.view()
    }

    /// Reset the countdown and clear the input field
    pub fn reset(&self) -> Result<TimerView, String> {
        {
            let mut input = self.input.lock()
                .map_err(|e| format!("Failed to lock input: {}", e))?;
            self.engine.reset();
            input.clear();
            // always notify, the input field must clear even if nothing changed here
            self.input_update_tx.send_replace(String::new());
        }

        self.record_action("reset");
        self.view()
    }

    /// Watch every input field update, including resets
    pub fn subscribe_input(&self) -> watch::Receiver<String> {
        self.input_update_tx.subscribe()
    }

    /// View of the current countdown state
    pub fn view(&self) -> Result<TimerView, String> {
        self.view_of(self.engine.snapshot())
    }

    /// View of a given countdown state with the current input text
    pub fn view_of(&self, timer: TimerState) -> Result<TimerView, String> {
        let input = self.input.lock()
            .map(|input| input.clone())
            .map_err(|e| format!("Failed to lock input: {}", e))?;

        Ok(TimerView::new(timer, input))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::engine::ManualScheduler;

    fn app() -> (AppState, ManualScheduler) {
        let scheduler = ManualScheduler::new();
        let engine = CountdownEngine::new(Arc::new(scheduler.clone()));
        (AppState::new(0, "127.0.0.1".to_string(), engine), scheduler)
    }

    #[test]
    fn input_text_drives_the_engine() {
        let (app, _) = app();
        let view = app.set_input(" 90 ").unwrap();
        assert_eq!(view.remaining_seconds, 90);
        assert_eq!(view.display, "01:30");
        assert_eq!(view.input, " 90 ");

        let view = app.set_input("oops").unwrap();
        assert_eq!(view.remaining_seconds, 0);
        assert!(!view.controls.start);
    }

    #[test]
    fn reset_clears_input_text() {
        let (app, scheduler) = app();
        app.set_input("10").unwrap();
        app.start().unwrap();
        scheduler.advance(2);

        let view = app.reset().unwrap();
        assert_eq!(view.remaining_seconds, 0);
        assert!(!view.is_active);
        assert!(view.input.is_empty());
        assert_eq!(app.get_last_action().0.as_deref(), Some("reset"));
    }

    #[test]
    fn reset_at_zero_still_notifies_input_watchers() {
        let (app, _) = app();
        app.set_input("abc").unwrap();
        let mut rx = app.subscribe_input();
        let engine_rx = app.engine.subscribe();

        app.reset().unwrap();
        assert!(!engine_rx.has_changed().unwrap());
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "");
    }

    #[test]
    fn input_with_same_value_notifies() {
        let (app, _) = app();
        app.set_input("abc").unwrap();
        let mut rx = app.subscribe_input();

        app.set_input("0").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "0");
    }

    #[test]
    fn concurrent_input_and_reset_stay_paired() {
        let (app, _) = app();
        let app = Arc::new(app);

        let writers: Vec<_> = (0..4)
            .map(|i| {
                let app = Arc::clone(&app);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        if i % 2 == 0 {
                            app.set_input("5").unwrap();
                        } else {
                            app.reset().unwrap();
                        }
                    }
                })
            })
            .collect();

        for _ in 0..200 {
            let view = {
                let input = app.input.lock().unwrap();
                TimerView::new(app.engine.snapshot(), input.clone())
            };
            let paired = (view.remaining_seconds == 5 && view.input == "5")
                || (view.remaining_seconds == 0 && view.input.is_empty());
            assert!(paired, "input {:?} with {}s", view.input, view.remaining_seconds);
        }

        for writer in writers {
            writer.join().unwrap();
        }
    }
}
