//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, info, warn};

use crate::state::AppState;
use super::responses::{ApiResponse, DurationRequest, HealthResponse, StatusResponse};

/// Handle POST /duration - Store input text and load it as the duration
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.set_input(&request.input) {
        Ok(view) => {
            info!("Duration endpoint called - {}s loaded", view.remaining_seconds);
            let message = if view.is_active {
                "Countdown running, duration unchanged".to_string()
            } else {
                format!("Duration set to {}", view.display)
            };
            Ok(Json(ApiResponse::new(message, view)))
        }
        Err(e) => {
            error!("Failed to set duration: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Begin the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start() {
        Ok(view) => {
            info!("Start endpoint called");
            let message = if view.is_active {
                "Countdown running"
            } else {
                "Nothing to count down"
            };
            Ok(Json(ApiResponse::new(message.to_string(), view)))
        }
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /stop - Pause the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.stop() {
        Ok(view) => {
            info!("Stop endpoint called");
            Ok(Json(ApiResponse::new("Countdown stopped".to_string(), view)))
        }
        Err(e) => {
            error!("Failed to stop countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Stop, zero the countdown, and clear the input
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        Ok(view) => {
            info!("Reset endpoint called");
            Ok(Json(ApiResponse::new("Countdown reset".to_string(), view)))
        }
        Err(e) => {
            error!("Failed to reset countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the current countdown and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.view() {
        Ok(v) => v,
        Err(e) => {
            error!("Failed to get timer view: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream a timer view on every countdown or input change
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let timer_rx = state.engine.subscribe();
    let input_rx = state.subscribe_input();

    // first item is the current state, then one per change
    let events = stream::unfold((timer_rx, input_rx, true), move |(mut timer_rx, mut input_rx, first)| {
        let state = Arc::clone(&state);
        async move {
            if !first {
                let closed = tokio::select! {
                    changed = timer_rx.changed() => changed.is_err(),
                    changed = input_rx.changed() => changed.is_err(),
                };
                if closed {
                    return None;
                }
            }

            // both sides are folded into the one view sent below
            let _ = timer_rx.borrow_and_update();
            let _ = input_rx.borrow_and_update();

            match state.view() {
                Ok(view) => Some((
                    Event::default().event("timer").json_data(&view),
                    (timer_rx, input_rx, false),
                )),
                Err(e) => {
                    warn!("Closing event stream: {}", e);
                    None
                }
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
