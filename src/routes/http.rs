// HTTP handlers: state reads, sliders, media and system buttons

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use super::AppState;
use crate::controls::{MediaAction, SystemAction};
use crate::models::DisplayState;

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Slider position. Fractions of a percent are truncated, out-of-range values clamped.
#[derive(Debug, Deserialize)]
pub(super) struct SliderValue {
    value: f64,
}

/// GET /version: returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/state: everything the panel currently shows.
pub(super) async fn state_handler(State(state): State<AppState>) -> Json<DisplayState> {
    Json(state.panel.snapshot())
}

/// POST /api/volume: always answers with the requested value applied.
pub(super) async fn volume_handler(
    State(state): State<AppState>,
    Json(body): Json<SliderValue>,
) -> Json<DisplayState> {
    Json(state.panel.set_volume(body.value).await)
}

/// POST /api/brightness
pub(super) async fn brightness_handler(
    State(state): State<AppState>,
    Json(body): Json<SliderValue>,
) -> Json<DisplayState> {
    Json(state.panel.set_brightness(body.value).await)
}

/// POST /api/media/{previous|play-pause|next}
pub(super) async fn media_handler(
    State(state): State<AppState>,
    Path(action): Path<String>,
) -> Result<Json<DisplayState>, StatusCode> {
    let action: MediaAction = action.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    Ok(Json(state.panel.media(action).await))
}

/// POST /api/actions/{wifi|notifications|system}
pub(super) async fn action_handler(
    State(state): State<AppState>,
    Path(action): Path<String>,
) -> StatusCode {
    match action.parse::<SystemAction>() {
        Ok(action) => {
            state.panel.launch(action).await;
            StatusCode::ACCEPTED
        }
        Err(_) => StatusCode::NOT_FOUND,
    }
}
