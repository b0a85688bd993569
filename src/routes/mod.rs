// HTTP + WebSocket routes: the panel's display and input surface

mod http;
mod ws;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::panel::PanelContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) panel: Arc<PanelContext>,
}

pub fn app(panel: Arc<PanelContext>) -> Router {
    let state = AppState { panel };
    Router::new()
        .route("/", get(|| async { "syspanel is running" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/state", get(http::state_handler)) // GET /api/state
        .route("/api/volume", post(http::volume_handler)) // POST /api/volume
        .route("/api/brightness", post(http::brightness_handler)) // POST /api/brightness
        .route("/api/media/{action}", post(http::media_handler)) // POST /api/media/:action
        .route("/api/actions/{action}", post(http::action_handler)) // POST /api/actions/:action
        .route("/ws/panel", get(ws::ws_panel)) // WS /ws/panel
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
