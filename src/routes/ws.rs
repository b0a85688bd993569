// WebSocket stream of DisplayState changes

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use tokio::sync::watch;
use tokio::time::{Duration, timeout};

use super::AppState;
use crate::models::DisplayState;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

pub(super) async fn ws_panel(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let rx = state.panel.subscribe();
    ws.on_upgrade(move |socket| async move {
        if let Err(e) = stream_panel(socket, rx).await {
            tracing::info!("Panel stream error: {}", e);
        }
    })
}

async fn send_text(socket: &mut WebSocket, json: String) -> bool {
    let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Text(json.into()))).await;
    matches!(r, Ok(Ok(())))
}

/// Sends the current state, then one message per change. Changes that land
/// between two sends are coalesced into the latest state.
async fn stream_panel(
    mut socket: WebSocket,
    mut rx: watch::Receiver<DisplayState>,
) -> anyhow::Result<()> {
    tracing::info!("Client connected to panel stream");

    let current = serde_json::to_string(&*rx.borrow_and_update())?;
    if !send_text(&mut socket, current).await {
        return Ok(());
    }

    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            result = rx.changed() => {
                if result.is_err() {
                    break;
                }
                let json = serde_json::to_string(&*rx.borrow_and_update())?;
                if !send_text(&mut socket, json).await {
                    break;
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await;
                if !matches!(r, Ok(Ok(()))) {
                    break;
                }
            }
        }
    }
    tracing::debug!("Panel stream closed");
    Ok(())
}
