// Panel context: owns the DisplayState, the shutdown signal and the control bridge.
// Created once at startup and shared with every timer and route.

use crate::controls::{ControlBridge, MediaAction, SystemAction};
use crate::models::{DisplayState, clamp_percent};
use tokio::sync::watch;

pub struct PanelContext {
    state: watch::Sender<DisplayState>,
    shutdown: watch::Sender<bool>,
    controls: ControlBridge,
}

impl PanelContext {
    pub fn new(controls: ControlBridge) -> Self {
        Self {
            state: watch::Sender::new(DisplayState::default()),
            shutdown: watch::Sender::new(false),
            controls,
        }
    }

    /// Reads the initial volume, brightness and track label from the system.
    pub async fn initialize(&self) {
        let volume = self.controls.read_volume().await;
        let brightness = self.controls.read_brightness().await;
        let track = self.controls.current_track().await;
        tracing::info!(volume, brightness, track = %track, "Panel initialized");
        self.update(|s| {
            s.set_volume(volume);
            s.set_brightness(brightness);
            s.track = track;
        });
    }

    pub fn snapshot(&self) -> DisplayState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }

    /// Applies `f` in place and wakes every subscriber.
    pub fn update(&self, f: impl FnOnce(&mut DisplayState)) {
        self.state.send_modify(f);
    }

    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Cancels every timer watching [`Self::shutdown_signal`].
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// The slider value is shown at once; the mixer call is best effort.
    pub async fn set_volume(&self, percent: f64) -> DisplayState {
        let percent = clamp_percent(percent);
        self.update(|s| s.volume = percent);
        self.controls.write_volume(percent).await;
        self.snapshot()
    }

    pub async fn set_brightness(&self, percent: f64) -> DisplayState {
        let percent = clamp_percent(percent);
        self.update(|s| s.brightness = percent);
        self.controls.write_brightness(percent).await;
        self.snapshot()
    }

    pub async fn media(&self, action: MediaAction) -> DisplayState {
        let track = self.controls.media_control(action).await;
        self.update(|s| s.track = track);
        self.snapshot()
    }

    pub async fn launch(&self, action: SystemAction) {
        self.controls.launch(action).await
    }
}
