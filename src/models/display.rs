// DisplayState: the single snapshot rendered by the panel

use super::network::NetworkThroughput;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Default track label when the media bridge reports no active player
/// (`commands.no_player_label` overrides it, e.g. "Музыка не играет").
pub const NO_PLAYER_LABEL: &str = "Music is not playing";

/// Everything the panel currently shows. Overwritten in place, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    /// `HH:MM`, 24h.
    pub time: String,
    /// `DD Month YYYY`.
    pub date: String,
    /// CPU utilization in [0, 1].
    pub cpu_fraction: f64,
    /// Memory utilization in [0, 1].
    pub memory_fraction: f64,
    pub network: NetworkThroughput,
    /// Volume percent in [0, 100].
    pub volume: u8,
    /// Brightness percent in [0, 100].
    pub brightness: u8,
    pub track: String,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            time: String::new(),
            date: String::new(),
            cpu_fraction: 0.0,
            memory_fraction: 0.0,
            network: NetworkThroughput::default(),
            volume: 50,
            brightness: 50,
            track: NO_PLAYER_LABEL.into(),
        }
    }
}

impl DisplayState {
    pub fn set_clock<Tz: TimeZone>(&mut self, now: &DateTime<Tz>)
    where
        Tz::Offset: std::fmt::Display,
    {
        self.time = now.format("%H:%M").to_string();
        self.date = now.format("%d %B %Y").to_string();
    }

    /// Takes the library's percentages and stores fractions.
    pub fn set_usage(&mut self, cpu_percent: f64, memory_percent: f64) {
        self.cpu_fraction = clamp_fraction(cpu_percent / 100.0);
        self.memory_fraction = clamp_fraction(memory_percent / 100.0);
    }

    pub fn set_volume(&mut self, percent: f64) {
        self.volume = clamp_percent(percent);
    }

    pub fn set_brightness(&mut self, percent: f64) {
        self.brightness = clamp_percent(percent);
    }
}

/// Truncates toward zero and clamps into [0, 100]. NaN maps to 0.
pub fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0) as u8
}

/// Clamps into [0, 1]. NaN maps to 0.
pub fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
