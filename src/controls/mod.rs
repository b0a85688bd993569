// Control bridge: panel interactions -> external desktop tools.
// Reads fall back to defaults, writes and actions never fail.

mod audio;
mod backlight;
mod command;
mod launcher;
mod media;

pub use audio::{DEFAULT_VOLUME, parse_amixer_percent, parse_wpctl_volume, wpctl_fraction};
pub use backlight::{BacklightError, DEFAULT_BRIGHTNESS, percent_of, read_sysfs_percent};
pub use command::{CommandError, CommandRunner, LaunchOutput};
pub use launcher::SystemAction;
pub use media::MediaAction;

use crate::config::CommandsConfig;
use tokio::time::Duration;

#[derive(Debug, Clone)]
pub struct ControlBridge {
    runner: CommandRunner,
    commands: CommandsConfig,
}

impl ControlBridge {
    pub fn new(commands: CommandsConfig) -> Self {
        let runner = CommandRunner::new(Duration::from_millis(commands.command_timeout_ms));
        Self { runner, commands }
    }

    pub async fn read_volume(&self) -> f64 {
        audio::read_volume(
            &self.runner,
            &self.commands.volume_tool,
            &self.commands.mixer_tool,
        )
        .await
    }

    pub async fn write_volume(&self, percent: u8) {
        audio::write_volume(&self.runner, &self.commands.volume_tool, percent).await
    }

    pub async fn read_brightness(&self) -> f64 {
        backlight::read_brightness(
            &self.runner,
            &self.commands.backlight_dir,
            &self.commands.brightness_tool,
        )
        .await
    }

    pub async fn write_brightness(&self, percent: u8) {
        backlight::write_brightness(&self.runner, &self.commands.brightness_tool, percent).await
    }

    pub async fn current_track(&self) -> String {
        media::current_track(
            &self.runner,
            &self.commands.media_tool,
            &self.commands.no_player_label,
        )
        .await
    }

    /// Returns the track label read back after the action.
    pub async fn media_control(&self, action: MediaAction) -> String {
        media::control(
            &self.runner,
            &self.commands.media_tool,
            &self.commands.no_player_label,
            action,
        )
        .await
    }

    pub async fn launch(&self, action: SystemAction) {
        tracing::debug!(?action, "Launching system action");
        launcher::launch(&self.runner, &self.commands, action).await
    }
}
