use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8090,
            host: "127.0.0.1".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Clock/date refresh period.
    pub clock_interval_ms: u64,
    /// CPU/RAM refresh period; each tick also arms one network follow-up.
    pub metrics_interval_ms: u64,
    /// Delay between the two network counter reads of one sampling pair.
    pub network_sample_delay_ms: u64,
    /// Load bar ceiling, compared against 8 x (send + recv) in MiB/s.
    pub network_load_ceiling: f64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            clock_interval_ms: 1000,
            metrics_interval_ms: 2000,
            network_sample_delay_ms: 1000,
            network_load_ceiling: 100.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Upper bound for any external tool call.
    pub command_timeout_ms: u64,
    pub media_tool: String,
    /// Track label when no player is active.
    pub no_player_label: String,
    pub volume_tool: String,
    pub mixer_tool: String,
    pub brightness_tool: String,
    pub backlight_dir: PathBuf,
    pub wifi_tool: String,
    pub notifications_tool: String,
    pub system_script: PathBuf,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        Self {
            command_timeout_ms: 5000,
            media_tool: "playerctl".into(),
            no_player_label: crate::models::NO_PLAYER_LABEL.into(),
            volume_tool: "wpctl".into(),
            mixer_tool: "amixer".into(),
            brightness_tool: "brightnessctl".into(),
            backlight_dir: PathBuf::from("/sys/class/backlight/intel_backlight"),
            wifi_tool: "nm-connection-editor".into(),
            notifications_tool: "swaync-client".into(),
            system_script: PathBuf::from(home).join(".config/syspanel/system.sh"),
        }
    }
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (default `config.toml`). A missing file means defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path, "No config file, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(anyhow::anyhow!("reading {}: {}", path, e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.polling.clock_interval_ms > 0,
            "polling.clock_interval_ms must be > 0, got {}",
            self.polling.clock_interval_ms
        );
        anyhow::ensure!(
            self.polling.metrics_interval_ms > 0,
            "polling.metrics_interval_ms must be > 0, got {}",
            self.polling.metrics_interval_ms
        );
        anyhow::ensure!(
            self.polling.network_sample_delay_ms > 0,
            "polling.network_sample_delay_ms must be > 0, got {}",
            self.polling.network_sample_delay_ms
        );
        anyhow::ensure!(
            self.polling.network_load_ceiling > 0.0,
            "polling.network_load_ceiling must be > 0, got {}",
            self.polling.network_load_ceiling
        );
        anyhow::ensure!(
            self.commands.command_timeout_ms > 0,
            "commands.command_timeout_ms must be > 0, got {}",
            self.commands.command_timeout_ms
        );
        for (key, value) in [
            ("commands.media_tool", &self.commands.media_tool),
            ("commands.no_player_label", &self.commands.no_player_label),
            ("commands.volume_tool", &self.commands.volume_tool),
            ("commands.mixer_tool", &self.commands.mixer_tool),
            ("commands.brightness_tool", &self.commands.brightness_tool),
            ("commands.wifi_tool", &self.commands.wifi_tool),
            ("commands.notifications_tool", &self.commands.notifications_tool),
        ] {
            anyhow::ensure!(!value.is_empty(), "{} must be non-empty", key);
        }
        Ok(())
    }
}
