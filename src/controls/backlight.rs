// Brightness: sysfs backlight files, brightnessctl as fallback and for writes

use super::command::CommandRunner;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BRIGHTNESS: f64 = 50.0;

#[derive(Debug, Error)]
pub enum BacklightError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} does not hold an integer: {value:?}")]
    Parse { path: PathBuf, value: String },
    #[error("maximum brightness is zero")]
    ZeroMax,
}

fn read_level(path: PathBuf) -> Result<u64, BacklightError> {
    let raw = std::fs::read_to_string(&path).map_err(|source| BacklightError::Io {
        path: path.clone(),
        source,
    })?;
    let value = raw.trim();
    value.parse().map_err(|_| BacklightError::Parse {
        path,
        value: value.to_string(),
    })
}

/// current x 100 / maximum, rounded to whole percent and clamped to [0, 100].
pub fn percent_of(current: u64, maximum: u64) -> Result<f64, BacklightError> {
    if maximum == 0 {
        return Err(BacklightError::ZeroMax);
    }
    Ok((current as f64 * 100.0 / maximum as f64).round().clamp(0.0, 100.0))
}

/// Reads `brightness` and `max_brightness` from a backlight class directory.
pub fn read_sysfs_percent(dir: &Path) -> Result<f64, BacklightError> {
    let current = read_level(dir.join("brightness"))?;
    let maximum = read_level(dir.join("max_brightness"))?;
    percent_of(current, maximum)
}

async fn read_tool_percent(runner: &CommandRunner, tool: &str) -> anyhow::Result<f64> {
    let current: u64 = runner.output(tool, &["g"]).await?.parse()?;
    let maximum: u64 = runner.output(tool, &["m"]).await?.parse()?;
    Ok(percent_of(current, maximum)?)
}

/// Current brightness percent; 50 when neither source is usable.
pub async fn read_brightness(runner: &CommandRunner, dir: &Path, tool: &str) -> f64 {
    match read_sysfs_percent(dir) {
        Ok(v) => return v,
        Err(e) => tracing::debug!(error = %e, operation = "read_brightness", "sysfs backlight unreadable"),
    }
    match read_tool_percent(runner, tool).await {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, operation = "read_brightness", "brightnessctl query failed, using default");
            DEFAULT_BRIGHTNESS
        }
    }
}

/// Best effort; failures are logged at debug and dropped.
pub async fn write_brightness(runner: &CommandRunner, tool: &str, percent: u8) {
    let arg = format!("{}%", percent);
    if let Err(e) = runner.status(tool, &["s", arg.as_str()]).await {
        tracing::debug!(error = %e, operation = "write_brightness", percent, "brightness set failed");
    }
}
