// Volume: wpctl for get/set, amixer as the fallback query

use super::command::{CommandError, CommandRunner};
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_SINK: &str = "@DEFAULT_AUDIO_SINK@";
pub const DEFAULT_VOLUME: f64 = 50.0;

static AMIXER_PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)%\]").expect("valid amixer regex"));

/// `wpctl get-volume` prints `Volume: 0.45` (optionally followed by `[MUTED]`).
/// Rounded to whole percent so 0.57 reads back as 57, not 56.999.
pub fn parse_wpctl_volume(output: &str) -> Option<f64> {
    let (_, rest) = output.split_once(':')?;
    let fraction: f64 = rest.split_whitespace().next()?.parse().ok()?;
    fraction.is_finite().then_some((fraction * 100.0).round())
}

/// First `[NN%]` in `amixer get Master` output.
pub fn parse_amixer_percent(output: &str) -> Option<f64> {
    AMIXER_PERCENT
        .captures(output)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(f64::from)
}

/// wpctl takes a fraction: 45 -> "0.45", 100 -> "1".
pub fn wpctl_fraction(percent: u8) -> String {
    format!("{}", f64::from(percent) / 100.0)
}

async fn query(
    runner: &CommandRunner,
    program: &str,
    args: &[&str],
    parse: fn(&str) -> Option<f64>,
) -> Result<f64, CommandError> {
    let out = runner.output(program, args).await?;
    parse(&out).ok_or_else(|| CommandError::Parse {
        program: program.into(),
        output: out,
    })
}

/// Current volume percent; 50 when neither tool answers sensibly.
pub async fn read_volume(runner: &CommandRunner, volume_tool: &str, mixer_tool: &str) -> f64 {
    match query(
        runner,
        volume_tool,
        &["get-volume", DEFAULT_SINK],
        parse_wpctl_volume,
    )
    .await
    {
        Ok(v) => return v,
        Err(e) => tracing::debug!(error = %e, operation = "read_volume", "wpctl query failed"),
    }
    match query(runner, mixer_tool, &["get", "Master"], parse_amixer_percent).await {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, operation = "read_volume", "amixer query failed, using default");
            DEFAULT_VOLUME
        }
    }
}

/// Best effort; failures are logged at debug and dropped.
pub async fn write_volume(runner: &CommandRunner, volume_tool: &str, percent: u8) {
    let fraction = wpctl_fraction(percent);
    if let Err(e) = runner
        .status(volume_tool, &["set-volume", DEFAULT_SINK, fraction.as_str()])
        .await
    {
        tracing::debug!(error = %e, operation = "write_volume", percent, "volume set failed");
    }
}
