// Media strip: playerctl metadata and transport actions

use super::command::{CommandError, CommandRunner};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAction {
    Previous,
    PlayPause,
    Next,
}

impl MediaAction {
    pub fn as_arg(self) -> &'static str {
        match self {
            MediaAction::Previous => "previous",
            MediaAction::PlayPause => "play-pause",
            MediaAction::Next => "next",
        }
    }
}

impl FromStr for MediaAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "previous" => Ok(MediaAction::Previous),
            "play-pause" => Ok(MediaAction::PlayPause),
            "next" => Ok(MediaAction::Next),
            other => Err(format!("unknown media action: {}", other)),
        }
    }
}

async fn track_label(runner: &CommandRunner, tool: &str) -> Result<String, CommandError> {
    let artist = runner.output(tool, &["metadata", "artist"]).await?;
    let title = runner.output(tool, &["metadata", "title"]).await?;
    Ok(format!("{} - {}", artist, title))
}

/// "artist - title", or the placeholder when no player answers.
pub async fn current_track(runner: &CommandRunner, tool: &str, placeholder: &str) -> String {
    track_label(runner, tool).await.unwrap_or_else(|e| {
        tracing::debug!(error = %e, operation = "current_track", "no active player");
        placeholder.to_string()
    })
}

/// Sends the action, then re-reads the track label.
pub async fn control(
    runner: &CommandRunner,
    tool: &str,
    placeholder: &str,
    action: MediaAction,
) -> String {
    if let Err(e) = runner.status(tool, &[action.as_arg()]).await {
        tracing::debug!(error = %e, operation = "media_control", action = action.as_arg(), "media action failed");
    }
    current_track(runner, tool, placeholder).await
}
