// System buttons: fire-and-forget launches

use super::command::{CommandRunner, LaunchOutput};
use crate::config::CommandsConfig;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemAction {
    /// Network connection editor.
    Wifi,
    /// Toggle the notification center.
    Notifications,
    /// User script with power/session actions.
    System,
}

impl FromStr for SystemAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wifi" => Ok(SystemAction::Wifi),
            "notifications" => Ok(SystemAction::Notifications),
            "system" => Ok(SystemAction::System),
            other => Err(format!("unknown system action: {}", other)),
        }
    }
}

pub async fn launch(runner: &CommandRunner, commands: &CommandsConfig, action: SystemAction) {
    match action {
        SystemAction::Wifi => {
            let _ = runner.launch(&commands.wifi_tool, &[], LaunchOutput::Quiet);
        }
        SystemAction::Notifications => {
            let _ = runner
                .status(&commands.notifications_tool, &["-t", "-sw"])
                .await;
        }
        SystemAction::System => {
            let script = commands.system_script.to_string_lossy();
            if let Err(e) = runner.launch("bash", &[&*script], LaunchOutput::Piped) {
                tracing::warn!(error = %e, operation = "system_action", "system action launch failed");
            }
        }
    }
}
