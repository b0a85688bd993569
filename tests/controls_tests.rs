// Control bridge: fallbacks and tool output handling

mod common;

use common::{MISSING_TOOL, test_panel, unavailable_commands};
use syspanel::config::CommandsConfig;
use syspanel::controls::{ControlBridge, MediaAction};
use syspanel::models::NO_PLAYER_LABEL;

#[tokio::test]
async fn initialize_uses_defaults_when_everything_is_unavailable() {
    let panel = test_panel();
    panel.update(|s| {
        s.volume = 3;
        s.brightness = 4;
        s.track = String::new();
    });
    panel.initialize().await;
    let state = panel.snapshot();
    assert_eq!(state.volume, 50);
    assert_eq!(state.brightness, 50);
    assert_eq!(state.track, NO_PLAYER_LABEL);
}

#[tokio::test]
async fn volume_defaults_to_fifty_without_mixer() {
    let bridge = ControlBridge::new(unavailable_commands());
    assert_eq!(bridge.read_volume().await, 50.0);
}

#[tokio::test]
async fn brightness_defaults_to_fifty_without_backlight() {
    let bridge = ControlBridge::new(unavailable_commands());
    assert_eq!(bridge.read_brightness().await, 50.0);
}

#[tokio::test]
async fn brightness_reads_backlight_files() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("brightness"), "30\n").unwrap();
    std::fs::write(dir.path().join("max_brightness"), "120\n").unwrap();
    let bridge = ControlBridge::new(CommandsConfig {
        backlight_dir: dir.path().to_path_buf(),
        ..unavailable_commands()
    });
    assert_eq!(bridge.read_brightness().await, 25.0);
}

#[tokio::test]
async fn brightness_zero_max_falls_back_to_default() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("brightness"), "30").unwrap();
    std::fs::write(dir.path().join("max_brightness"), "0").unwrap();
    let bridge = ControlBridge::new(CommandsConfig {
        backlight_dir: dir.path().to_path_buf(),
        ..unavailable_commands()
    });
    assert_eq!(bridge.read_brightness().await, 50.0);
}

#[tokio::test]
async fn media_without_player_reads_placeholder() {
    let bridge = ControlBridge::new(unavailable_commands());
    assert_eq!(bridge.current_track().await, NO_PLAYER_LABEL);
    assert_eq!(
        bridge.media_control(MediaAction::PlayPause).await,
        NO_PLAYER_LABEL
    );
}

#[tokio::test]
async fn media_missing_tool_reads_placeholder() {
    let bridge = ControlBridge::new(CommandsConfig {
        media_tool: MISSING_TOOL.into(),
        ..unavailable_commands()
    });
    assert_eq!(bridge.current_track().await, NO_PLAYER_LABEL);
}

#[tokio::test]
async fn media_placeholder_is_configurable() {
    let bridge = ControlBridge::new(CommandsConfig {
        no_player_label: "Музыка не играет".into(),
        ..unavailable_commands()
    });
    assert_eq!(bridge.current_track().await, "Музыка не играет");
    assert_eq!(
        bridge.media_control(MediaAction::Next).await,
        "Музыка не играет"
    );
}

#[tokio::test]
async fn writes_never_fail_when_tools_are_missing() {
    let bridge = ControlBridge::new(unavailable_commands());
    bridge.write_volume(80).await;
    bridge.write_brightness(10).await;
}

#[cfg(unix)]
mod with_scripts {
    use super::*;
    use common::write_script;

    #[tokio::test]
    async fn volume_reads_wpctl_fraction() {
        let dir = tempfile::TempDir::new().unwrap();
        let wpctl = write_script(dir.path(), "wpctl", "echo 'Volume: 0.37'");
        let bridge = ControlBridge::new(CommandsConfig {
            volume_tool: wpctl.to_string_lossy().into_owned(),
            ..unavailable_commands()
        });
        assert!((bridge.read_volume().await - 37.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn initialize_shows_tool_percentages_without_off_by_one() {
        let dir = tempfile::TempDir::new().unwrap();
        let wpctl = write_script(dir.path(), "wpctl", "echo 'Volume: 0.57'");
        let backlight = dir.path().join("backlight");
        std::fs::create_dir(&backlight).unwrap();
        std::fs::write(backlight.join("brightness"), "29\n").unwrap();
        std::fs::write(backlight.join("max_brightness"), "100\n").unwrap();
        let panel = syspanel::panel::PanelContext::new(ControlBridge::new(CommandsConfig {
            volume_tool: wpctl.to_string_lossy().into_owned(),
            backlight_dir: backlight,
            ..unavailable_commands()
        }));
        panel.initialize().await;
        let state = panel.snapshot();
        assert_eq!(state.volume, 57);
        assert_eq!(state.brightness, 29);
    }

    #[tokio::test]
    async fn volume_falls_back_to_amixer_percent() {
        let dir = tempfile::TempDir::new().unwrap();
        let amixer = write_script(
            dir.path(),
            "amixer",
            "echo \"Simple mixer control 'Master',0\"; echo '  Mono: Playback 41 [64%] [on]'",
        );
        let bridge = ControlBridge::new(CommandsConfig {
            mixer_tool: amixer.to_string_lossy().into_owned(),
            ..unavailable_commands()
        });
        assert_eq!(bridge.read_volume().await, 64.0);
    }

    #[tokio::test]
    async fn volume_unparseable_output_defaults_to_fifty() {
        let dir = tempfile::TempDir::new().unwrap();
        let wpctl = write_script(dir.path(), "wpctl", "echo 'no default sink'");
        let bridge = ControlBridge::new(CommandsConfig {
            volume_tool: wpctl.to_string_lossy().into_owned(),
            ..unavailable_commands()
        });
        assert_eq!(bridge.read_volume().await, 50.0);
    }

    #[tokio::test]
    async fn brightness_falls_back_to_brightnessctl() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = write_script(
            dir.path(),
            "brightnessctl",
            "case \"$1\" in g) echo 750;; m) echo 1000;; esac",
        );
        let bridge = ControlBridge::new(CommandsConfig {
            brightness_tool: tool.to_string_lossy().into_owned(),
            ..unavailable_commands()
        });
        assert_eq!(bridge.read_brightness().await, 75.0);
    }

    #[tokio::test]
    async fn media_joins_artist_and_title() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = write_script(
            dir.path(),
            "playerctl",
            "case \"$2\" in artist) echo 'Daft Punk';; title) echo 'Veridis Quo';; esac",
        );
        let bridge = ControlBridge::new(CommandsConfig {
            media_tool: tool.to_string_lossy().into_owned(),
            ..unavailable_commands()
        });
        assert_eq!(bridge.current_track().await, "Daft Punk - Veridis Quo");
        assert_eq!(
            bridge.media_control(MediaAction::Next).await,
            "Daft Punk - Veridis Quo"
        );
    }

    #[tokio::test]
    async fn volume_write_passes_fraction_to_wpctl() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = dir.path().join("calls.log");
        let wpctl = write_script(
            dir.path(),
            "wpctl",
            &format!("echo \"$@\" >> '{}'", log.display()),
        );
        let bridge = ControlBridge::new(CommandsConfig {
            volume_tool: wpctl.to_string_lossy().into_owned(),
            ..unavailable_commands()
        });
        bridge.write_volume(45).await;
        let calls = std::fs::read_to_string(&log).unwrap();
        assert_eq!(calls.trim(), "set-volume @DEFAULT_AUDIO_SINK@ 0.45");
    }

    #[tokio::test]
    async fn brightness_write_passes_percent_suffix() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = dir.path().join("calls.log");
        let tool = write_script(
            dir.path(),
            "brightnessctl",
            &format!("echo \"$@\" >> '{}'", log.display()),
        );
        let bridge = ControlBridge::new(CommandsConfig {
            brightness_tool: tool.to_string_lossy().into_owned(),
            ..unavailable_commands()
        });
        bridge.write_brightness(30).await;
        let calls = std::fs::read_to_string(&log).unwrap();
        assert_eq!(calls.trim(), "s 30%");
    }
}
