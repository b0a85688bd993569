// Shared test helpers
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use syspanel::config::{AppConfig, CommandsConfig};
use syspanel::controls::ControlBridge;
use syspanel::models::{NO_PLAYER_LABEL, NetCounters};
use syspanel::panel::PanelContext;
use syspanel::sysinfo_repo::MetricsSource;

pub const MISSING_TOOL: &str = "/nonexistent/syspanel-test-tool";

/// Commands that all fail: missing binaries, missing backlight, `false` as media tool.
pub fn unavailable_commands() -> CommandsConfig {
    CommandsConfig {
        command_timeout_ms: 2000,
        media_tool: "false".into(),
        no_player_label: NO_PLAYER_LABEL.into(),
        volume_tool: MISSING_TOOL.into(),
        mixer_tool: MISSING_TOOL.into(),
        brightness_tool: MISSING_TOOL.into(),
        backlight_dir: PathBuf::from("/nonexistent/backlight"),
        wifi_tool: MISSING_TOOL.into(),
        notifications_tool: MISSING_TOOL.into(),
        system_script: PathBuf::from("/nonexistent/system.sh"),
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        commands: unavailable_commands(),
        ..AppConfig::default()
    }
}

pub fn test_panel() -> Arc<PanelContext> {
    Arc::new(PanelContext::new(ControlBridge::new(unavailable_commands())))
}

/// Writes an executable shell script into `dir`.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Scripted metrics: fixed CPU/RAM, counters that grow by a fixed step per read.
pub struct FakeMetrics {
    pub cpu: f64,
    pub memory: f64,
    pub sent_step: u64,
    pub recv_step: u64,
    pub fail_cpu: AtomicBool,
    /// Fails the second counter read of every sampling pair.
    pub fail_net_follow_up: AtomicBool,
    pub cpu_reads: AtomicU64,
    pub net_reads: AtomicU64,
}

impl FakeMetrics {
    pub fn new(cpu: f64, memory: f64, sent_step: u64, recv_step: u64) -> Self {
        Self {
            cpu,
            memory,
            sent_step,
            recv_step,
            fail_cpu: AtomicBool::new(false),
            fail_net_follow_up: AtomicBool::new(false),
            cpu_reads: AtomicU64::new(0),
            net_reads: AtomicU64::new(0),
        }
    }

    pub fn cpu_reads(&self) -> u64 {
        self.cpu_reads.load(Ordering::SeqCst)
    }

    pub fn net_reads(&self) -> u64 {
        self.net_reads.load(Ordering::SeqCst)
    }
}

impl MetricsSource for FakeMetrics {
    async fn cpu_usage(&self) -> anyhow::Result<f64> {
        self.cpu_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_cpu.load(Ordering::SeqCst) {
            anyhow::bail!("cpu counters unavailable");
        }
        Ok(self.cpu)
    }

    async fn memory_usage(&self) -> anyhow::Result<f64> {
        Ok(self.memory)
    }

    async fn net_counters(&self) -> anyhow::Result<NetCounters> {
        let n = self.net_reads.fetch_add(1, Ordering::SeqCst) + 1;
        if n % 2 == 0 && self.fail_net_follow_up.load(Ordering::SeqCst) {
            anyhow::bail!("network counters unavailable");
        }
        Ok(NetCounters {
            bytes_sent: n * self.sent_step,
            bytes_recv: n * self.recv_step,
        })
    }
}
