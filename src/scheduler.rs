// Polling scheduler: clock tick, metrics tick, and the one-shot network follow-up.
// Each tick touches only its own DisplayState fields.

use crate::config::PollingConfig;
use crate::models::{NetCounters, NetworkThroughput};
use crate::panel::PanelContext;
use crate::sysinfo_repo::MetricsSource;
use crate::timer::{self, Tick, TimerHandle};
use std::sync::Arc;
use tokio::time::Duration;

/// Timer periods and the network load ceiling.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    pub clock_interval: Duration,
    pub metrics_interval: Duration,
    pub network_sample_delay: Duration,
    pub network_load_ceiling: f64,
}

impl From<&PollingConfig> for SchedulerConfig {
    fn from(c: &PollingConfig) -> Self {
        Self {
            clock_interval: Duration::from_millis(c.clock_interval_ms),
            metrics_interval: Duration::from_millis(c.metrics_interval_ms),
            network_sample_delay: Duration::from_millis(c.network_sample_delay_ms),
            network_load_ceiling: c.network_load_ceiling,
        }
    }
}

/// The two repeating timers. One-shot follow-ups are detached and end with
/// their sampling pair or at shutdown.
pub struct Scheduler {
    pub clock: TimerHandle<u64>,
    pub metrics: TimerHandle<u64>,
}

impl Scheduler {
    /// Waits for both repeating timers; returns their fire counts.
    pub async fn join(self) -> (u64, u64) {
        let clock = self.clock.join().await.unwrap_or(0);
        let metrics = self.metrics.join().await.unwrap_or(0);
        tracing::debug!(clock_ticks = clock, metrics_ticks = metrics, "Scheduler stopped");
        (clock, metrics)
    }
}

pub fn spawn<M: MetricsSource>(
    panel: Arc<PanelContext>,
    source: Arc<M>,
    config: SchedulerConfig,
) -> Scheduler {
    let clock = {
        let panel = panel.clone();
        timer::repeating(config.clock_interval, panel.shutdown_signal(), move || {
            let panel = panel.clone();
            async move {
                panel.update(|s| s.set_clock(&chrono::Local::now()));
                Tick::Continue
            }
        })
    };

    let metrics = timer::repeating(config.metrics_interval, panel.shutdown_signal(), move || {
        metrics_tick(panel.clone(), source.clone(), config)
    });

    Scheduler { clock, metrics }
}

/// CPU/RAM update plus the first half of a network sampling pair. A metrics
/// read failure stops this timer; the clock keeps running.
async fn metrics_tick<M: MetricsSource>(
    panel: Arc<PanelContext>,
    source: Arc<M>,
    config: SchedulerConfig,
) -> Tick {
    let cpu = match source.cpu_usage().await {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, operation = "cpu_usage", "CPU read failed, metrics timer stopped");
            return Tick::Stop;
        }
    };
    let memory = match source.memory_usage().await {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, operation = "memory_usage", "Memory read failed, metrics timer stopped");
            return Tick::Stop;
        }
    };
    panel.update(|s| s.set_usage(cpu, memory));

    let start = match source.net_counters().await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, operation = "net_counters", "Network read failed, metrics timer stopped");
            return Tick::Stop;
        }
    };
    let _ = arm_network_sample(panel, source, start, config);
    Tick::Continue
}

/// Second half of a sampling pair: re-read the counters after the delay and
/// publish the rates. Fires once.
fn arm_network_sample<M: MetricsSource>(
    panel: Arc<PanelContext>,
    source: Arc<M>,
    start: NetCounters,
    config: SchedulerConfig,
) -> TimerHandle<bool> {
    let shutdown = panel.shutdown_signal();
    timer::once(config.network_sample_delay, shutdown, move || async move {
        match source.net_counters().await {
            Ok(end) => {
                let throughput = NetworkThroughput::between(
                    start,
                    end,
                    config.network_sample_delay,
                    config.network_load_ceiling,
                );
                tracing::trace!(label = %throughput.label, "Network sampled");
                panel.update(|s| s.network = throughput);
            }
            Err(e) => {
                tracing::error!(error = %e, operation = "net_counters", "Network follow-up read failed");
            }
        }
    })
}
