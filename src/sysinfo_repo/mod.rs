// CPU, memory and network counters via sysinfo

use crate::models::NetCounters;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use sysinfo::{Networks, System};
use tracing::instrument;

/// Point-in-time metrics the scheduler polls. Implemented by [`SysinfoRepo`];
/// tests substitute scripted values.
pub trait MetricsSource: Send + Sync + 'static {
    /// Global CPU utilization, percent.
    fn cpu_usage(&self) -> impl Future<Output = anyhow::Result<f64>> + Send;
    /// Used (total - available) memory, percent.
    fn memory_usage(&self) -> impl Future<Output = anyhow::Result<f64>> + Send;
    /// Cumulative bytes since boot, all interfaces.
    fn net_counters(&self) -> impl Future<Output = anyhow::Result<NetCounters>> + Send;
}

pub struct SysinfoRepo {
    sys: Arc<Mutex<System>>,
    networks: Arc<Mutex<Networks>>,
    last_cpu_refresh: Arc<Mutex<Option<(Instant, f64)>>>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        let networks = Networks::new_with_refreshed_list();
        Self {
            sys: Arc::new(Mutex::new(sys)),
            networks: Arc::new(Mutex::new(networks)),
            last_cpu_refresh: Arc::new(Mutex::new(None)),
        }
    }

    /// Usage since the previous refresh. Calls closer together than sysinfo's
    /// minimum update interval return the cached value instead of blocking.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_cpu_usage"))]
    pub async fn get_cpu_usage(&self) -> anyhow::Result<f64> {
        let sys = self.sys.clone();
        let last_cpu_refresh = self.last_cpu_refresh.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            let mut last = last_cpu_refresh
                .lock()
                .map_err(|e| anyhow::anyhow!("cpu cache lock poisoned: {}", e))?;

            let now = Instant::now();
            let cached = *last;
            let usage = match cached {
                Some((prev_ts, prev_usage))
                    if now.duration_since(prev_ts) < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL =>
                {
                    prev_usage
                }
                _ => {
                    sys.refresh_cpu_usage();
                    let usage = sys.global_cpu_usage() as f64;
                    *last = Some((now, usage));
                    usage
                }
            };
            Ok(usage.clamp(0.0, 100.0))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_memory_usage"))]
    pub async fn get_memory_usage(&self) -> anyhow::Result<f64> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();

            let total = sys.total_memory();
            let used = total.saturating_sub(sys.available_memory());
            Ok(if total > 0 {
                (used as f64 / total as f64) * 100.0
            } else {
                0.0
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_net_counters"))]
    pub async fn get_net_counters(&self) -> anyhow::Result<NetCounters> {
        let networks = self.networks.clone();
        tokio::task::spawn_blocking(move || {
            let mut networks = networks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo networks lock poisoned: {}", e))?;
            networks.refresh(true);
            Ok(networks
                .list()
                .values()
                .fold(NetCounters::default(), |acc, data| NetCounters {
                    bytes_sent: acc.bytes_sent.saturating_add(data.total_transmitted()),
                    bytes_recv: acc.bytes_recv.saturating_add(data.total_received()),
                }))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}

impl MetricsSource for SysinfoRepo {
    async fn cpu_usage(&self) -> anyhow::Result<f64> {
        self.get_cpu_usage().await
    }

    async fn memory_usage(&self) -> anyhow::Result<f64> {
        self.get_memory_usage().await
    }

    async fn net_counters(&self) -> anyhow::Result<NetCounters> {
        self.get_net_counters().await
    }
}
