// Network counters and the throughput derived from two of them

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bytes per MiB; the panel reports throughput in these units.
pub const MIB: f64 = 1024.0 * 1024.0;

/// Cumulative bytes since boot, summed over all interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkThroughput {
    pub send_bytes_per_sec: f64,
    pub recv_bytes_per_sec: f64,
    /// min(8 x (send + recv) MiB/s, ceiling) / ceiling, in [0, 1].
    pub load_fraction: f64,
    pub label: String,
}

impl NetworkThroughput {
    /// Rates from two counter reads `elapsed` apart. Counters that went backwards
    /// (interface reset) count as zero.
    pub fn between(start: NetCounters, end: NetCounters, elapsed: Duration, ceiling: f64) -> Self {
        let secs = elapsed.as_secs_f64();
        let (send, recv) = if secs > 0.0 {
            (
                end.bytes_sent.saturating_sub(start.bytes_sent) as f64 / secs,
                end.bytes_recv.saturating_sub(start.bytes_recv) as f64 / secs,
            )
        } else {
            (0.0, 0.0)
        };
        Self::from_rates(send, recv, ceiling)
    }

    pub fn from_rates(send_bytes_per_sec: f64, recv_bytes_per_sec: f64, ceiling: f64) -> Self {
        let send_mib = send_bytes_per_sec / MIB;
        let recv_mib = recv_bytes_per_sec / MIB;
        Self {
            send_bytes_per_sec,
            recv_bytes_per_sec,
            load_fraction: load_fraction(send_mib + recv_mib, ceiling),
            label: format!("↑ {:.2} MB/s | ↓ {:.2} MB/s", send_mib, recv_mib),
        }
    }
}

fn load_fraction(total_mib_per_sec: f64, ceiling: f64) -> f64 {
    if ceiling <= 0.0 {
        return 0.0;
    }
    super::clamp_fraction((total_mib_per_sec * 8.0).min(ceiling) / ceiling)
}
