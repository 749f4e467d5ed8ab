//! The devops workload: CPU telemetry from a fleet of hosts.

use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::go_rand::GoRand;
use crate::interval::{GoDuration, TimeInterval};

/// Window of the double group-by queries.
pub const DOUBLE_GROUP_BY_DURATION: Duration = Duration::from_secs(12 * 3600);

/// Window of the high-CPU queries.
pub const HIGH_CPU_DURATION: Duration = Duration::from_secs(12 * 3600);

/// Window of the max-all queries.
pub const MAX_ALL_DURATION: Duration = Duration::from_secs(8 * 3600);

const HOST_TAG: &str = "host";

/// Fields of the `cpu` measurement, in catalog order.
pub const CPU_METRICS: [&str; 10] = [
    "usage_user",
    "usage_system",
    "usage_idle",
    "usage_nice",
    "usage_iowait",
    "usage_irq",
    "usage_softirq",
    "usage_steal",
    "usage_guest",
    "usage_guest_nice",
];

/// The first `n` CPU metrics.
pub fn get_cpu_metrics_slice(n: usize) -> Result<&'static [&'static str]> {
    match n {
        0 => Err(Error::NoMetrics),
        n if n > CPU_METRICS.len() => Err(Error::TooManyMetrics),
        n => Ok(&CPU_METRICS[..n]),
    }
}

pub fn get_all_cpu_metrics() -> &'static [&'static str] {
    &CPU_METRICS
}

pub const fn get_cpu_metrics_len() -> usize {
    CPU_METRICS.len()
}

pub fn get_double_group_by_label(db_name: &str, num_metrics: usize) -> String {
    format!(
        "{db_name} mean of {num_metrics} metrics, all hosts, random {} by 1h",
        GoDuration(DOUBLE_GROUP_BY_DURATION)
    )
}

/// The label names [`MAX_ALL_DURATION`] whatever window the query actually spans.
pub fn get_max_all_label(db_name: &str, n_hosts: usize) -> String {
    format!(
        "{db_name} max of all CPU metrics, random {n_hosts:4} hosts, random {} by 1h",
        GoDuration(MAX_ALL_DURATION)
    )
}

pub fn get_high_cpu_label(db_name: &str, n_hosts: usize) -> String {
    match n_hosts {
        0 => format!("{db_name} CPU over threshold, all hosts"),
        n => format!("{db_name} CPU over threshold, {n} host(s)"),
    }
}

/// Shared state of a devops generator.
#[derive(Debug)]
pub struct Core {
    interval: TimeInterval,
    scale: usize,
    rng: GoRand,
}

impl Core {
    pub fn new(interval: TimeInterval, scale: usize, rng: GoRand) -> Result<Self> {
        if scale < 1 {
            return Err(Error::InvalidScale);
        }
        debug!(%scale, start = %interval.start_string(), end = %interval.end_string(), "devops core ready");
        Ok(Self {
            interval,
            scale,
            rng,
        })
    }

    /// A random window of `window` inside the simulation interval.
    pub fn rand_window(&mut self, window: Duration) -> Result<TimeInterval> {
        self.interval.rand_window(&mut self.rng, window)
    }

    /// `n` distinct host names, in draw order.
    pub fn get_random_hosts(&mut self, n: usize) -> Result<Vec<String>> {
        super::random_tags(&mut self.rng, HOST_TAG, n, self.scale)
    }
}
