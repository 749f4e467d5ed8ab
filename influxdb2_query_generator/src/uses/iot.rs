//! The IoT workload: position and diagnostics readings from a fleet of trucks.

use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::go_rand::{GoRand, GoRngExt};
use crate::interval::TimeInterval;

/// Window of the stationary-trucks query.
pub const STATIONARY_DURATION: Duration = Duration::from_secs(10 * 60);

/// Window of the long-driving-sessions query.
pub const LONG_DRIVING_SESSION_DURATION: Duration = Duration::from_secs(4 * 3600);

/// Window of the long-daily-sessions query.
pub const DAILY_DRIVING_DURATION: Duration = Duration::from_secs(24 * 3600);

const TRUCK_TAG: &str = "truck";

/// Fleets a truck can belong to.
pub const FLEET_CHOICES: [&str; 4] = ["East", "West", "North", "South"];

/// Shared state of an IoT generator.
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
        debug!(%scale, start = %interval.start_string(), end = %interval.end_string(), "iot core ready");
        Ok(Self {
            interval,
            scale,
            rng,
        })
    }

    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    pub fn rand_window(&mut self, window: Duration) -> Result<TimeInterval> {
        self.interval.rand_window(&mut self.rng, window)
    }

    /// `n` distinct truck names, in draw order.
    pub fn get_random_trucks(&mut self, n: usize) -> Result<Vec<String>> {
        super::random_tags(&mut self.rng, TRUCK_TAG, n, self.scale)
    }

    pub fn get_random_fleet(&mut self) -> &'static str {
        FLEET_CHOICES[self.rng.intn(FLEET_CHOICES.len())]
    }
}
