//! Command line and environment configuration of a query generation run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::generator::{self, GeneratorParams};
use crate::interval::TimeInterval;
use crate::query_types::{self, QueryType};
use crate::uses::UseCase;

/// Which queries to generate, against which simulated data set.
#[derive(Debug, Clone, clap::Parser)]
pub struct GeneratorConfig {
    /// Target database format
    #[clap(
        long = "format",
        env = "INFLUX2_QUERY_GEN_FORMAT",
        default_value = "influx_2",
        action
    )]
    pub format: String,

    /// Workload family the data set was generated for
    #[clap(
        long = "use-case",
        env = "INFLUX2_QUERY_GEN_USE_CASE",
        value_enum,
        default_value = "devops",
        action
    )]
    pub use_case: UseCase,

    /// Query type to generate, see the `query-types` command
    #[clap(long = "query-type", env = "INFLUX2_QUERY_GEN_QUERY_TYPE", action)]
    pub query_type: String,

    /// Number of hosts (devops) or trucks (iot) in the data set
    #[clap(
        long = "scale",
        env = "INFLUX2_QUERY_GEN_SCALE",
        default_value = "1",
        action
    )]
    pub scale: usize,

    /// Seed of the random source. Zero picks one from the wall clock.
    #[clap(
        long = "seed",
        env = "INFLUX2_QUERY_GEN_SEED",
        default_value = "0",
        allow_negative_numbers = true,
        action
    )]
    pub seed: i64,

    /// Beginning of the simulated data set (RFC3339)
    #[clap(
        long = "timestamp-start",
        env = "INFLUX2_QUERY_GEN_TIMESTAMP_START",
        default_value = "2016-01-01T00:00:00Z",
        action
    )]
    pub timestamp_start: humantime::Timestamp,

    /// End of the simulated data set (RFC3339)
    #[clap(
        long = "timestamp-end",
        env = "INFLUX2_QUERY_GEN_TIMESTAMP_END",
        default_value = "2016-01-02T06:00:00Z",
        action
    )]
    pub timestamp_end: humantime::Timestamp,

    /// Number of queries to generate
    #[clap(
        long = "queries",
        env = "INFLUX2_QUERY_GEN_QUERIES",
        default_value = "1000",
        action
    )]
    pub queries: u64,

    /// Write queries to this file instead of stdout
    #[clap(long = "file", env = "INFLUX2_QUERY_GEN_FILE", action)]
    pub file: Option<PathBuf>,
}

impl GeneratorConfig {
    /// The simulated time range.
    pub fn interval(&self) -> Result<TimeInterval> {
        let start = DateTime::<Utc>::from(*self.timestamp_start);
        let end = DateTime::<Utc>::from(*self.timestamp_end);
        TimeInterval::new(start, end)
    }

    /// The selected query type, which must belong to the selected use case.
    pub fn query_type(&self) -> Result<&'static QueryType> {
        let query_type = query_types::find(&self.query_type)?;
        query_type.check_use_case(self.use_case)?;
        Ok(query_type)
    }

    /// The configured seed, or one derived from the current time when zero.
    pub fn effective_seed(&self) -> i64 {
        match self.seed {
            0 => Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX),
            seed => seed,
        }
    }

    /// Check everything that can be checked before any query is generated.
    pub fn validate(&self) -> Result<()> {
        if self.scale < 1 {
            return Err(Error::InvalidScale);
        }
        if self.queries < 1 {
            return Err(Error::NoQueries);
        }
        self.interval()?;
        self.query_type()?;
        generator::factory(&self.format, self.use_case)?;
        Ok(())
    }

    /// Generator parameters for a run seeded with `seed`.
    pub fn params(&self, seed: i64) -> Result<GeneratorParams> {
        Ok(GeneratorParams {
            interval: self.interval()?,
            scale: self.scale,
            seed,
        })
    }
}
