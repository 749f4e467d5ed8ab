//! Capabilities a backend implements per use case, and the registry that maps a
//! `(format, use case)` pair to the backend's factory.

use std::fmt::Debug;
use std::time::Duration;

use tracing::info;

use crate::error::{Error, Result};
use crate::flux;
use crate::go_rand::GoRand;
use crate::interval::TimeInterval;
use crate::query::Query;
use crate::uses::UseCase;

/// Allocates the empty records a backend fills in.
pub trait QueryGenerator: Debug + Send {
    fn generate_empty_query(&self) -> Query;
}

/// Every devops query type. Each call fills `q` in exactly once, or leaves it untouched and
/// returns an error.
pub trait DevopsGenerator: QueryGenerator {
    /// Max per minute of the first `num_metrics` CPU metrics over a random `time_range` window
    /// for `n_hosts` random hosts.
    fn group_by_time(
        &mut self,
        q: &mut Query,
        n_hosts: usize,
        num_metrics: usize,
        time_range: Duration,
    ) -> Result<()>;

    /// Last five per-minute maxima of `usage_user` before a random end.
    fn group_by_order_by_limit(&mut self, q: &mut Query) -> Result<()>;

    /// Hourly mean of the first `num_metrics` CPU metrics per host over a random 12h window.
    fn group_by_time_and_primary_tag(&mut self, q: &mut Query, num_metrics: usize) -> Result<()>;

    /// Hourly max of every CPU metric for `n_hosts` random hosts over a random window.
    fn max_all_cpu(&mut self, q: &mut Query, n_hosts: usize, duration: Duration) -> Result<()>;

    /// The most recent CPU reading of every host.
    fn last_point_per_host(&mut self, q: &mut Query);

    /// Readings with `usage_user` above 90 for `n_hosts` random hosts, or all hosts when zero.
    fn high_cpu_for_hosts(&mut self, q: &mut Query, n_hosts: usize) -> Result<()>;
}

/// Every IoT query type.
pub trait IotGenerator: QueryGenerator {
    fn last_loc_by_truck(&mut self, q: &mut Query, n_trucks: usize) -> Result<()>;
    fn last_loc_per_truck(&mut self, q: &mut Query);
    fn trucks_with_low_fuel(&mut self, q: &mut Query);
    fn trucks_with_high_load(&mut self, q: &mut Query);
    fn stationary_trucks(&mut self, q: &mut Query) -> Result<()>;
    fn trucks_with_long_driving_sessions(&mut self, q: &mut Query) -> Result<()>;
    fn trucks_with_long_daily_sessions(&mut self, q: &mut Query) -> Result<()>;
    fn avg_vs_projected_fuel_consumption(&mut self, q: &mut Query);
    fn avg_daily_driving_duration(&mut self, q: &mut Query);
    fn avg_daily_driving_session(&mut self, q: &mut Query);
    fn avg_load(&mut self, q: &mut Query);
    fn daily_truck_activity(&mut self, q: &mut Query);
    fn truck_breakdown_frequency(&mut self, q: &mut Query);
}

/// A generator for one use case of one backend.
#[derive(Debug)]
pub enum UseCaseGenerator {
    Devops(Box<dyn DevopsGenerator>),
    Iot(Box<dyn IotGenerator>),
}

impl UseCaseGenerator {
    pub fn use_case(&self) -> UseCase {
        match self {
            Self::Devops(_) => UseCase::Devops,
            Self::Iot(_) => UseCase::Iot,
        }
    }

    pub fn generate_empty_query(&self) -> Query {
        match self {
            Self::Devops(g) => g.generate_empty_query(),
            Self::Iot(g) => g.generate_empty_query(),
        }
    }
}

/// Everything a factory binds a generator to.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorParams {
    pub interval: TimeInterval,
    pub scale: usize,
    pub seed: i64,
}

pub type Factory = fn(&GeneratorParams) -> Result<UseCaseGenerator>;

/// The `(format, use case)` pairs this crate can generate queries for.
static REGISTRY: &[(&str, UseCase, Factory)] = &[
    (flux::FORMAT, UseCase::Devops, influx2_devops),
    (flux::FORMAT, UseCase::Iot, influx2_iot),
];

fn influx2_devops(params: &GeneratorParams) -> Result<UseCaseGenerator> {
    let generator = flux::BaseGenerator.new_devops(
        params.interval,
        params.scale,
        GoRand::new(params.seed),
    )?;
    Ok(UseCaseGenerator::Devops(Box::new(generator)))
}

fn influx2_iot(params: &GeneratorParams) -> Result<UseCaseGenerator> {
    let generator =
        flux::BaseGenerator.new_iot(params.interval, params.scale, GoRand::new(params.seed))?;
    Ok(UseCaseGenerator::Iot(Box::new(generator)))
}

/// Look up the factory for `format` and `use_case`.
pub fn factory(format: &str, use_case: UseCase) -> Result<Factory> {
    if !REGISTRY.iter().any(|(f, _, _)| *f == format) {
        return Err(Error::UnknownFormat(format.to_owned()));
    }
    REGISTRY
        .iter()
        .find(|(f, u, _)| *f == format && *u == use_case)
        .map(|(_, _, factory)| *factory)
        .ok_or_else(|| Error::UnsupportedUseCase {
            format: format.to_owned(),
            use_case: use_case.to_string(),
        })
}

/// Build the generator registered for `format` and `use_case`.
pub fn new_generator(
    format: &str,
    use_case: UseCase,
    params: &GeneratorParams,
) -> Result<UseCaseGenerator> {
    let factory = factory(format, use_case)?;
    info!(format, %use_case, scale = params.scale, seed = params.seed, "creating query generator");
    factory(params)
}
