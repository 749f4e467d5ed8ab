//! The benchmark's query types, selected by name on the command line.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::generator::UseCaseGenerator;
use crate::query::Query;
use crate::uses::UseCase;
use crate::uses::devops::{MAX_ALL_DURATION, get_cpu_metrics_len};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DevopsTemplate {
    SingleGroupBy {
        metrics: usize,
        hosts: usize,
        hours: u64,
    },
    MaxAllCpu {
        hosts: usize,
    },
    DoubleGroupBy {
        metrics: usize,
    },
    HighCpu {
        hosts: usize,
    },
    LastPoint,
    GroupByOrderByLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IotTemplate {
    LastLocByTruck { trucks: usize },
    LastLocPerTruck,
    LowFuel,
    HighLoad,
    StationaryTrucks,
    LongDrivingSessions,
    LongDailySessions,
    AvgVsProjectedFuelConsumption,
    AvgDailyDrivingDuration,
    AvgDailyDrivingSession,
    AvgLoad,
    DailyActivity,
    BreakdownFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Template {
    Devops(DevopsTemplate),
    Iot(IotTemplate),
}

/// A named, fully parameterised query template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryType {
    pub name: &'static str,
    pub use_case: UseCase,
    pub description: &'static str,
    template: Template,
}

const fn devops(
    name: &'static str,
    description: &'static str,
    template: DevopsTemplate,
) -> QueryType {
    QueryType {
        name,
        use_case: UseCase::Devops,
        description,
        template: Template::Devops(template),
    }
}

const fn iot(name: &'static str, description: &'static str, template: IotTemplate) -> QueryType {
    QueryType {
        name,
        use_case: UseCase::Iot,
        description,
        template: Template::Iot(template),
    }
}

/// Every query type, devops first.
pub static QUERY_TYPES: &[QueryType] = &[
    devops(
        "single-groupby-1-1-1",
        "Simple aggregate (MAX) on one metric for 1 host, every minute for 1 hour",
        DevopsTemplate::SingleGroupBy {
            metrics: 1,
            hosts: 1,
            hours: 1,
        },
    ),
    devops(
        "single-groupby-1-1-12",
        "Simple aggregate (MAX) on one metric for 1 host, every minute for 12 hours",
        DevopsTemplate::SingleGroupBy {
            metrics: 1,
            hosts: 1,
            hours: 12,
        },
    ),
    devops(
        "single-groupby-1-8-1",
        "Simple aggregate (MAX) on one metric for 8 hosts, every minute for 1 hour",
        DevopsTemplate::SingleGroupBy {
            metrics: 1,
            hosts: 8,
            hours: 1,
        },
    ),
    devops(
        "single-groupby-5-1-1",
        "Simple aggregate (MAX) on 5 metrics for 1 host, every minute for 1 hour",
        DevopsTemplate::SingleGroupBy {
            metrics: 5,
            hosts: 1,
            hours: 1,
        },
    ),
    devops(
        "single-groupby-5-1-12",
        "Simple aggregate (MAX) on 5 metrics for 1 host, every minute for 12 hours",
        DevopsTemplate::SingleGroupBy {
            metrics: 5,
            hosts: 1,
            hours: 12,
        },
    ),
    devops(
        "single-groupby-5-8-1",
        "Simple aggregate (MAX) on 5 metrics for 8 hosts, every minute for 1 hour",
        DevopsTemplate::SingleGroupBy {
            metrics: 5,
            hosts: 8,
            hours: 1,
        },
    ),
    devops(
        "cpu-max-all-1",
        "Aggregate across all CPU metrics per hour over 8 hours for a single host",
        DevopsTemplate::MaxAllCpu { hosts: 1 },
    ),
    devops(
        "cpu-max-all-8",
        "Aggregate across all CPU metrics per hour over 8 hours for eight hosts",
        DevopsTemplate::MaxAllCpu { hosts: 8 },
    ),
    devops(
        "double-groupby-1",
        "Aggregate on across both time and host, giving the average of 1 CPU metric per host per hour for 12 hours",
        DevopsTemplate::DoubleGroupBy { metrics: 1 },
    ),
    devops(
        "double-groupby-5",
        "Aggregate on across both time and host, giving the average of 5 CPU metrics per host per hour for 12 hours",
        DevopsTemplate::DoubleGroupBy { metrics: 5 },
    ),
    devops(
        "double-groupby-all",
        "Aggregate on across both time and host, giving the average of all (10) CPU metrics per host per hour for 12 hours",
        DevopsTemplate::DoubleGroupBy {
            metrics: get_cpu_metrics_len(),
        },
    ),
    devops(
        "high-cpu-all",
        "All the readings where one metric is above a threshold across all hosts",
        DevopsTemplate::HighCpu { hosts: 0 },
    ),
    devops(
        "high-cpu-1",
        "All the readings where one metric is above a threshold for a particular host",
        DevopsTemplate::HighCpu { hosts: 1 },
    ),
    devops(
        "lastpoint",
        "The last reading for each host",
        DevopsTemplate::LastPoint,
    ),
    devops(
        "groupby-orderby-limit",
        "The last 5 aggregate readings (across time) before a randomly chosen endpoint",
        DevopsTemplate::GroupByOrderByLimit,
    ),
    iot(
        "last-loc",
        "Fetch real-time (i.e. last) location of each truck",
        IotTemplate::LastLocPerTruck,
    ),
    iot(
        "single-last-loc",
        "Fetch real-time (i.e. last) location of a single truck",
        IotTemplate::LastLocByTruck { trucks: 1 },
    ),
    iot(
        "low-fuel",
        "Fetch all trucks with low fuel (less than 10%)",
        IotTemplate::LowFuel,
    ),
    iot(
        "high-load",
        "Fetch trucks with high current load (over 90% load capacity)",
        IotTemplate::HighLoad,
    ),
    iot(
        "stationary-trucks",
        "Fetch all trucks that are stationary (low avg velocity in last 10 mins)",
        IotTemplate::StationaryTrucks,
    ),
    iot(
        "long-driving-sessions",
        "Get trucks which haven't rested for at least 20 mins in the last 4 hours",
        IotTemplate::LongDrivingSessions,
    ),
    iot(
        "long-daily-sessions",
        "Get trucks which drove more than 10 hours in the last 24 hours",
        IotTemplate::LongDailySessions,
    ),
    iot(
        "avg-vs-projected-fuel-consumption",
        "Calculate average vs. projected fuel consumption per fleet",
        IotTemplate::AvgVsProjectedFuelConsumption,
    ),
    iot(
        "avg-daily-driving-duration",
        "Calculate average daily driving duration per driver",
        IotTemplate::AvgDailyDrivingDuration,
    ),
    iot(
        "avg-daily-driving-session",
        "Calculate average daily driving session per driver",
        IotTemplate::AvgDailyDrivingSession,
    ),
    iot(
        "avg-load",
        "Calculate average load per truck model per fleet",
        IotTemplate::AvgLoad,
    ),
    iot(
        "daily-activity",
        "Get the number of hours truck has been active (vs. out-of-commission) per day per fleet per model",
        IotTemplate::DailyActivity,
    ),
    iot(
        "breakdown-frequency",
        "Calculate breakdown frequency by truck model",
        IotTemplate::BreakdownFrequency,
    ),
];

/// Look up a query type by name.
pub fn find(name: &str) -> Result<&'static QueryType> {
    QUERY_TYPES
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| Error::UnknownQueryType(name.to_owned()))
}

/// Query types of `use_case`, in catalog order.
pub fn for_use_case(use_case: UseCase) -> impl Iterator<Item = &'static QueryType> {
    QUERY_TYPES.iter().filter(move |t| t.use_case == use_case)
}

impl QueryType {
    /// Fail unless this query type belongs to `use_case`.
    pub fn check_use_case(&self, use_case: UseCase) -> Result<()> {
        if self.use_case != use_case {
            return Err(Error::QueryTypeMismatch {
                query_type: self.name.to_owned(),
                expected: self.use_case.to_string(),
                actual: use_case.to_string(),
            });
        }
        Ok(())
    }

    /// Generate one query of this type into `q`.
    pub fn fill(&self, generator: &mut UseCaseGenerator, q: &mut Query) -> Result<()> {
        match (self.template, generator) {
            (Template::Devops(template), UseCaseGenerator::Devops(g)) => match template {
                DevopsTemplate::SingleGroupBy {
                    metrics,
                    hosts,
                    hours,
                } => g.group_by_time(q, hosts, metrics, Duration::from_secs(hours * 3600)),
                DevopsTemplate::MaxAllCpu { hosts } => g.max_all_cpu(q, hosts, MAX_ALL_DURATION),
                DevopsTemplate::DoubleGroupBy { metrics } => {
                    g.group_by_time_and_primary_tag(q, metrics)
                }
                DevopsTemplate::HighCpu { hosts } => g.high_cpu_for_hosts(q, hosts),
                DevopsTemplate::LastPoint => {
                    g.last_point_per_host(q);
                    Ok(())
                }
                DevopsTemplate::GroupByOrderByLimit => g.group_by_order_by_limit(q),
            },
            (Template::Iot(template), UseCaseGenerator::Iot(g)) => {
                match template {
                    IotTemplate::LastLocByTruck { trucks } => return g.last_loc_by_truck(q, trucks),
                    IotTemplate::StationaryTrucks => return g.stationary_trucks(q),
                    IotTemplate::LongDrivingSessions => {
                        return g.trucks_with_long_driving_sessions(q);
                    }
                    IotTemplate::LongDailySessions => {
                        return g.trucks_with_long_daily_sessions(q);
                    }
                    IotTemplate::LastLocPerTruck => g.last_loc_per_truck(q),
                    IotTemplate::LowFuel => g.trucks_with_low_fuel(q),
                    IotTemplate::HighLoad => g.trucks_with_high_load(q),
                    IotTemplate::AvgVsProjectedFuelConsumption => {
                        g.avg_vs_projected_fuel_consumption(q)
                    }
                    IotTemplate::AvgDailyDrivingDuration => g.avg_daily_driving_duration(q),
                    IotTemplate::AvgDailyDrivingSession => g.avg_daily_driving_session(q),
                    IotTemplate::AvgLoad => g.avg_load(q),
                    IotTemplate::DailyActivity => g.daily_truck_activity(q),
                    IotTemplate::BreakdownFrequency => g.truck_breakdown_frequency(q),
                }
                Ok(())
            }
            (_, generator) => self.check_use_case(generator.use_case()),
        }
    }
}
