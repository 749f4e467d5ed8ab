use std::time::Duration;

use crate::error::Result;
use crate::generator::{DevopsGenerator, QueryGenerator};
use crate::interval::GoDuration;
use crate::query::Query;
use crate::uses::devops::{
    Core, HIGH_CPU_DURATION, DOUBLE_GROUP_BY_DURATION, get_all_cpu_metrics, get_cpu_metrics_slice,
    get_double_group_by_label, get_high_cpu_label, get_max_all_label,
};

use super::{BaseGenerator, DB_NAME, field_disjunction, tag_disjunction};

/// Produces Flux queries for all the devops query types.
#[derive(Debug)]
pub struct Devops {
    base: BaseGenerator,
    core: Core,
}

impl Devops {
    pub(super) fn new(base: BaseGenerator, core: Core) -> Self {
        Self { base, core }
    }

    fn host_filter_clause(&mut self, n_hosts: usize) -> Result<String> {
        let hostnames = self.core.get_random_hosts(n_hosts)?;
        Ok(tag_disjunction("hostname", &hostnames))
    }
}

impl QueryGenerator for Devops {
    fn generate_empty_query(&self) -> Query {
        self.base.generate_empty_query()
    }
}

impl DevopsGenerator for Devops {
    fn group_by_time(
        &mut self,
        q: &mut Query,
        n_hosts: usize,
        num_metrics: usize,
        time_range: Duration,
    ) -> Result<()> {
        let interval = self.core.rand_window(time_range)?;
        let metrics_filter = field_disjunction(get_cpu_metrics_slice(num_metrics)?);
        let hosts_filter = self.host_filter_clause(n_hosts)?;

        let label = format!(
            "{DB_NAME} {num_metrics} cpu metric(s), random {n_hosts:4} hosts, random {} by 1m",
            GoDuration(time_range)
        );
        let description = format!("{label}: {}", interval.start_string());
        let flux = format!(
            "\n\
             \tfrom(bucket: \"benchmark\") \n\
             \t|> range(start: {start}, stop: {end})\n\
             \t|> filter(fn: (r) => r._measurement == \"cpu\" and {metrics_filter} and {hosts_filter})\n\
             \t|> aggregateWindow(every: 1m, fn: max, createEmpty: false)\n\
             \t|> yield()\n\
             \t",
            start = interval.start_string(),
            end = interval.end_string(),
        );
        self.base.fill_in_query(q, label, description, flux);
        Ok(())
    }

    fn group_by_order_by_limit(&mut self, q: &mut Query) -> Result<()> {
        let interval = self.core.rand_window(Duration::from_secs(3600))?;

        let label = format!("{DB_NAME} max cpu over last 5 min-intervals (random end)");
        let description = format!("{label}: {}", interval.start_string());
        let flux = format!(
            "\n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: 0, stop: {end})\n\
             \t|> filter(fn: (r) => r._measurement == \"cpu\" and r._field == \"usage_user\")\n\
             \t|> aggregateWindow(every: 1m, fn: max)\n\
             \t|> sort(columns: [\"_time\"], desc: true)\n\
             \t|> limit(n: 5)\n\
             \t",
            end = interval.end_string(),
        );
        self.base.fill_in_query(q, label, description, flux);
        Ok(())
    }

    fn group_by_time_and_primary_tag(&mut self, q: &mut Query, num_metrics: usize) -> Result<()> {
        let metrics = get_cpu_metrics_slice(num_metrics)?;
        let interval = self.core.rand_window(DOUBLE_GROUP_BY_DURATION)?;
        let metrics_filter = field_disjunction(metrics);

        let label = get_double_group_by_label(DB_NAME, num_metrics);
        let description = format!("{label}: {}", interval.start_string());
        let flux = format!(
            "\n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: {start}, stop: {end})\n\
             \t|> filter(fn: (r) => r._measurement == \"cpu\" and {metrics_filter})\n\
             \t|> group(columns: [\"_time\", \"hostname\"])\n\
             \t|> aggregateWindow(every: 1h, fn: mean)\n\
             \t|> yield(name: \"mean\")\n\
             \t",
            start = interval.start_string(),
            end = interval.end_string(),
        );
        self.base.fill_in_query(q, label, description, flux);
        Ok(())
    }

    fn max_all_cpu(&mut self, q: &mut Query, n_hosts: usize, duration: Duration) -> Result<()> {
        let interval = self.core.rand_window(duration)?;
        let hosts_filter = self.host_filter_clause(n_hosts)?;
        let metrics_filter = field_disjunction(get_all_cpu_metrics());

        let label = get_max_all_label(DB_NAME, n_hosts);
        let description = format!("{label}: {}", interval.start_string());
        let flux = format!(
            "\n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: {start}, stop: {end})\n\
             \t|> filter(fn: (r) => r._measurement == \"cpu\" and {metrics_filter} and {hosts_filter})\n\
             \t|> aggregateWindow(every: 1h, fn: max)\n\
             \t|> yield(name: \"max\")\n\
             \t",
            start = interval.start_string(),
            end = interval.end_string(),
        );
        self.base.fill_in_query(q, label, description, flux);
        Ok(())
    }

    fn last_point_per_host(&mut self, q: &mut Query) {
        let label = format!("{DB_NAME} last row per host");
        let description = format!("{label}: cpu");
        let flux = "\n\
                    \tfrom(bucket: \"benchmark\")\n\
                    \t|> range(start: 0)\n\
                    \t|> filter(fn: (r) => r._measurement == \"cpu\")\n\
                    \t|> group(columns: [\"hostname\"])\n\
                    \t|> last()\n\
                    \t";
        self.base
            .fill_in_query(q, label, description, flux.to_owned());
    }

    fn high_cpu_for_hosts(&mut self, q: &mut Query, n_hosts: usize) -> Result<()> {
        let interval = self.core.rand_window(HIGH_CPU_DURATION)?;
        let hosts_filter = match n_hosts {
            0 => String::new(),
            n => format!(" and {}", self.host_filter_clause(n)?),
        };

        let label = get_high_cpu_label(DB_NAME, n_hosts);
        let description = format!("{label}: {}", interval.start_string());
        let flux = format!(
            "\n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: {start}, stop: {end})\n\
             \t|> filter(fn: (r) => r._measurement == \"cpu\" and r._field == \"usage_user\" and r._value > 90.0{hosts_filter})\n\
             \t|> yield(name: \"high_cpu\")\n\
             \t",
            start = interval.start_string(),
            end = interval.end_string(),
        );
        self.base.fill_in_query(q, label, description, flux);
        Ok(())
    }
}
