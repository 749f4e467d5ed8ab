use std::time::Duration;

use crate::error::Result;
use crate::generator::{IotGenerator, QueryGenerator};
use crate::query::Query;
use crate::uses::iot::{
    Core, DAILY_DRIVING_DURATION, LONG_DRIVING_SESSION_DURATION, STATIONARY_DURATION,
};

use super::{BaseGenerator, DB_NAME, tag_disjunction};

/// Produces Flux queries for all the IoT query types.
#[derive(Debug)]
pub struct Iot {
    base: BaseGenerator,
    core: Core,
}

impl Iot {
    pub(super) fn new(base: BaseGenerator, core: Core) -> Self {
        Self { base, core }
    }

    fn trucks_filter_clause(&mut self, n_trucks: usize) -> Result<String> {
        let names = self.core.get_random_trucks(n_trucks)?;
        Ok(tag_disjunction("name", &names))
    }

    /// Shared by the long driving session queries, which only differ in window and threshold.
    fn long_sessions_query(&mut self, window: Duration, threshold: i64) -> Result<String> {
        let interval = self.core.rand_window(window)?;
        // aligns the outer windows with the start of the simulation, not of the sampled window
        let offset = self.core.interval().start_seconds_of_day();
        let fleet = self.core.get_random_fleet();

        // `every` is the session length in nanoseconds, read by the server as seconds.
        let every = LONG_DRIVING_SESSION_DURATION.as_nanos();
        Ok(format!(
            "\n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: {start}, stop: {end})\n\
             \t|> filter(fn: (r) => r._measurement == \"readings\" and r._field == \"velocity\" and r.fleet == \"{fleet}\")\n\
             \t|> aggregateWindow(every: 10m, fn: mean, createEmpty: false)\n\
             \t|> group(columns: [\"name\", \"driver\"])\n\
             \t|> filter(fn: (r) => r._value > 1.0)\n\
             \t|> aggregateWindow(every: {every}s, fn:count, offset: {offset}s, createEmpty: false)\n\
             \t|> filter(fn: (r) => r._value > {threshold})\n\
             \t",
            start = interval.start_string(),
            end = interval.end_string(),
        ))
    }
}

impl QueryGenerator for Iot {
    fn generate_empty_query(&self) -> Query {
        self.base.generate_empty_query()
    }
}

impl IotGenerator for Iot {
    fn last_loc_by_truck(&mut self, q: &mut Query, n_trucks: usize) -> Result<()> {
        let trucks_filter = self.trucks_filter_clause(n_trucks)?;
        let flux = format!(
            "\n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: 0)\n\
             \t|> filter(fn: (r) => r._measurement == \"readings\" and {trucks_filter})\n\
             \t|> pivot(rowKey:[\"_time\"], columnKey: [\"_field\"], valueColumn: \"_value\")\n\
             \t|> group(columns: [\"name\", \"driver\"])\n\
             \t|> sort(columns: [\"_time\"], desc: true)\n\
             \t|> first(column: \"latitude\")\n\
             \t|> keep(columns: [\"name\", \"driver\", \"latitude\", \"longitude\", \"_time\"])"
        );

        let label = format!("{DB_NAME} last location by specific truck");
        let description = format!("{label}: random {n_trucks:4} trucks");
        self.base.fill_in_query(q, label, description, flux);
        Ok(())
    }

    fn last_loc_per_truck(&mut self, q: &mut Query) {
        let fleet = self.core.get_random_fleet();
        let flux = format!(
            "\n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: 0)\n\
             \t|> filter(fn: (r) => r._measurement == \"readings\" and r.fleet == \"{fleet}\")\n\
             \t|> pivot(rowKey:[\"_time\"], columnKey: [\"_field\"], valueColumn: \"_value\")\n\
             \t|> group(columns: [\"name\", \"driver\"])\n\
             \t|> sort(columns: [\"_time\"], desc: true)\n\
             \t|> first(column: \"latitude\")\n\
             \t|> keep(columns: [\"name\", \"driver\", \"latitude\", \"longitude\"])"
        );

        let label = format!("{DB_NAME} last location per truck");
        self.base.fill_in_query(q, label.clone(), label, flux);
    }

    fn trucks_with_low_fuel(&mut self, q: &mut Query) {
        let fleet = self.core.get_random_fleet();
        let flux = format!(
            "\n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: 0)\n\
             \t|> filter(fn: (r) => r._measurement == \"diagnostics\" and r.fleet == \"{fleet}\" and r._field == \"fuel_state\" and r._value <= 0.1)\n\
             \t|> group(columns: [\"name\", \"driver\"])\n\
             \t|> last()\n\
             \t|> keep(columns: [\"name\", \"driver\", \"_field\", \"_value\"])"
        );

        let label = format!("{DB_NAME} trucks with low fuel");
        let description = format!("{label}: under 10 percent");
        self.base.fill_in_query(q, label, description, flux);
    }

    fn trucks_with_high_load(&mut self, q: &mut Query) {
        let fleet = self.core.get_random_fleet();
        let flux = format!(
            "\n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: 0)\n\
             \t|> filter(fn: (r) => r._measurement == \"diagnostics\" and r.fleet == \"{fleet}\")\n\
             \t|> pivot(rowKey:[\"_time\"], columnKey: [\"_field\"], valueColumn: \"_value\")\n\
             \t|> group(columns: [\"name\", \"driver\"])\n\
             \t|> sort(columns: [\"_time\"], desc: true)\n\
             \t|> first(column: \"current_load\")\n\
             \t|> filter(fn: (r) => r.current_load >= 0.9 * r.load_capacity)\n\
             \t|> keep(columns: [\"name\", \"driver\", \"current_load\", \"load_capacity\"])"
        );

        let label = format!("{DB_NAME} trucks with high load");
        let description = format!("{label}: over 90 percent");
        self.base.fill_in_query(q, label, description, flux);
    }

    fn stationary_trucks(&mut self, q: &mut Query) -> Result<()> {
        let interval = self.core.rand_window(STATIONARY_DURATION)?;
        let fleet = self.core.get_random_fleet();
        let flux = format!(
            "\n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: {start}, stop: {end})\n\
             \t|> filter(fn: (r) => r._measurement == \"readings\" and r._field == \"velocity\" and r.fleet == \"{fleet}\")\n\
             \t|> group(columns: [\"name\", \"driver\", \"fleet\"])\n\
             \t|> aggregateWindow(every: 10m, fn: mean, createEmpty: false)\n\
             \t|> sort(columns: [\"_time\"], desc: false)\n\
             \t|> filter(fn: (r) => r._value < 1.0)",
            start = interval.start_string(),
            end = interval.end_string(),
        );

        let label = format!("{DB_NAME} stationary trucks");
        let description = format!("{label}: with low avg velocity in last 10 minutes");
        self.base.fill_in_query(q, label, description, flux);
        Ok(())
    }

    fn trucks_with_long_driving_sessions(&mut self, q: &mut Query) -> Result<()> {
        // at most 5 minutes of rest per hour
        let threshold = ten_minute_periods(5.0, LONG_DRIVING_SESSION_DURATION);
        let flux = self.long_sessions_query(LONG_DRIVING_SESSION_DURATION, threshold)?;

        let label = format!("{DB_NAME} trucks with longer driving sessions");
        let description = format!("{label}: stopped less than 20 mins in 4 hour period");
        self.base.fill_in_query(q, label, description, flux);
        Ok(())
    }

    fn trucks_with_long_daily_sessions(&mut self, q: &mut Query) -> Result<()> {
        let threshold = ten_minute_periods(35.0, DAILY_DRIVING_DURATION);
        let flux = self.long_sessions_query(DAILY_DRIVING_DURATION, threshold)?;

        let label = format!("{DB_NAME} trucks with longer daily sessions");
        let description = format!("{label}: drove more than 10 hours in the last 24 hours");
        self.base.fill_in_query(q, label, description, flux);
        Ok(())
    }

    fn avg_vs_projected_fuel_consumption(&mut self, q: &mut Query) {
        let flux = "\n\
                    \tdata = from(bucket: \"benchmark\")\n\
                    \t|> range(start: 0)\n\
                    \t|> filter(fn: (r) => r._measurement == \"readings\" and exists r.fleet)\n\
                    \t|> filter(fn: (r) => r._field == \"velocity\" or r._field == \"fuel_consumption\" or r._field == \"nominal_fuel_consumption\")\n\
                    \t|> pivot(rowKey:[\"_time\"], columnKey: [\"_field\"], valueColumn: \"_value\")\n\
                    \t|> filter(fn: (r) => r.velocity > 1.0)\n\
                    \t|> group(columns: [\"fleet\"])\n\
                    \n\
                    \tdata\n\
                    \t|> mean(column: \"nominal_fuel_consumption\")\n\
                    \t|> yield(name: \"mean_nominal_fuel_consumption\")\n\
                    \n\
                    \tdata\n\
                    \t|> mean(column: \"fuel_consumption\")\n\
                    \t|> yield(name: \"mean_fuel_consumption\")";

        let label = format!("{DB_NAME} average vs projected fuel consumption per fleet");
        self.base
            .fill_in_query(q, label.clone(), label, flux.to_owned());
    }

    fn avg_daily_driving_duration(&mut self, q: &mut Query) {
        let interval = self.core.interval();
        let flux = format!(
            "\n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: {start}, stop: {end})\n\
             \t|> filter(fn: (r) => r._measurement == \"readings\" and r._field == \"velocity\")\n\
             \t|> group(columns: [\"fleet\", \"name\", \"driver\"])\n\
             \t|> aggregateWindow(every: 10m, fn: mean, createEmpty: false)\n\
             \t|> filter(fn: (r) => r._value > 1.0)\n\
             \t|> sort(columns: [\"_time\"], desc: false)\n\
             \t|> aggregateWindow(every: 1d, fn: count, createEmpty: false)\n\
             \t|> map(fn: (r) => ({{r with _value: r._value / 6.0}}))\n\
             \t|> group(columns: [\"fleet\", \"name\", \"driver\"])\n\
             \t|> yield(name: \"hours_driven\")\n\
             \t",
            start = interval.start_string(),
            end = interval.end_string(),
        );

        let label = format!("{DB_NAME} average driver driving duration per day");
        self.base.fill_in_query(q, label.clone(), label, flux);
    }

    fn avg_daily_driving_session(&mut self, q: &mut Query) {
        let interval = self.core.interval();
        let flux = format!(
            "\n\
             \timport \"date\"\n\
             \timport \"math\"\n\
             \n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: {start}, stop: {end})\n\
             \t|> filter(fn: (r) => r._measurement == \"readings\")\n\
             \t|> filter(fn: (r) => r._field == \"velocity\")\n\
             \t|> group(columns: [\"fleet\", \"name\", \"driver\"]) \n\
             \t|> aggregateWindow(every: 10m, fn: mean, createEmpty: false)\n\
             \t|> map(fn: (r) => ({{r with driving: if r._value > 5.0 then 1 else 0}}))\n\
             \t|> map(fn: (r) => ({{r with day: date.yearDay(t: r._time)}}))\n\
             \t|> map(fn: (r) => ({{r with year: date.year(t: r._time)}}))\n\
             \t|> map(fn: (r) => ({{r with month: date.month(t: r._time)}}))\n\
             \t|> group(columns: [\"fleet\", \"name\", \"driver\", \"year\", \"day\"]) \n\
             \t|> reduce(\n\
             \t\tidentity: {{\n\
             \t\t\tcurrSession: 0,\n\
             \t\t\tsessionSum: 0,\n\
             \t\t\tsessionCount: 0,\n\
             \t\t\tlastState: -1,\n\
             \t\t\tfstDate: 0\n\
             \t\t}},\n\
             \t\tfn: (r, accumulator) => ({{\n\
             \t\t\tlastState: r.driving,\n\
             \t\t\tcurrSession: if (r.driving == 1 and r.driving == accumulator.lastState) then accumulator.currSession + 1 else 0,\n\
             \t\t\tsessionSum: if (r.driving == 1 and r.driving == accumulator.lastState) then accumulator.sessionSum else accumulator.sessionSum + accumulator.currSession,\n\
             \t\t\tsessionCount: if (r.driving == 1 and r.driving == accumulator.lastState) then accumulator.sessionCount else accumulator.sessionCount + 1,\n\
             \t\t\tfstDate: if accumulator.fstDate == 0 then int(v: r._time) else accumulator.fstDate \n\
             \t\t}})\n\
             \t)\n\
             \t|> map(fn: (r) => ({{\n\
             \t\tname: r.name,\n\
             \t\tdriver: r.driver,\n\
             \t\tfleet: r.fleet,\n\
             \t\tavg_session: (float(v:(r.sessionSum + r.currSession)) * 10.0 / float(v: r.sessionCount)) / 60.0,\n\
             \t\t_time: time(v: r.fstDate)\n\
             \t}}))\n\
             \t|> yield()",
            start = interval.start_string(),
            end = interval.end_string(),
        );

        let label = format!("{DB_NAME} average driver driving session without stopping per day");
        self.base.fill_in_query(q, label.clone(), label, flux);
    }

    fn avg_load(&mut self, q: &mut Query) {
        let flux = "\n\
                    \tfrom(bucket: \"benchmark\")\n\
                    \t|> range(start: 0)\n\
                    \t|> filter(fn: (r) => r._measurement == \"diagnostics\")\n\
                    \t|> filter(fn: (r) => r._field == \"current_load\" or r._field == \"load_capacity\")\n\
                    \t|> pivot(rowKey:[\"_time\"], columnKey: [\"_field\"], valueColumn: \"_value\")\n\
                    \t|> filter(fn: (r) => r.load_capacity > 0.0)\n\
                    \t|> map(fn: (r) => ({r with load_percentage: r.current_load / r.load_capacity}))\n\
                    \t|> group(columns: [\"name\", \"fleet\", \"model\"])\n\
                    \t|> mean(column: \"load_percentage\")";

        let label = format!("{DB_NAME} average load per truck model per fleet");
        self.base
            .fill_in_query(q, label.clone(), label, flux.to_owned());
    }

    fn daily_truck_activity(&mut self, q: &mut Query) {
        let interval = self.core.interval();
        let flux = format!(
            "\n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: {start}, stop: {end})\n\
             \t|> filter(fn: (r) => r._measurement == \"diagnostics\" and r._field == \"status\")\n\
             \t|> filter(fn: (r) => exists r.model and exists r.fleet)\n\
             \t|> aggregateWindow(every: 10m, fn: mean, createEmpty: false)\n\
             \t|> group(columns: [\"model\", \"fleet\"])\n\
             \t|> filter(fn: (r) => r._value < 1)\n\
             \t|> aggregateWindow(every: 1d, fn: count, createEmpty: false)\n\
             \t|> map(fn: (r) => ({{r with _value: float(v:r._value) / 144.0}}))",
            start = interval.start_string(),
            end = interval.end_string(),
        );

        let label = format!("{DB_NAME} daily truck activity per fleet per model");
        self.base.fill_in_query(q, label.clone(), label, flux);
    }

    fn truck_breakdown_frequency(&mut self, q: &mut Query) {
        let interval = self.core.interval();
        let flux = format!(
            "\n\
             \tfrom(bucket: \"benchmark\")\n\
             \t|> range(start: {start}, stop: {end})\n\
             \t|> filter(fn: (r) => r._measurement == \"diagnostics\" and r._field == \"status\")\n\
             \t|> filter(fn: (r) => exists r.model and exists r.fleet)\n\
             \t// First mark each reading as broken (1) or not (0)\n\
             \t|> map(fn: (r) => ({{r with is_broken: if r._value == 0 then 1 else 0}})) \n\
             \t|> group(columns: [\"model\"])\n\
             \t|> aggregateWindow(\n\
             \t\tevery: 10m,\n\
             \t\tfn: (column, tables=<-) => tables\n\
             \t\t|> mean(column: \"is_broken\")\n\
             \t\t|> map(fn: (r) => ({{r with broken_down: if r.is_broken >= 0.5 then true else false}})),\n\
             \t)\n\
             \t|> sort(columns: [\"_time\"])\n\
             \t|> reduce(\n\
             \t\tidentity: {{\n\
             \t\t\tlastState: -1,\n\
             \t\t\tcnt: 0\n\
             \t\t}}, \n\
             \t\tfn: (r, accumulator) => ({{\n\
             \t\t\tlastState: if r.broken_down == true then 1 else 0,\n\
             \t\t\tcnt: if accumulator.lastState == 0 and r.broken_down == true then accumulator.cnt + 1 else accumulator.cnt\n\
             \t\t}}) \n\
             \t)",
            start = interval.start_string(),
            end = interval.end_string(),
        );

        let label = format!("{DB_NAME} truck breakdown frequency per model");
        self.base.fill_in_query(q, label.clone(), label, flux);
    }
}

/// Number of whole ten minute periods left in `duration` after resting `minutes_per_hour`
/// minutes every hour, e.g. 4 hours less 5 minutes per hour is 3h40m, or 22 periods.
pub(crate) fn ten_minute_periods(minutes_per_hour: f64, duration: Duration) -> i64 {
    let minutes = duration.as_secs_f64() / 60.0;
    let leftover = minutes_per_hour * duration.as_secs_f64() / 3600.0;
    ((minutes - leftover) / 10.0) as i64
}

#[cfg(test)]
mod tests {
    use super::super::test_util::{HOUR, flux};
    use super::*;
    use crate::go_rand::GoRand;
    use crate::interval::TimeInterval;
    use pretty_assertions::assert_eq;

    fn iot(span: Duration) -> Iot {
        let interval = TimeInterval::from_unix_nanos(0, span.as_nanos() as i64).unwrap();
        BaseGenerator.new_iot(interval, 10, GoRand::new(123)).unwrap()
    }

    fn verify(q: &Query, label: &str, description: &str, flux: &str) {
        assert_eq!(q.human_label, label);
        assert_eq!(q.human_description, description);
        assert_eq!(q.method, "POST");
        assert_eq!(q.path, "/api/v2/query");
        assert_eq!(q.raw_query, flux);
        assert_eq!(q.body, flux);
    }

    fn last_loc_by_truck_flux(trucks_filter: &str) -> String {
        flux(&[
            "from(bucket: \"benchmark\")",
            "|> range(start: 0)",
            &format!("|> filter(fn: (r) => r._measurement == \"readings\" and {trucks_filter})"),
            "|> pivot(rowKey:[\"_time\"], columnKey: [\"_field\"], valueColumn: \"_value\")",
            "|> group(columns: [\"name\", \"driver\"])",
            "|> sort(columns: [\"_time\"], desc: true)",
            "|> first(column: \"latitude\")",
            "|> keep(columns: [\"name\", \"driver\", \"latitude\", \"longitude\", \"_time\"])",
        ])
    }

    #[test]
    fn last_loc_by_truck() {
        let mut g = iot(HOUR);
        let mut q = g.generate_empty_query();

        let err = g.last_loc_by_truck(&mut q, 0).unwrap_err();
        assert_eq!(err.to_string(), "number of trucks cannot be < 1; got 0");
        let err = g.last_loc_by_truck(&mut q, 20).unwrap_err();
        assert_eq!(
            err.to_string(),
            "number of trucks (20) larger than total trucks. See --scale (10)"
        );
        assert!(q.is_empty());

        g.last_loc_by_truck(&mut q, 1).unwrap();
        verify(
            &q,
            "Influx 2.x last location by specific truck",
            "Influx 2.x last location by specific truck: random    1 trucks",
            &last_loc_by_truck_flux("(r.name == 'truck_5')"),
        );

        let mut q = g.generate_empty_query();
        g.last_loc_by_truck(&mut q, 3).unwrap();
        verify(
            &q,
            "Influx 2.x last location by specific truck",
            "Influx 2.x last location by specific truck: random    3 trucks",
            &last_loc_by_truck_flux(
                "(r.name == 'truck_9' or r.name == 'truck_3' or r.name == 'truck_5')",
            ),
        );
    }

    #[test]
    fn last_loc_per_truck() {
        let mut g = iot(HOUR);
        let mut q = g.generate_empty_query();
        g.last_loc_per_truck(&mut q);

        verify(
            &q,
            "Influx 2.x last location per truck",
            "Influx 2.x last location per truck",
            &flux(&[
                "from(bucket: \"benchmark\")",
                "|> range(start: 0)",
                "|> filter(fn: (r) => r._measurement == \"readings\" and r.fleet == \"South\")",
                "|> pivot(rowKey:[\"_time\"], columnKey: [\"_field\"], valueColumn: \"_value\")",
                "|> group(columns: [\"name\", \"driver\"])",
                "|> sort(columns: [\"_time\"], desc: true)",
                "|> first(column: \"latitude\")",
                "|> keep(columns: [\"name\", \"driver\", \"latitude\", \"longitude\"])",
            ]),
        );
    }

    #[test]
    fn trucks_with_low_fuel() {
        let mut g = iot(HOUR);
        let mut q = g.generate_empty_query();
        g.trucks_with_low_fuel(&mut q);

        verify(
            &q,
            "Influx 2.x trucks with low fuel",
            "Influx 2.x trucks with low fuel: under 10 percent",
            &flux(&[
                "from(bucket: \"benchmark\")",
                "|> range(start: 0)",
                "|> filter(fn: (r) => r._measurement == \"diagnostics\" and r.fleet == \"South\" and r._field == \"fuel_state\" and r._value <= 0.1)",
                "|> group(columns: [\"name\", \"driver\"])",
                "|> last()",
                "|> keep(columns: [\"name\", \"driver\", \"_field\", \"_value\"])",
            ]),
        );
    }

    #[test]
    fn trucks_with_high_load() {
        let mut g = iot(HOUR);
        let mut q = g.generate_empty_query();
        g.trucks_with_high_load(&mut q);

        verify(
            &q,
            "Influx 2.x trucks with high load",
            "Influx 2.x trucks with high load: over 90 percent",
            &flux(&[
                "from(bucket: \"benchmark\")",
                "|> range(start: 0)",
                "|> filter(fn: (r) => r._measurement == \"diagnostics\" and r.fleet == \"South\")",
                "|> pivot(rowKey:[\"_time\"], columnKey: [\"_field\"], valueColumn: \"_value\")",
                "|> group(columns: [\"name\", \"driver\"])",
                "|> sort(columns: [\"_time\"], desc: true)",
                "|> first(column: \"current_load\")",
                "|> filter(fn: (r) => r.current_load >= 0.9 * r.load_capacity)",
                "|> keep(columns: [\"name\", \"driver\", \"current_load\", \"load_capacity\"])",
            ]),
        );
    }

    #[test]
    fn stationary_trucks() {
        let mut g = iot(HOUR);
        let mut q = g.generate_empty_query();
        g.stationary_trucks(&mut q).unwrap();

        verify(
            &q,
            "Influx 2.x stationary trucks",
            "Influx 2.x stationary trucks: with low avg velocity in last 10 minutes",
            &flux(&[
                "from(bucket: \"benchmark\")",
                "|> range(start: 1970-01-01T00:36:22Z, stop: 1970-01-01T00:46:22Z)",
                "|> filter(fn: (r) => r._measurement == \"readings\" and r._field == \"velocity\" and r.fleet == \"West\")",
                "|> group(columns: [\"name\", \"driver\", \"fleet\"])",
                "|> aggregateWindow(every: 10m, fn: mean, createEmpty: false)",
                "|> sort(columns: [\"_time\"], desc: false)",
                "|> filter(fn: (r) => r._value < 1.0)",
            ]),
        );
    }

    #[test]
    fn trucks_with_long_driving_sessions() {
        let mut g = iot(6 * HOUR);
        let mut q = g.generate_empty_query();
        g.trucks_with_long_driving_sessions(&mut q).unwrap();

        verify(
            &q,
            "Influx 2.x trucks with longer driving sessions",
            "Influx 2.x trucks with longer driving sessions: stopped less than 20 mins in 4 hour period",
            &(flux(&[
                "from(bucket: \"benchmark\")",
                "|> range(start: 1970-01-01T00:16:22Z, stop: 1970-01-01T04:16:22Z)",
                "|> filter(fn: (r) => r._measurement == \"readings\" and r._field == \"velocity\" and r.fleet == \"West\")",
                "|> aggregateWindow(every: 10m, fn: mean, createEmpty: false)",
                "|> group(columns: [\"name\", \"driver\"])",
                "|> filter(fn: (r) => r._value > 1.0)",
                "|> aggregateWindow(every: 14400000000000s, fn:count, offset: 0s, createEmpty: false)",
                "|> filter(fn: (r) => r._value > 22)",
            ]) + "\n\t"),
        );
    }

    #[test]
    fn trucks_with_long_daily_sessions() {
        let mut g = iot(25 * HOUR);
        let mut q = g.generate_empty_query();
        g.trucks_with_long_daily_sessions(&mut q).unwrap();

        verify(
            &q,
            "Influx 2.x trucks with longer daily sessions",
            "Influx 2.x trucks with longer daily sessions: drove more than 10 hours in the last 24 hours",
            &(flux(&[
                "from(bucket: \"benchmark\")",
                "|> range(start: 1970-01-01T00:16:22Z, stop: 1970-01-02T00:16:22Z)",
                "|> filter(fn: (r) => r._measurement == \"readings\" and r._field == \"velocity\" and r.fleet == \"West\")",
                "|> aggregateWindow(every: 10m, fn: mean, createEmpty: false)",
                "|> group(columns: [\"name\", \"driver\"])",
                "|> filter(fn: (r) => r._value > 1.0)",
                "|> aggregateWindow(every: 14400000000000s, fn:count, offset: 0s, createEmpty: false)",
                "|> filter(fn: (r) => r._value > 60)",
            ]) + "\n\t"),
        );
    }

    #[test]
    fn long_sessions_offset_follows_simulation_start() {
        let start = 13 * 3600 + 4 * 60 + 5;
        let interval = TimeInterval::from_unix_nanos(
            start * 1_000_000_000,
            (start + 6 * 3600) * 1_000_000_000,
        )
        .unwrap();
        let mut g = BaseGenerator
            .new_iot(interval, 10, GoRand::new(123))
            .unwrap();
        let mut q = g.generate_empty_query();
        g.trucks_with_long_driving_sessions(&mut q).unwrap();

        assert!(q.body.contains(&format!("offset: {start}s,")), "{}", q.body);
    }

    #[test]
    fn avg_vs_projected_fuel_consumption() {
        let mut g = iot(25 * HOUR);
        let mut q = g.generate_empty_query();
        g.avg_vs_projected_fuel_consumption(&mut q);

        verify(
            &q,
            "Influx 2.x average vs projected fuel consumption per fleet",
            "Influx 2.x average vs projected fuel consumption per fleet",
            &flux(&[
                "data = from(bucket: \"benchmark\")",
                "|> range(start: 0)",
                "|> filter(fn: (r) => r._measurement == \"readings\" and exists r.fleet)",
                "|> filter(fn: (r) => r._field == \"velocity\" or r._field == \"fuel_consumption\" or r._field == \"nominal_fuel_consumption\")",
                "|> pivot(rowKey:[\"_time\"], columnKey: [\"_field\"], valueColumn: \"_value\")",
                "|> filter(fn: (r) => r.velocity > 1.0)",
                "|> group(columns: [\"fleet\"])",
                "",
                "data",
                "|> mean(column: \"nominal_fuel_consumption\")",
                "|> yield(name: \"mean_nominal_fuel_consumption\")",
                "",
                "data",
                "|> mean(column: \"fuel_consumption\")",
                "|> yield(name: \"mean_fuel_consumption\")",
            ]),
        );
    }

    #[test]
    fn avg_daily_driving_duration() {
        let mut g = iot(25 * HOUR);
        let mut q = g.generate_empty_query();
        g.avg_daily_driving_duration(&mut q);

        verify(
            &q,
            "Influx 2.x average driver driving duration per day",
            "Influx 2.x average driver driving duration per day",
            &(flux(&[
                "from(bucket: \"benchmark\")",
                "|> range(start: 1970-01-01T00:00:00Z, stop: 1970-01-02T01:00:00Z)",
                "|> filter(fn: (r) => r._measurement == \"readings\" and r._field == \"velocity\")",
                "|> group(columns: [\"fleet\", \"name\", \"driver\"])",
                "|> aggregateWindow(every: 10m, fn: mean, createEmpty: false)",
                "|> filter(fn: (r) => r._value > 1.0)",
                "|> sort(columns: [\"_time\"], desc: false)",
                "|> aggregateWindow(every: 1d, fn: count, createEmpty: false)",
                "|> map(fn: (r) => ({r with _value: r._value / 6.0}))",
                "|> group(columns: [\"fleet\", \"name\", \"driver\"])",
                "|> yield(name: \"hours_driven\")",
            ]) + "\n\t"),
        );
    }

    #[test]
    fn avg_daily_driving_session() {
        let mut g = iot(25 * HOUR);
        let mut q = g.generate_empty_query();
        g.avg_daily_driving_session(&mut q);

        verify(
            &q,
            "Influx 2.x average driver driving session without stopping per day",
            "Influx 2.x average driver driving session without stopping per day",
            &flux(&[
                "import \"date\"",
                "import \"math\"",
                "",
                "from(bucket: \"benchmark\")",
                "|> range(start: 1970-01-01T00:00:00Z, stop: 1970-01-02T01:00:00Z)",
                "|> filter(fn: (r) => r._measurement == \"readings\")",
                "|> filter(fn: (r) => r._field == \"velocity\")",
                "|> group(columns: [\"fleet\", \"name\", \"driver\"]) ",
                "|> aggregateWindow(every: 10m, fn: mean, createEmpty: false)",
                "|> map(fn: (r) => ({r with driving: if r._value > 5.0 then 1 else 0}))",
                "|> map(fn: (r) => ({r with day: date.yearDay(t: r._time)}))",
                "|> map(fn: (r) => ({r with year: date.year(t: r._time)}))",
                "|> map(fn: (r) => ({r with month: date.month(t: r._time)}))",
                "|> group(columns: [\"fleet\", \"name\", \"driver\", \"year\", \"day\"]) ",
                "|> reduce(",
                "\tidentity: {",
                "\t\tcurrSession: 0,",
                "\t\tsessionSum: 0,",
                "\t\tsessionCount: 0,",
                "\t\tlastState: -1,",
                "\t\tfstDate: 0",
                "\t},",
                "\tfn: (r, accumulator) => ({",
                "\t\tlastState: r.driving,",
                "\t\tcurrSession: if (r.driving == 1 and r.driving == accumulator.lastState) then accumulator.currSession + 1 else 0,",
                "\t\tsessionSum: if (r.driving == 1 and r.driving == accumulator.lastState) then accumulator.sessionSum else accumulator.sessionSum + accumulator.currSession,",
                "\t\tsessionCount: if (r.driving == 1 and r.driving == accumulator.lastState) then accumulator.sessionCount else accumulator.sessionCount + 1,",
                "\t\tfstDate: if accumulator.fstDate == 0 then int(v: r._time) else accumulator.fstDate ",
                "\t})",
                ")",
                "|> map(fn: (r) => ({",
                "\tname: r.name,",
                "\tdriver: r.driver,",
                "\tfleet: r.fleet,",
                "\tavg_session: (float(v:(r.sessionSum + r.currSession)) * 10.0 / float(v: r.sessionCount)) / 60.0,",
                "\t_time: time(v: r.fstDate)",
                "}))",
                "|> yield()",
            ]),
        );
    }

    #[test]
    fn avg_load() {
        let mut g = iot(25 * HOUR);
        let mut q = g.generate_empty_query();
        g.avg_load(&mut q);

        verify(
            &q,
            "Influx 2.x average load per truck model per fleet",
            "Influx 2.x average load per truck model per fleet",
            &flux(&[
                "from(bucket: \"benchmark\")",
                "|> range(start: 0)",
                "|> filter(fn: (r) => r._measurement == \"diagnostics\")",
                "|> filter(fn: (r) => r._field == \"current_load\" or r._field == \"load_capacity\")",
                "|> pivot(rowKey:[\"_time\"], columnKey: [\"_field\"], valueColumn: \"_value\")",
                "|> filter(fn: (r) => r.load_capacity > 0.0)",
                "|> map(fn: (r) => ({r with load_percentage: r.current_load / r.load_capacity}))",
                "|> group(columns: [\"name\", \"fleet\", \"model\"])",
                "|> mean(column: \"load_percentage\")",
            ]),
        );
    }

    #[test]
    fn daily_truck_activity() {
        let mut g = iot(25 * HOUR);
        let mut q = g.generate_empty_query();
        g.daily_truck_activity(&mut q);

        verify(
            &q,
            "Influx 2.x daily truck activity per fleet per model",
            "Influx 2.x daily truck activity per fleet per model",
            &flux(&[
                "from(bucket: \"benchmark\")",
                "|> range(start: 1970-01-01T00:00:00Z, stop: 1970-01-02T01:00:00Z)",
                "|> filter(fn: (r) => r._measurement == \"diagnostics\" and r._field == \"status\")",
                "|> filter(fn: (r) => exists r.model and exists r.fleet)",
                "|> aggregateWindow(every: 10m, fn: mean, createEmpty: false)",
                "|> group(columns: [\"model\", \"fleet\"])",
                "|> filter(fn: (r) => r._value < 1)",
                "|> aggregateWindow(every: 1d, fn: count, createEmpty: false)",
                "|> map(fn: (r) => ({r with _value: float(v:r._value) / 144.0}))",
            ]),
        );
    }

    #[test]
    fn truck_breakdown_frequency() {
        let mut g = iot(25 * HOUR);
        let mut q = g.generate_empty_query();
        g.truck_breakdown_frequency(&mut q);

        verify(
            &q,
            "Influx 2.x truck breakdown frequency per model",
            "Influx 2.x truck breakdown frequency per model",
            &flux(&[
                "from(bucket: \"benchmark\")",
                "|> range(start: 1970-01-01T00:00:00Z, stop: 1970-01-02T01:00:00Z)",
                "|> filter(fn: (r) => r._measurement == \"diagnostics\" and r._field == \"status\")",
                "|> filter(fn: (r) => exists r.model and exists r.fleet)",
                "// First mark each reading as broken (1) or not (0)",
                "|> map(fn: (r) => ({r with is_broken: if r._value == 0 then 1 else 0})) ",
                "|> group(columns: [\"model\"])",
                "|> aggregateWindow(",
                "\tevery: 10m,",
                "\tfn: (column, tables=<-) => tables",
                "\t|> mean(column: \"is_broken\")",
                "\t|> map(fn: (r) => ({r with broken_down: if r.is_broken >= 0.5 then true else false})),",
                ")",
                "|> sort(columns: [\"_time\"])",
                "|> reduce(",
                "\tidentity: {",
                "\t\tlastState: -1,",
                "\t\tcnt: 0",
                "\t}, ",
                "\tfn: (r, accumulator) => ({",
                "\t\tlastState: if r.broken_down == true then 1 else 0,",
                "\t\tcnt: if accumulator.lastState == 0 and r.broken_down == true then accumulator.cnt + 1 else accumulator.cnt",
                "\t}) ",
                ")",
            ]),
        );
    }

    #[test]
    fn ten_minute_period_counts() {
        let minute = Duration::from_secs(60);
        let cases = [
            (5.0, 4 * HOUR, 22),
            (10.0, 24 * HOUR, 120),
            (0.0, 24 * HOUR, 144),
            (1.0, Duration::ZERO, 0),
            (0.0, Duration::ZERO, 0),
            (1.0, 30 * minute, 2),
        ];
        for (minutes_per_hour, duration, want) in cases {
            assert_eq!(
                ten_minute_periods(minutes_per_hour, duration),
                want,
                "{minutes_per_hour} minutes per hour over {duration:?}"
            );
        }
    }
}
