//! Query generation for InfluxDB 2.x, which is queried with Flux over `POST /api/v2/query`.

use crate::error::Result;
use crate::go_rand::GoRand;
use crate::interval::TimeInterval;
use crate::query::Query;
use crate::uses;

mod devops;
mod iot;

pub use devops::Devops;
pub use iot::Iot;

/// Prefix of every human-readable label this backend produces.
pub const DB_NAME: &str = "Influx 2.x";

/// Name of the format in the generator registry.
pub const FORMAT: &str = "influx_2";

const QUERY_METHOD: &str = "POST";
const QUERY_PATH: &str = "/api/v2/query";

/// State shared by the devops and IoT generators of this backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct BaseGenerator;

impl BaseGenerator {
    pub fn generate_empty_query(&self) -> Query {
        Query::default()
    }

    /// Turn `q` into a Flux query request carrying `flux` as both raw query and body.
    pub fn fill_in_query(&self, q: &mut Query, label: String, description: String, flux: String) {
        q.human_label = label;
        q.human_description = description;
        q.method = QUERY_METHOD.to_owned();
        q.path = QUERY_PATH.to_owned();
        q.body = flux.clone();
        q.raw_query = flux;
    }

    /// A devops generator over `interval` for `scale` hosts.
    pub fn new_devops(&self, interval: TimeInterval, scale: usize, rng: GoRand) -> Result<Devops> {
        let core = uses::devops::Core::new(interval, scale, rng)?;
        Ok(Devops::new(*self, core))
    }

    /// An IoT generator over `interval` for `scale` trucks.
    pub fn new_iot(&self, interval: TimeInterval, scale: usize, rng: GoRand) -> Result<Iot> {
        let core = uses::iot::Core::new(interval, scale, rng)?;
        Ok(Iot::new(*self, core))
    }
}

/// `(r.<attr> == 'v1' or r.<attr> == 'v2' ...)`.
///
/// # Panics
///
/// If `values` is empty; callers validate tag counts before building a predicate.
fn tag_disjunction<S: AsRef<str>>(attr: &str, values: &[S]) -> String {
    assert!(!values.is_empty(), "no values for r.{attr} predicate");
    let terms: Vec<_> = values
        .iter()
        .map(|v| format!("r.{attr} == '{}'", v.as_ref()))
        .collect();
    format!("({})", terms.join(" or "))
}

/// `(r._field == 'f1' or r._field == 'f2' ...)`.
///
/// # Panics
///
/// If `fields` is empty.
fn field_disjunction(fields: &[&str]) -> String {
    tag_disjunction("_field", fields)
}
