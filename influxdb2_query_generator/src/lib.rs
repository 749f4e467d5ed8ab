//! Generates benchmark queries in the InfluxDB 2.x Flux dialect for the devops and IoT
//! workloads of the time series benchmark suite.
//!
//! A run is fully determined by its simulation interval, its scale and its seed: the same
//! three inputs always yield byte-identical queries.

pub mod config;
pub mod error;
pub mod flux;
pub mod generator;
pub mod go_rand;
pub mod interval;
pub mod query;
pub mod query_types;
pub mod uses;

pub use error::{Error, Result};
