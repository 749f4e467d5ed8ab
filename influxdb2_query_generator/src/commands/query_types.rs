use std::io::{self, Write};

use clap::Parser;
use influxdb2_query_generator::query_types::{self, QUERY_TYPES, QueryType};
use influxdb2_query_generator::uses::UseCase;

#[derive(Debug, Parser)]
pub(crate) struct Config {
    /// Only list the query types of this use case
    #[clap(long = "use-case", env = "INFLUX2_QUERY_GEN_USE_CASE", value_enum, action)]
    use_case: Option<UseCase>,
}

pub(crate) fn command(config: Config) -> Result<(), anyhow::Error> {
    let selected: Vec<&QueryType> = match config.use_case {
        Some(use_case) => query_types::for_use_case(use_case).collect(),
        None => QUERY_TYPES.iter().collect(),
    };
    list(&selected, io::stdout().lock())?;
    Ok(())
}

fn list<W: Write>(query_types: &[&QueryType], mut out: W) -> io::Result<()> {
    let width = query_types.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for t in query_types {
        writeln!(
            out,
            "{:width$}  {:6}  {}",
            t.name,
            t.use_case.as_str(),
            t.description
        )?;
    }
    out.flush()
}
