use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use influxdb2_query_generator::config::GeneratorConfig;
use influxdb2_query_generator::generator::{self, UseCaseGenerator};
use influxdb2_query_generator::query::NumberedQuery;
use influxdb2_query_generator::query_types::QueryType;
use tracing::info;

#[derive(Debug, Parser)]
pub(crate) struct Config {
    #[clap(flatten)]
    generator: GeneratorConfig,
}

pub(crate) fn command(config: Config) -> Result<(), anyhow::Error> {
    let config = config.generator;
    config.validate()?;
    let query_type = config.query_type()?;

    let seed = config.effective_seed();
    if config.seed == 0 {
        info!(seed, "no seed given, using one derived from the clock");
    }

    let params = config.params(seed)?;
    let mut generator = generator::new_generator(&config.format, config.use_case, &params)?;

    match &config.file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            write_queries(&mut generator, query_type, config.queries, BufWriter::new(file))
                .with_context(|| format!("writing queries to {}", path.display()))
        }
        None => write_queries(
            &mut generator,
            query_type,
            config.queries,
            BufWriter::new(io::stdout().lock()),
        ),
    }
}

/// Emit `count` queries of `query_type` as JSON lines, numbered from 1.
fn write_queries<W: Write>(
    generator: &mut UseCaseGenerator,
    query_type: &QueryType,
    count: u64,
    mut out: W,
) -> Result<(), anyhow::Error> {
    for id in 1..=count {
        let mut q = generator.generate_empty_query();
        query_type
            .fill(generator, &mut q)
            .with_context(|| format!("generating query {id} of type {}", query_type.name))?;
        serde_json::to_writer(&mut out, &NumberedQuery { id, query: &q })?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    info!(count, query_type = query_type.name, "generated queries");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use influxdb2_query_generator::generator::GeneratorParams;
    use influxdb2_query_generator::interval::TimeInterval;
    use influxdb2_query_generator::query_types;
    use influxdb2_query_generator::uses::UseCase;

    const HOUR_NS: i64 = 3_600_000_000_000;

    fn run(query_type: &str, use_case: UseCase, scale: usize, count: u64) -> anyhow::Result<String> {
        let params = GeneratorParams {
            interval: TimeInterval::from_unix_nanos(0, 30 * HOUR_NS).unwrap(),
            scale,
            seed: 123,
        };
        let mut generator = generator::new_generator("influx_2", use_case, &params).unwrap();
        let query_type = query_types::find(query_type).unwrap();
        let mut out = vec![];
        write_queries(&mut generator, query_type, count, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test_log::test]
    fn writes_numbered_json_lines() {
        let out = run("high-cpu-1", UseCase::Devops, 10, 3).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line["id"], i as u64 + 1);
            assert_eq!(line["method"], "POST");
            assert_eq!(line["path"], "/api/v2/query");
            assert_eq!(line["humanLabel"], "Influx 2.x CPU over threshold, 1 host(s)");
            assert_eq!(line["body"], line["rawQuery"]);
        }
        assert_ne!(lines[0]["body"], lines[1]["body"]);
    }

    #[test]
    fn same_seed_same_output() {
        assert_eq!(
            run("long-daily-sessions", UseCase::Iot, 5, 4).unwrap(),
            run("long-daily-sessions", UseCase::Iot, 5, 4).unwrap()
        );
    }

    #[test_log::test]
    fn generation_errors_abort() {
        // one host cannot satisfy an eight host query
        let err = run("cpu-max-all-8", UseCase::Devops, 1, 2).unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "generating query 1 of type cpu-max-all-8: \
             number of hosts (8) larger than total hosts. See --scale (1)"
        );
    }
}
