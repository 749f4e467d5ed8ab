//! Entrypoint of the influxdb2_query_generator binary

use dotenvy::dotenv;

mod commands {
    pub(crate) mod bucket;
    pub(crate) mod generate;
    pub(crate) mod query_types;
}
mod logging;

enum ReturnCode {
    Failure = 1,
}

#[derive(Debug, clap::Parser)]
#[clap(
    name = "influxdb2_query_generator",
    version,
    about = "Benchmark query generator for InfluxDB 2.x",
    long_about = r#"Benchmark query generator for InfluxDB 2.x

Generates Flux queries for the devops and IoT workloads of the time series
benchmark suite, one JSON object per line.

Examples:
    # Generate 1000 queries for a 100 host devops data set
    influxdb2_query_generator generate --scale 100 --query-type cpu-max-all-8 --seed 123

    # List the available query types
    influxdb2_query_generator query-types

    # Recreate the benchmark bucket
    influxdb2_query_generator bucket --token my-token create --org-id 0123456789abcdef
"#
)]
struct Config {
    #[clap(flatten)]
    logging_config: logging::LoggingConfig,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, clap::Parser)]
enum Command {
    /// Generate benchmark queries
    Generate(commands::generate::Config),

    /// List the query types that can be generated
    QueryTypes(commands::query_types::Config),

    /// Manage buckets on an InfluxDB 2.x server
    Bucket(commands::bucket::Config),
}

fn main() -> Result<(), std::io::Error> {
    // load all environment variables from .env before doing anything
    load_dotenv();

    let config: Config = clap::Parser::parse();

    if let Err(e) = config.logging_config.install_global_subscriber() {
        eprintln!("Initializing logs failed: {e}");
        std::process::exit(ReturnCode::Failure as _);
    }

    match config.command {
        None => println!("command required, -h/--help for help"),
        Some(Command::Generate(config)) => {
            if let Err(e) = commands::generate::command(config) {
                eprintln!("Generate command failed: {e:#}");
                std::process::exit(ReturnCode::Failure as _)
            }
        }
        Some(Command::QueryTypes(config)) => {
            if let Err(e) = commands::query_types::command(config) {
                eprintln!("Query types command failed: {e:#}");
                std::process::exit(ReturnCode::Failure as _)
            }
        }
        Some(Command::Bucket(config)) => {
            let tokio_runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            if let Err(e) = tokio_runtime.block_on(commands::bucket::command(config)) {
                eprintln!("Bucket command failed: {e:#}");
                std::process::exit(ReturnCode::Failure as _)
            }
        }
    }

    Ok(())
}

/// Source the .env file before initialising the Config struct - this sets
/// any envs in the file, which the Config struct then uses.
///
/// Precedence is given to existing env variables.
fn load_dotenv() {
    match dotenv() {
        Ok(_) => {}
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            // Ignore this - a missing env file is not an error, defaults will
            // be applied when initialising the Config struct.
        }
        Err(e) => {
            eprintln!("FATAL Error loading config from: {e}");
            eprintln!("Aborting");
            std::process::exit(ReturnCode::Failure as _);
        }
    };
}
