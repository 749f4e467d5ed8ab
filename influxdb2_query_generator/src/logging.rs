//! Logging flags shared by every subcommand. Logs always go to stderr, stdout carries query
//! output.

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

/// CLI config for the logging related subset of options.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LoggingConfig {
    /// Logs: filter directive
    ///
    /// Configures log severity level filter, by target.
    ///
    /// Simplest options: error, warn, info, debug, trace
    ///
    /// Overridden by `-v`.
    #[clap(long = "log-filter", env = "LOG_FILTER", global = true, action)]
    pub(crate) log_filter: Option<String>,

    /// Logs: filter short-hand
    ///
    /// -v   'info'
    ///
    /// -vv  'debug'
    ///
    /// -vvv 'trace'
    #[clap(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count
    )]
    pub(crate) log_verbose_count: u8,
}

impl LoggingConfig {
    /// The effective filter directive, `-v` winning over `--log-filter`.
    pub(crate) fn filter(&self) -> String {
        match self.log_verbose_count {
            0 => self
                .log_filter
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
            1 => "info".to_owned(),
            2 => "debug".to_owned(),
            _ => "trace".to_owned(),
        }
    }

    /// Install a global stderr subscriber.
    pub(crate) fn install_global_subscriber(&self) -> Result<(), anyhow::Error> {
        let filter = EnvFilter::try_new(self.filter())?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))
    }
}
