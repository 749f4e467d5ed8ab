use anyhow::Context;
use clap::Parser;
use influxdb2_client::Client;
use secrecy::{ExposeSecret, Secret};
use tracing::info;
use url::Url;

#[derive(Debug, Parser)]
pub(crate) struct Config {
    #[clap(flatten)]
    server: ServerConfig,

    #[clap(subcommand)]
    action: Action,
}

#[derive(Debug, Parser)]
struct ServerConfig {
    /// The host URL of the InfluxDB 2.x server
    #[clap(
        short = 'H',
        long = "host",
        env = "INFLUX2_HOST_URL",
        default_value = "http://localhost:8086",
        global = true
    )]
    host_url: Url,

    /// The token for authentication with the InfluxDB 2.x server
    #[clap(long = "token", env = "INFLUX2_AUTH_TOKEN", global = true)]
    auth_token: Option<Secret<String>>,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// List the user buckets on the server
    List,

    /// Create a bucket, replacing any bucket of the same name
    Create {
        /// The organization that owns the bucket
        #[clap(long = "org-id", env = "INFLUX2_ORG_ID")]
        org_id: String,

        /// Name of the bucket
        #[clap(default_value = "benchmark")]
        name: String,
    },

    /// Delete a bucket by name
    Delete {
        /// Name of the bucket
        #[clap(default_value = "benchmark")]
        name: String,
    },
}

pub(crate) async fn command(config: Config) -> Result<(), anyhow::Error> {
    let host = config.server.host_url.as_str();
    let token = config
        .server
        .auth_token
        .as_ref()
        .map(|t| t.expose_secret().as_str())
        .unwrap_or_default();
    let client = Client::new(host, token);

    match config.action {
        Action::List => {
            let buckets = client
                .user_buckets()
                .await
                .with_context(|| format!("listing buckets on {host}"))?;
            for bucket in buckets {
                println!("{}\t{}", bucket.name, bucket.id);
            }
        }
        Action::Create { org_id, name } => {
            if client.remove_bucket_by_name(&name).await? {
                info!(%name, "removed existing bucket");
            }
            let bucket = client
                .create_bucket(&org_id, &name)
                .await
                .with_context(|| format!("creating bucket {name:?} in org {org_id}"))?;
            println!("{}\t{}", bucket.name, bucket.id);
        }
        Action::Delete { name } => {
            let removed = client
                .remove_bucket_by_name(&name)
                .await
                .with_context(|| format!("deleting bucket {name:?}"))?;
            if !removed {
                eprintln!("bucket {name:?} does not exist");
            }
        }
    }

    Ok(())
}
