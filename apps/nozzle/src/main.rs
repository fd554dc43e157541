use anyhow::{Context, Result};
use clap::Parser;
use firehose_nozzle::Config;
use gce_metadata_client::{MetadataClient, MetadataClientConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "firehose-nozzle", about = "Firehose to Stackdriver nozzle")]
struct Args {
    /// Emit logs as JSON lines.
    #[arg(long, env = "NOZZLE_LOG_JSON", default_value_t = false)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let metadata = MetadataClient::new(MetadataClientConfig::from_env())
        .context("build metadata client")?;
    let config = Config::from_env(&metadata)
        .await
        .context("load nozzle configuration")?;

    let summary = serde_json::Value::Object(config.redacted_summary());
    info!(
        config = %summary,
        nozzle_id = %config.nozzle.id,
        nozzle_name = %config.nozzle.name,
        nozzle_zone = %config.nozzle.zone,
        "nozzle configuration loaded"
    );
    if let Some(filter) = config.event_filter.as_ref() {
        for rule in &filter.blacklist {
            info!(rule = %rule, "event blacklist rule");
        }
        for rule in &filter.whitelist {
            info!(rule = %rule, "event whitelist rule");
        }
    }
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
