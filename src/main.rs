//! Command-line interface for ecommerce-events
//!
//! # Usage Examples
//!
//! ```bash
//! # Produce events every 0.5-2 seconds against a local broker
//! ecommerce-events --bootstrap-servers localhost:9092 --rate-min 0.5 --rate-max 2
//!
//! # Produce exactly 100 events
//! ecommerce-events --max-events 100
//! ```
//!
//! `KAFKA_BOOTSTRAP_SERVERS` and `KAFKA_TOPIC` are read when the matching
//! flags are absent. Logging follows `RUST_LOG`.

use clap::Parser;
use ecommerce_events::ProducerArgs;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "ecommerce_events=info,ecommerce_kafka_producer=info";

#[derive(Parser)]
#[command(name = "ecommerce-events")]
#[command(about = "Generate fake ecommerce events and send them to Kafka")]
#[command(after_help = "Examples:
  # Produce events with default rate (1-5 seconds)
  ecommerce-events

  # Produce exactly 100 events
  ecommerce-events --max-events 100

  # High load: 1000 events with 0.1-0.5 second intervals
  ecommerce-events --rate-min 0.1 --rate-max 0.5 --max-events 1000")]
struct Cli {
    #[command(flatten)]
    producer: ProducerArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = cli.producer.into_config()?;

    let metrics = ecommerce_events::run(config).await?;
    tracing::info!(
        "Produced {} events total ({} failed)",
        metrics.events_published,
        metrics.publish_failures
    );

    Ok(())
}
