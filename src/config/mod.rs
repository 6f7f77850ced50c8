//! Producer configuration: CLI arguments and their validated form.

pub mod duration;

use anyhow::Context;
use clap::Args;
use event_generator::EventMix;
use rand::Rng;
use std::time::Duration;

pub use duration::parse_duration;

/// Topic used when neither `--topic` nor `KAFKA_TOPIC` is given.
pub const DEFAULT_TOPIC: &str = "ecommerce-events";
/// Broker list used when neither `--bootstrap-servers` nor `KAFKA_BOOTSTRAP_SERVERS` is given.
pub const DEFAULT_BOOTSTRAP_SERVERS: &str = "kafka:9093";

/// Command-line arguments of the event producer.
#[derive(Args, Clone, Debug)]
pub struct ProducerArgs {
    /// Minimum seconds between events
    #[arg(long, default_value_t = 1.0)]
    pub rate_min: f64,

    /// Maximum seconds between events
    #[arg(long, default_value_t = 5.0)]
    pub rate_max: f64,

    /// Maximum number of events to produce (default: unlimited)
    #[arg(long)]
    pub max_events: Option<u64>,

    /// Kafka topic name
    #[arg(long, env = "KAFKA_TOPIC", default_value = DEFAULT_TOPIC)]
    pub topic: String,

    /// Kafka bootstrap servers (comma-separated)
    #[arg(long, env = "KAFKA_BOOTSTRAP_SERVERS", default_value = DEFAULT_BOOTSTRAP_SERVERS)]
    pub bootstrap_servers: String,

    /// Random seed for reproducible event content (timestamps still follow the clock)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Event type weights, e.g. "view=6,add_to_cart=3,purchase=1" (default: uniform)
    #[arg(long)]
    pub event_mix: Option<EventMix>,

    /// Create the topic before producing if it doesn't exist
    #[arg(long)]
    pub create_topic: bool,

    /// Partition count used with --create-topic
    #[arg(long, default_value_t = 3)]
    pub partitions: i32,

    /// Timeout for the startup broker reachability check (e.g. "500ms", "10s")
    #[arg(long, default_value = "10s")]
    pub connect_timeout: String,

    /// Timeout for a single event to be acknowledged by the broker
    #[arg(long, default_value = "10s")]
    pub delivery_timeout: String,
}

/// Bounds of the random pause between two events, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateRange {
    min: f64,
    max: f64,
}

impl RateRange {
    pub fn new(min: f64, max: f64) -> anyhow::Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            anyhow::bail!("rate-min and rate-max must be finite numbers (got {min} and {max})");
        }
        if min < 0.0 || max < 0.0 {
            anyhow::bail!("Rate values must be non-negative (got rate-min={min}, rate-max={max})");
        }
        if min > max {
            anyhow::bail!("rate-min must be <= rate-max (got rate-min={min}, rate-max={max})");
        }
        if Duration::try_from_secs_f64(max).is_err() {
            anyhow::bail!("rate-max is too large to use as a delay (got {max})");
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Draw a delay uniformly from `[min, max]`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return Duration::from_secs_f64(self.min);
        }
        Duration::from_secs_f64(rng.gen_range(self.min..=self.max))
    }
}

/// Validated producer configuration.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    pub topic: String,
    pub bootstrap_servers: String,
    pub rate: RateRange,
    pub max_events: Option<u64>,
    pub seed: Option<u64>,
    pub event_mix: EventMix,
    pub create_topic: bool,
    pub partitions: i32,
    pub connect_timeout: Duration,
    pub delivery_timeout: Duration,
}

/// The part of the configuration the produce loop needs.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub topic: String,
    pub rate: RateRange,
    pub max_events: Option<u64>,
}

impl ProducerArgs {
    /// Validate the arguments. Nothing here touches the network.
    pub fn into_config(self) -> anyhow::Result<ProducerConfig> {
        let rate = RateRange::new(self.rate_min, self.rate_max)?;

        if self.max_events == Some(0) {
            anyhow::bail!("max-events must be at least 1 (omit it to run indefinitely)");
        }
        if self.topic.trim().is_empty() {
            anyhow::bail!("Topic name must not be empty");
        }
        if self.bootstrap_servers.trim().is_empty() {
            anyhow::bail!("Bootstrap servers must not be empty");
        }
        if self.partitions < 1 {
            anyhow::bail!("partitions must be positive (got {})", self.partitions);
        }

        let connect_timeout = parse_duration(&self.connect_timeout)
            .with_context(|| format!("Invalid connect-timeout '{}'", self.connect_timeout))?;
        let delivery_timeout = parse_duration(&self.delivery_timeout)
            .with_context(|| format!("Invalid delivery-timeout '{}'", self.delivery_timeout))?;
        if connect_timeout.is_zero() || delivery_timeout.is_zero() {
            anyhow::bail!("connect-timeout and delivery-timeout must be greater than zero");
        }

        Ok(ProducerConfig {
            topic: self.topic,
            bootstrap_servers: self.bootstrap_servers,
            rate,
            max_events: self.max_events,
            seed: self.seed,
            event_mix: self.event_mix.unwrap_or_default(),
            create_topic: self.create_topic,
            partitions: self.partitions,
            connect_timeout,
            delivery_timeout,
        })
    }
}

impl ProducerConfig {
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            topic: self.topic.clone(),
            rate: self.rate,
            max_events: self.max_events,
        }
    }
}
