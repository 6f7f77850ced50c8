//! Kafka producer publishing JSON-encoded ecommerce events.

use event_generator::Event;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::ClientConfig;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::KafkaProducerError;

/// Default time allowed for the startup reachability check.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default time allowed for a single event to be acknowledged.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);
/// Upper bound on the final flush when the producer is closed.
pub const FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for `KafkaEventProducer`.
#[derive(Debug, Clone)]
pub struct ProducerSettings {
    /// Comma-separated broker list, e.g. "kafka:9093"
    pub bootstrap_servers: String,
    pub connect_timeout: Duration,
    pub delivery_timeout: Duration,
}

impl ProducerSettings {
    pub fn new(bootstrap_servers: impl Into<String>) -> Self {
        Self {
            bootstrap_servers: bootstrap_servers.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    /// librdkafka configuration for the event producer.
    ///
    /// Every send waits for all in-sync replicas (`acks=all`), payloads are
    /// gzip-compressed and librdkafka retries a failed send up to 3 times
    /// within the delivery timeout.
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.bootstrap_servers)
            .set("acks", "all")
            .set("compression.type", "gzip")
            .set("message.send.max.retries", "3")
            .set(
                "message.timeout.ms",
                self.delivery_timeout.as_millis().to_string(),
            );
        config
    }
}

/// Where an acknowledged event landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub partition: i32,
    pub offset: i64,
}

/// Kafka producer for ecommerce events.
///
/// Events are encoded as JSON and keyed by their user id. `publish` waits
/// for the broker acknowledgment before returning.
pub struct KafkaEventProducer {
    producer: FutureProducer,
    settings: ProducerSettings,
}

impl KafkaEventProducer {
    /// Create a producer and verify that the brokers are reachable.
    ///
    /// Reachability is checked by fetching cluster metadata within the
    /// configured connect timeout; an unreachable cluster is an error.
    pub async fn connect(settings: ProducerSettings) -> Result<Self, KafkaProducerError> {
        let producer: FutureProducer = settings.client_config().create()?;

        let probe = producer.clone();
        let timeout = settings.connect_timeout;
        let metadata =
            tokio::task::spawn_blocking(move || probe.client().fetch_metadata(None, timeout))
                .await?
                .map_err(|source| KafkaProducerError::Connect {
                    servers: settings.bootstrap_servers.clone(),
                    source,
                })?;

        info!(
            "Connected to Kafka at {} ({} broker(s), {} topic(s))",
            settings.bootstrap_servers,
            metadata.brokers().len(),
            metadata.topics().len()
        );

        Ok(Self { producer, settings })
    }

    /// Create a Kafka topic with the given partition count if it doesn't exist.
    pub async fn create_topic_if_not_exists(
        &self,
        topic: &str,
        partitions: i32,
    ) -> Result<(), KafkaProducerError> {
        let admin_client: AdminClient<DefaultClientContext> = ClientConfig::new()
            .set("bootstrap.servers", &self.settings.bootstrap_servers)
            .create()?;

        let new_topic = NewTopic::new(topic, partitions, TopicReplication::Fixed(1));
        let opts = AdminOptions::new().operation_timeout(Some(self.settings.connect_timeout));

        let results = admin_client
            .create_topics(&[new_topic], &opts)
            .await
            .map_err(|e| KafkaProducerError::TopicCreation(format!("Failed to create topic: {e}")))?;

        for result in results {
            match result {
                Ok(topic_name) => {
                    info!("Topic '{topic_name}' created with {partitions} partition(s)");
                }
                Err((topic_name, err)) => {
                    let err_str = err.to_string();
                    if err_str.contains("already exists") || err_str.contains("TopicExistsException")
                    {
                        info!("Topic '{topic_name}' already exists");
                    } else {
                        return Err(KafkaProducerError::TopicCreation(format!(
                            "Failed to create topic {topic_name}: {err}"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Publish one event and wait for its acknowledgment.
    pub async fn publish(&self, topic: &str, event: &Event) -> Result<Delivery, KafkaProducerError> {
        let payload = event.to_json()?;
        let key = event.user_id().to_string();

        let record = FutureRecord::to(topic).key(&key).payload(&payload);

        let (partition, offset) = self
            .producer
            .send(record, self.settings.delivery_timeout)
            .await
            .map_err(|(source, _)| KafkaProducerError::Delivery {
                topic: topic.to_string(),
                source,
            })?;

        debug!(
            "Published event {} to {topic} [{partition}] @ {offset}: {}",
            key,
            String::from_utf8_lossy(&payload)
        );
        Ok(Delivery { partition, offset })
    }

    /// Flush outstanding messages and drop the producer.
    pub async fn close(self) -> Result<(), KafkaProducerError> {
        let producer = self.producer;
        let flushed = tokio::task::spawn_blocking(move || producer.flush(FLUSH_TIMEOUT)).await?;
        if let Err(e) = &flushed {
            warn!("Flushing Kafka producer failed: {e}");
        }
        flushed?;
        info!("Kafka producer closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = ProducerSettings::new("kafka:9093");
        assert_eq!(settings.bootstrap_servers, "kafka:9093");
        assert_eq!(settings.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(settings.delivery_timeout, DEFAULT_DELIVERY_TIMEOUT);
    }

    #[test]
    fn test_client_config() {
        let settings = ProducerSettings::new("localhost:9092")
            .with_delivery_timeout(Duration::from_millis(2500));
        let config = settings.client_config();

        assert_eq!(config.get("bootstrap.servers"), Some("localhost:9092"));
        assert_eq!(config.get("acks"), Some("all"));
        assert_eq!(config.get("compression.type"), Some("gzip"));
        assert_eq!(config.get("message.send.max.retries"), Some("3"));
        assert_eq!(config.get("message.timeout.ms"), Some("2500"));
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_broker_fails() {
        let settings = ProducerSettings::new("127.0.0.1:1")
            .with_connect_timeout(Duration::from_secs(2));

        let result = KafkaEventProducer::connect(settings).await;
        assert!(matches!(
            result,
            Err(KafkaProducerError::Connect { ref servers, .. }) if servers == "127.0.0.1:1"
        ));
    }
}
