//! Error types for the ecommerce Kafka producer.

use rdkafka::error::KafkaError;
use thiserror::Error;

/// Errors that can occur while talking to Kafka.
#[derive(Error, Debug)]
pub enum KafkaProducerError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] KafkaError),

    #[error("Failed to reach Kafka at {servers}: {source}")]
    Connect {
        servers: String,
        #[source]
        source: KafkaError,
    },

    #[error("Topic creation error: {0}")]
    TopicCreation(String),

    #[error("Event encoding error: {0}")]
    Encoding(#[from] event_generator::GeneratorError),

    #[error("Failed to deliver event to topic '{topic}': {source}")]
    Delivery {
        topic: String,
        #[source]
        source: KafkaError,
    },

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
