//! Test support for the produce loop
//!
//! `RecordingSink` stands in for Kafka: it keeps every published payload
//! together with the time it arrived, and can be told to fail a number of
//! publishes first.

use async_trait::async_trait;
use ecommerce_kafka_producer::Delivery;
use event_generator::Event;
use std::sync::Mutex;
use std::time::Instant;

use crate::sink::EventSink;

/// One event accepted by a `RecordingSink`.
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub topic: String,
    pub key: String,
    /// JSON payload, exactly as it would be sent to Kafka
    pub payload: Vec<u8>,
    pub received_at: Instant,
}

#[derive(Default)]
struct SinkState {
    events: Vec<RecordedEvent>,
    attempts: u64,
    failures_left: u64,
}

/// In-memory `EventSink` for tests.
#[derive(Default)]
pub struct RecordingSink {
    state: Mutex<SinkState>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the first `count` publishes before accepting events.
    pub fn failing_first(count: u64) -> Self {
        Self {
            state: Mutex::new(SinkState {
                failures_left: count,
                ..SinkState::default()
            }),
        }
    }

    /// Events accepted so far.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.state.lock().unwrap().events.clone()
    }

    /// Publish attempts so far, failed ones included.
    pub fn attempts(&self) -> u64 {
        self.state.lock().unwrap().attempts
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn publish(&self, topic: &str, event: &Event) -> anyhow::Result<Delivery> {
        let payload = event.to_json()?;

        let mut state = self.state.lock().unwrap();
        state.attempts += 1;
        if state.failures_left > 0 {
            state.failures_left -= 1;
            anyhow::bail!("injected publish failure");
        }

        let offset = state.events.len() as i64;
        state.events.push(RecordedEvent {
            topic: topic.to_string(),
            key: event.user_id().to_string(),
            payload,
            received_at: Instant::now(),
        });

        Ok(Delivery {
            partition: 0,
            offset,
        })
    }
}
