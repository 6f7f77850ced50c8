//! Produce loop behaviour against `RecordingSink`.

use chrono::DateTime;
use ecommerce_events::testing::{RecordedEvent, RecordingSink};
use ecommerce_events::{produce_events, LoopConfig, RateRange, StopReason};
use event_generator::{EventGenerator, EventMix, EventType, PRODUCTS};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::broadcast;

const TOPIC: &str = "ecommerce-events";

fn loop_config(rate_min: f64, rate_max: f64, max_events: Option<u64>) -> LoopConfig {
    LoopConfig {
        topic: TOPIC.to_string(),
        rate: RateRange::new(rate_min, rate_max).unwrap(),
        max_events,
    }
}

fn decode(event: &RecordedEvent) -> serde_json::Value {
    serde_json::from_slice(&event.payload).expect("payload should be JSON")
}

#[tokio::test]
async fn test_publishes_exactly_max_events() {
    let sink = RecordingSink::new();
    let mut generator = EventGenerator::new();
    let (_tx, rx) = broadcast::channel(1);

    let metrics = produce_events(&sink, &mut generator, &loop_config(0.0, 0.0, Some(25)), rx).await;

    assert_eq!(metrics.events_published, 25);
    assert_eq!(metrics.publish_failures, 0);
    assert_eq!(metrics.stop_reason, StopReason::LimitReached);
    assert_eq!(sink.events().len(), 25);
    assert_eq!(sink.attempts(), 25);
    assert_eq!(generator.generated(), 25);
}

#[tokio::test]
async fn test_published_payloads_are_valid_events() {
    let sink = RecordingSink::new();
    let mut generator = EventGenerator::new();
    let (_tx, rx) = broadcast::channel(1);

    produce_events(&sink, &mut generator, &loop_config(0.0, 0.0, Some(100)), rx).await;

    let mut user_ids = HashSet::new();
    let mut previous_timestamp = None;

    for recorded in sink.events() {
        assert_eq!(recorded.topic, TOPIC);

        let value = decode(&recorded);
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 5);

        let event_type = object["event_type"].as_str().unwrap();
        assert!(event_type.parse::<EventType>().is_ok(), "event_type {event_type}");

        let amount = object["amount"].as_f64().unwrap();
        assert!((10.0..=100.0).contains(&amount), "amount {amount}");

        let product = object["product"].as_str().unwrap();
        assert!(PRODUCTS.contains(&product));

        let user_id = object["user_id"].as_str().unwrap();
        let parsed = tokio_test::assert_ok!(user_id.parse::<uuid::Uuid>());
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(recorded.key, user_id);
        assert!(user_ids.insert(user_id.to_string()), "duplicate user_id {user_id}");

        let timestamp = DateTime::parse_from_rfc3339(object["timestamp"].as_str().unwrap())
            .expect("timestamp should be RFC 3339");
        if let Some(previous) = previous_timestamp {
            assert!(previous <= timestamp);
        }
        previous_timestamp = Some(timestamp);
    }
}

#[tokio::test]
async fn test_fixed_rate_spaces_publishes() {
    let sink = RecordingSink::new();
    let mut generator = EventGenerator::new();
    let (_tx, rx) = broadcast::channel(1);

    produce_events(&sink, &mut generator, &loop_config(0.1, 0.1, Some(4)), rx).await;

    let events = sink.events();
    assert_eq!(events.len(), 4);
    for pair in events.windows(2) {
        let gap = pair[1].received_at.duration_since(pair[0].received_at);
        assert!(gap >= Duration::from_millis(100), "gap {gap:?}");
    }
}

#[tokio::test]
async fn test_failures_are_counted_and_not_retried() {
    let sink = RecordingSink::failing_first(2);
    let mut generator = EventGenerator::new();
    let (_tx, rx) = broadcast::channel(1);

    let metrics = produce_events(&sink, &mut generator, &loop_config(0.0, 0.0, Some(3)), rx).await;

    assert_eq!(metrics.events_published, 3);
    assert_eq!(metrics.publish_failures, 2);
    assert_eq!(sink.attempts(), 5);
    // Every attempt carries a freshly generated event
    assert_eq!(generator.generated(), 5);
}

#[tokio::test]
async fn test_shutdown_interrupts_sleep() {
    let sink = RecordingSink::new();
    let mut generator = EventGenerator::new();
    let (tx, rx) = broadcast::channel(1);
    let config = loop_config(30.0, 30.0, None);

    let trigger = async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        tx.send(()).unwrap();
    };

    let (metrics, _) = tokio::time::timeout(Duration::from_secs(5), async {
        tokio::join!(produce_events(&sink, &mut generator, &config, rx), trigger)
    })
    .await
    .expect("loop should stop after the shutdown signal");

    assert_eq!(metrics.stop_reason, StopReason::Interrupted);
    assert_eq!(metrics.events_published, 1);
    assert_eq!(sink.events().len(), 1);
}

#[tokio::test]
async fn test_dropped_shutdown_sender_keeps_running() {
    let sink = RecordingSink::new();
    let mut generator = EventGenerator::new();
    let (tx, rx) = broadcast::channel::<()>(1);
    drop(tx);

    let metrics = produce_events(&sink, &mut generator, &loop_config(0.0, 0.01, Some(3)), rx).await;

    assert_eq!(metrics.stop_reason, StopReason::LimitReached);
    assert_eq!(metrics.events_published, 3);
}

#[tokio::test]
async fn test_event_mix_is_respected() {
    let sink = RecordingSink::new();
    let mix: EventMix = "purchase=1".parse().unwrap();
    let mut generator = EventGenerator::seeded(42).with_mix(mix).unwrap();
    let (_tx, rx) = broadcast::channel(1);

    produce_events(&sink, &mut generator, &loop_config(0.0, 0.0, Some(20)), rx).await;

    for recorded in sink.events() {
        assert_eq!(decode(&recorded)["event_type"], "purchase");
    }
}
