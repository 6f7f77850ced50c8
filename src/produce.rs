//! The event produce loop.

use anyhow::Context;
use ecommerce_kafka_producer::{KafkaEventProducer, ProducerSettings};
use event_generator::EventGenerator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

use crate::config::{LoopConfig, ProducerConfig};
use crate::metrics::{ProduceMetrics, StopReason};
use crate::shutdown::{setup_shutdown_handler, shutdown_requested};
use crate::sink::EventSink;

/// Connect to Kafka and produce events until the limit is reached or a
/// shutdown signal arrives.
///
/// Failing to reach the brokers is fatal and happens before any event is
/// built. The producer is flushed and closed on every exit path of the loop.
pub async fn run(config: ProducerConfig) -> anyhow::Result<ProduceMetrics> {
    let settings = ProducerSettings::new(&config.bootstrap_servers)
        .with_connect_timeout(config.connect_timeout)
        .with_delivery_timeout(config.delivery_timeout);

    let producer = KafkaEventProducer::connect(settings)
        .await
        .with_context(|| format!("Failed to connect to Kafka at {}", config.bootstrap_servers))?;

    if config.create_topic {
        producer
            .create_topic_if_not_exists(&config.topic, config.partitions)
            .await
            .with_context(|| format!("Failed to create topic '{}'", config.topic))?;
    }

    let generator = match config.seed {
        Some(seed) => EventGenerator::seeded(seed),
        None => EventGenerator::new(),
    };
    let mut generator = generator.with_mix(config.event_mix)?;

    let shutdown = setup_shutdown_handler();
    let metrics = produce_events(&producer, &mut generator, &config.loop_config(), shutdown).await;

    producer
        .close()
        .await
        .context("Failed to flush Kafka producer")?;

    Ok(metrics)
}

/// Publish generated events to `sink` until `max_events` events have been
/// published or `shutdown` fires.
///
/// Failed publishes are logged and counted but never retried, and they do
/// not count towards `max_events`. There is no pause after the last event.
pub async fn produce_events<S>(
    sink: &S,
    generator: &mut EventGenerator,
    config: &LoopConfig,
    mut shutdown: broadcast::Receiver<()>,
) -> ProduceMetrics
where
    S: EventSink + ?Sized,
{
    let start_time = Instant::now();
    let mut metrics = ProduceMetrics::default();
    let mut rng = StdRng::from_entropy();

    info!("Starting to produce events to topic '{}'", config.topic);
    info!(
        "Rate: {}-{} seconds between events",
        config.rate.min(),
        config.rate.max()
    );
    match config.max_events {
        Some(max) => info!("Max events: {max}"),
        None => info!("Running indefinitely (Ctrl+C to stop)"),
    }

    let limit_reached =
        |metrics: &ProduceMetrics| config.max_events.is_some_and(|max| metrics.events_published >= max);

    let stop_reason = loop {
        if limit_reached(&metrics) {
            break StopReason::LimitReached;
        }

        let event = generator.next_event();
        debug!("Generated event: {event:?}");

        let result = tokio::select! {
            _ = shutdown_requested(&mut shutdown) => break StopReason::Interrupted,
            result = sink.publish(&config.topic, &event) => result,
        };

        match result {
            Ok(delivery) => {
                metrics.events_published += 1;
                info!(
                    "[{}] Event sent: {:<12} | User: {}... | Product: {:<12} | Amount: ${:.2} | Partition: {}, Offset: {}",
                    metrics.events_published,
                    event.event_type(),
                    event.short_user_id(),
                    event.product(),
                    event.amount(),
                    delivery.partition,
                    delivery.offset
                );
            }
            Err(e) => {
                metrics.publish_failures += 1;
                error!("Failed to send event: {e:#}");
            }
        }

        // Skip the pause once the last event is out
        if limit_reached(&metrics) {
            break StopReason::LimitReached;
        }

        let delay = config.rate.sample(&mut rng);
        tokio::select! {
            _ = shutdown_requested(&mut shutdown) => break StopReason::Interrupted,
            _ = tokio::time::sleep(delay) => {}
        }
    };

    metrics.stop_reason = stop_reason;
    metrics.total_duration = start_time.elapsed();

    info!(
        "Stopped ({}): {} events published, {} failed, in {:?} ({:.2} events/sec)",
        metrics.stop_reason,
        metrics.events_published,
        metrics.publish_failures,
        metrics.total_duration,
        metrics.events_per_second()
    );

    metrics
}
