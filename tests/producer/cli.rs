//! CLI behaviour of the `ecommerce-events` binary.

use std::process::{Command, Output};

/// Execute the ecommerce-events binary and return its output
fn execute_producer(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ecommerce-events"))
        .args(args)
        .env_remove("KAFKA_BOOTSTRAP_SERVERS")
        .env_remove("KAFKA_TOPIC")
        .env("RUST_LOG", "ecommerce_events=info")
        .output()
        .expect("failed to run ecommerce-events")
}

#[test]
fn test_unreachable_broker_exits_non_zero() {
    let output = execute_producer(&[
        "--bootstrap-servers",
        "127.0.0.1:1",
        "--connect-timeout",
        "2s",
        "--rate-min",
        "0",
        "--rate-max",
        "0",
        "--max-events",
        "1",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "stdout: {stdout}\nstderr: {stderr}");
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr.contains("Failed to connect to Kafka at 127.0.0.1:1"),
        "stderr: {stderr}"
    );
    assert!(!stdout.contains("Event sent"), "stdout: {stdout}");
}

#[test]
fn test_invalid_rates_fail_before_connecting() {
    let output = execute_producer(&["--rate-min", "5", "--rate-max", "1"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("rate-min must be <= rate-max"), "stderr: {stderr}");
    assert!(!stdout.contains("Connected to Kafka"), "stdout: {stdout}");
}

#[test]
fn test_help_lists_options() {
    let output = execute_producer(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    for flag in [
        "--rate-min",
        "--rate-max",
        "--max-events",
        "--topic",
        "--bootstrap-servers",
    ] {
        assert!(stdout.contains(flag), "missing {flag} in help: {stdout}");
    }
}
