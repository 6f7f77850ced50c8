//! Producer integration tests
//!
//! The produce loop is exercised against an in-memory sink; the CLI tests run
//! the real binary without a reachable broker.

mod cli;
mod event_loop;
