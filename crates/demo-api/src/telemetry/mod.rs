//! Tracing subscriber setup for the service.
//!
//! Production writes one JSON object per line; any other environment writes
//! human-readable lines. Log level is configurable via `LOG_LEVEL` (default:
//! `info`) and `RUST_LOG` takes precedence when set.

pub mod init;

pub use init::init_telemetry;
