//! course-api library: course and student domain, storage, service and HTTP layer.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod server;

use std::env;

/// Environment variable holding a `tracing_subscriber` filter directive.
pub const LOG_ENV: &str = "COURSE_API_LOG";

/// Install the global `tracing` subscriber. Safe to call more than once.
pub fn init_tracing() {
    let env_filter = env::var(LOG_ENV)
        .ok()
        .and_then(|value| tracing_subscriber::EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| tracing_subscriber::EnvFilter::new("info,tower_http=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
