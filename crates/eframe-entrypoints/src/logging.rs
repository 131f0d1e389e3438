//! Logging integration for eframe-entrypoints.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter`-driven fmt layer.
//! `profiling::scope!` markers in the application become tracing spans when the
//! `profiling` feature is on, so they show up in the same output.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug,eframe=warn,egui=warn,walkers=info,hyper_util=info,reqwest=info"
    } else {
        // Release builds default to INFO to avoid excessive logs.
        "info,eframe=warn"
    }
}

/// Build the filter from `RUST_LOG`, falling back to [`default_filter`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter()))
}

/// Initialize logging. Safe to call more than once; later calls are ignored.
pub fn setup_logging() {
    let fmt_layer = fmt::layer().with_filter(env_filter());
    let registry = tracing_subscriber::registry().with(fmt_layer);

    if registry.try_init().is_err() {
        tracing::debug!("Logging already initialized");
        return;
    }

    if cfg!(feature = "profiling") {
        tracing::info!("Logging initialized (profiling scopes emitted as tracing spans)");
    } else {
        tracing::info!("Logging initialized");
    }
}
