use std::env;
use std::path::Path;

use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::PROJECT_NAME;

pub const LOG_FILE: &str = concat!(env!("CARGO_PKG_NAME"), ".log");

/// Route `tracing` output into `<data_dir>/registration.log`.
///
/// The terminal belongs to the TUI, so there is no console layer. Keep the
/// returned guard alive until shutdown, otherwise buffered lines are lost.
pub fn init(data_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(data_dir)?;

    let file_appender = tracing_appender::rolling::never(data_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::Layer::default()
        .with_target(false)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(non_blocking)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(guard)
}

/// `REGISTRATION_LOG_LEVEL`, then `RUST_LOG`, then a build-dependent default.
fn env_filter() -> EnvFilter {
    let var = format!("{}_LOG_LEVEL", PROJECT_NAME.as_str());
    let directive = env::var(&var)
        .or_else(|_| env::var(EnvFilter::DEFAULT_ENV))
        .unwrap_or_else(|_| default_level().to_string());
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(default_level()))
}

fn default_level() -> &'static str {
    #[cfg(debug_assertions)]
    let level = "info";

    #[cfg(not(debug_assertions))]
    let level = "warn";

    level
}
