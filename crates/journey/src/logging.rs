//! Tracing subscriber setup for the `journey` binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `level` when set. Stdout is left free for
/// the report path printed after a successful run.
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if json_format {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Set up logging from the `[logging]` section once the config has loaded.
pub fn init_from_config(config: &journey_core::Config) {
    init(&config.logging.level, config.logging.format == "json");
}

