use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Compact lines on stderr, filtered by `RUST_LOG` (default `warn`).
/// Stdout carries only the query reports.
pub fn init_logger() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
