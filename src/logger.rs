use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the tracing subscriber.
///
/// Diagnostics go to stdout since the TUI owns stderr. `RUST_LOG` overrides
/// the defaults; debug builds log more than release builds.
pub fn init() -> anyhow::Result<()> {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(false),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env()?,
        )
        .init();

    Ok(())
}
