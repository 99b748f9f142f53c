//! Log subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Interactive terminal: colors and timestamps.
    Terminal,
    /// Function runtime: the log collector adds timestamps and renders no ANSI.
    Runtime,
}

/// Install the global subscriber. `RUST_LOG` wins over the defaults.
pub fn init_logging(format: LogFormat, verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("postdrop=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("postdrop=info,warn"))
    };

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Terminal => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init(),
        LogFormat::Runtime => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .without_time(),
            )
            .init(),
    }
}
