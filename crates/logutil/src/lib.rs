//! Utilities for logging.

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    HumanReadable,
}

fn env_filter(default_level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy()
}

/// Configure the global logger.
///
/// `default_level` applies when `RUST_LOG` isn't set. Failing to set the
/// global subscriber is reported on stderr and otherwise ignored.
pub fn configure_global_logger<W>(default_level: Level, format: LogFormat, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = FmtSubscriber::builder()
        .with_env_filter(env_filter(default_level))
        .with_writer(writer)
        .with_file(true)
        .with_line_number(true);

    let result = match format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
        LogFormat::HumanReadable => tracing::subscriber::set_global_default(builder.finish()),
    };

    if let Err(e) = result {
        eprintln!("Failed to set up global logger: {e}");
    }
}

/// Set up logging for tests, capturing output per test.
///
/// Safe to call from multiple tests.
pub fn init_test() {
    let _ = FmtSubscriber::builder()
        .with_env_filter(env_filter(Level::DEBUG))
        .with_test_writer()
        .with_file(true)
        .with_line_number(true)
        .try_init();
}
