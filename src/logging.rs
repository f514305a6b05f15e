//! File-backed tracing setup. The terminal belongs to the UI, so nothing is
//! ever written to stdout or stderr while the dashboard runs.

use std::fs;
use std::path::Path;

use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_FILE_PREFIX: &str = "botdash.log";

/// Install a global subscriber writing daily-rotated files under `dir`.
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;

    let file_appender = rolling::daily(dir, LOG_FILE_PREFIX);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!(
        path = %dir.display(),
        "Tracing initialized with file output. Filter configured via RUST_LOG env var."
    );
    Ok(())
}
