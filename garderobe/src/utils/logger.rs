//! Logging Infrastructure
//!
//! Timestamped lines to the console and to a log file next to the
//! state file. `RUST_LOG` overrides the configured level.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default log file name inside the log directory
pub const LOG_FILE_NAME: &str = "garderobe.log";

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Log panics through tracing, then run the previously installed hook
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(target: "panic", message = %info, "panic occurred");
        previous(info);
    }));
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `log_dir` - Directory for the log file; `None` logs to the console only
///
/// The returned guard flushes the file writer when dropped, so keep it
/// alive until the process exits.
pub fn init_logger(level: &str, log_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    install_panic_hook();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_ansi(true)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stdout);

    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stdout_layer)
            .try_init()?;
        return Ok(None);
    };

    fs::create_dir_all(dir)?;
    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_writer(non_blocking_file);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!(path = %dir.join(LOG_FILE_NAME).display(), "Logging initialisiert");

    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_panic_hook_chains_to_previous() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }));
        install_panic_hook();

        let result = std::panic::catch_unwind(|| panic!("Testpanik"));

        let _ = std::panic::take_hook();
        std::panic::set_hook(original);

        assert!(result.is_err());
        assert!(CALLS.load(Ordering::SeqCst) >= 1);
    }
}
