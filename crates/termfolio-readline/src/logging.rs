//! File logging, so the terminal only shows the portfolio.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use termfolio_infrastructure::FolioPaths;

/// Installs a daily rolling log file under the termfolio log directory.
///
/// Returns `None` (and logs nothing) when the directory is unusable.
pub fn init() -> Option<WorkerGuard> {
    let dir = FolioPaths::log_dir().ok()?;
    std::fs::create_dir_all(&dir).ok()?;

    let appender = tracing_appender::rolling::daily(&dir, "termfolio.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    tracing::info!("[Shell] Logging to {}", dir.display());
    Some(guard)
}
