//! Tracing setup shared by every subcommand.
//!
//! Events go to a daily file under `~/.mgcbsync/logs` named after the
//! subcommand, and optionally to stderr. A log directory that cannot be used
//! only disables the file sink; it never stops a sync.

use crate::error::{MgcbError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mgcbsync/logs")
}

/// Daily appender writing `<component>.<date>` files into `dir`.
pub fn file_appender(dir: &Path, component: &str) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir).map_err(|e| MgcbError::io(dir, e))?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(component)
        .build(dir)?;
    Ok(appender)
}

pub fn init_logging(component: &str, to_stderr: bool) -> Option<WorkerGuard> {
    init_logging_in(&log_dir(), component, to_stderr)
}

/// Install the global subscriber. The returned guard flushes the file sink on
/// drop and is `None` when file logging could not be set up.
pub fn init_logging_in(dir: &Path, component: &str, to_stderr: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match file_appender(dir, component) {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("warning: file logging disabled: {}", e);
            (None, None)
        }
    };

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_appender_creates_dir() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("nested/logs");

        assert!(file_appender(&dir, "sync").is_ok());
        assert!(dir.is_dir());
    }

    #[test]
    fn test_file_appender_rejects_unusable_dir() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("not_a_dir");
        fs::write(&blocker, b"").unwrap();

        let err = file_appender(&blocker.join("logs"), "sync").unwrap_err();
        assert!(matches!(err, MgcbError::Io { .. }));
    }

    #[test]
    fn test_init_without_usable_dir_does_not_panic() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("home");
        fs::write(&blocker, b"").unwrap();

        let guard = init_logging_in(&blocker.join(".mgcbsync/logs"), "sync", false);
        assert!(guard.is_none());
        tracing::info!("still usable after a failed file sink");
    }
}
