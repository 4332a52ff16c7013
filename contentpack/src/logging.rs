//! Tracing subscriber setup.
//!
//! Installs a `fmt` subscriber on stderr, filtered by `RUST_LOG` or the
//! configured level, and optionally mirrors output to a log file through a
//! non-blocking appender.

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingSettings;

/// Keeps the file appender flushing until dropped.
///
/// Hold this for the lifetime of the program.
#[must_use]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Build the filter: `RUST_LOG` wins over the configured level.
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber.
///
/// Fails only if the log file's directory cannot be created. Installing a
/// second subscriber is ignored.
pub fn init_logging(settings: &LoggingSettings) -> io::Result<LoggingGuard> {
    let filter = build_filter(&settings.level);
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_timer(LocalTime::rfc_3339())
        .with_target(false);

    match &settings.file {
        Some(path) => {
            let (directory, file_name) = split_log_path(path)?;
            fs::create_dir_all(&directory)?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(LocalTime::rfc_3339());

            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .try_init();

            Ok(LoggingGuard {
                _file_guard: Some(guard),
            })
        }
        None => {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init();

            Ok(LoggingGuard { _file_guard: None })
        }
    }
}

fn split_log_path(path: &Path) -> io::Result<(std::path::PathBuf, std::ffi::OsString)> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log file path has no file name: {}", path.display()),
        )
    })?;
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    Ok((directory, file_name.to_os_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("/var/log/contentpack.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log"));
        assert_eq!(name, "contentpack.log");
    }

    #[test]
    fn test_split_bare_file_name_uses_current_dir() {
        let (dir, name) = split_log_path(Path::new("contentpack.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "contentpack.log");
    }

    #[test]
    fn test_split_rejects_root() {
        assert!(split_log_path(Path::new("/")).is_err());
    }
}
