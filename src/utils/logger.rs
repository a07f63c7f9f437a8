use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Level used when `RUST_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "info";

/// Installs the global tracing subscriber
///
/// Logs go to stderr, or to a timestamped file inside `log_dir` when one is
/// given. Verbosity comes from `RUST_LOG`.
///
/// # Arguments
/// * `log_dir` - Optional directory for log files, created if missing
pub fn init_logger(log_dir: Option<&str>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match log_dir {
        Some(dir) => {
            if !Path::new(dir).exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create log directory {}", dir))?;
            }

            let log_file = log_file_path(dir, Local::now());
            let file = fs::File::create(&log_file)
                .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            info!("Logging to {}", log_file.display());
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}

fn log_file_path(dir: &str, now: DateTime<Local>) -> PathBuf {
    Path::new(dir).join(format!("profile_urls_{}.log", now.format("%Y%m%d_%H%M%S")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_file_path_is_timestamped() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            log_file_path("logs", now),
            Path::new("logs").join("profile_urls_20240309_140507.log")
        );
    }
}
