use super::types::LogLevel;
use crate::utils::error::{ResilienceError, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

pub struct LoggingUtils;

impl LoggingUtils {
    /// Install a global fmt subscriber filtered at `log_level`.
    ///
    /// Fails if another global subscriber is already installed.
    pub fn init_tracing(log_level: LogLevel) -> Result<()> {
        let level = Level::from(log_level);
        let filter = EnvFilter::new(level.as_str().to_lowercase());

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .try_init()
            .map_err(|e| ResilienceError::tracing(e.to_string()))
    }

    pub fn format_duration(duration: std::time::Duration) -> String {
        let total_ms = duration.as_millis();

        if total_ms < 1000 {
            format!("{}ms", total_ms)
        } else if total_ms < 60_000 {
            format!("{:.2}s", total_ms as f64 / 1000.0)
        } else {
            let minutes = total_ms / 60_000;
            let seconds = (total_ms % 60_000) as f64 / 1000.0;
            format!("{}m {:.2}s", minutes, seconds)
        }
    }
}
