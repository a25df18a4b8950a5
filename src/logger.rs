use log::{LevelFilter, SetLoggerError};
use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::noise::Noise;

// Minimal `log` backend for printers fronted by a LogSink
pub struct SimpleLogger {
    level: LevelFilter,
}

impl SimpleLogger {
    fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = SimpleLogger::new(level);
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Installs the logger with the filter matching a printer threshold.
    pub fn init_for(noise: Noise) -> Result<(), SetLoggerError> {
        Self::init(noise.level_filter())
    }

    /// Renders one line as `[TARGET hh:mm:ss] message`.
    pub fn format_line(
        target: &str,
        secs_since_epoch: u64,
        message: &dyn std::fmt::Display,
    ) -> String {
        let hours = (secs_since_epoch % 86400) / 3600;
        let minutes = (secs_since_epoch % 3600) / 60;
        let seconds = secs_since_epoch % 60;
        format!(
            "[{} {:02}:{:02}:{:02}] {}",
            target.to_uppercase(),
            hours,
            minutes,
            seconds,
            message
        )
    }
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            // A clock before the epoch renders as midnight.
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            let line = Self::format_line(record.target(), timestamp, record.args());
            let _ = writeln!(io::stderr(), "{}", line);
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata};

    #[test]
    fn format_line_uses_clock_of_day() {
        let secs = 86400 * 3 + 3600 * 13 + 60 * 5 + 9;
        assert_eq!(
            SimpleLogger::format_line("svc", secs, &"ready"),
            "[SVC 13:05:09] ready"
        );
    }

    #[test]
    fn enabled_respects_filter() {
        let logger = SimpleLogger::new(Noise::Subtle.level_filter());
        let warn = Metadata::builder().level(Level::Warn).build();
        let info = Metadata::builder().level(Level::Info).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&info));
    }
}
