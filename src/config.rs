use std::env;

use log::{debug, warn};

use crate::noise::Noise;
use crate::sink::Sink;
use crate::Printer;

pub const HEADER_VAR: &str = "PRINTSSX_HEADER";
pub const VERBOSE_VAR: &str = "PRINTSSX_VERBOSE";
pub const LOG_LEVEL_VAR: &str = "PRINTSSX_LOG_LEVEL";

/// Construction parameters for a [`Printer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterConfig {
    pub header: String,
    pub verbose_level: Noise,
    pub log_level: Noise,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            header: "printssx".to_string(),
            verbose_level: Noise::Moderate,
            log_level: Noise::Quiet,
        }
    }
}

impl PrinterConfig {
    /// Reads `PRINTSSX_HEADER`, `PRINTSSX_VERBOSE` and `PRINTSSX_LOG_LEVEL`.
    /// Unset or malformed values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let header = match lookup(HEADER_VAR) {
            Some(header) if !header.trim().is_empty() => header,
            _ => defaults.header,
        };
        let verbose_level = noise_or(&lookup, VERBOSE_VAR, defaults.verbose_level);
        let log_level = noise_or(&lookup, LOG_LEVEL_VAR, defaults.log_level);

        debug!(
            "Printer config: header={} verbose={} log={}",
            header, verbose_level, log_level
        );
        Self {
            header,
            verbose_level,
            log_level,
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_verbose_level(mut self, level: Noise) -> Self {
        self.verbose_level = level;
        self
    }

    pub fn build(&self, sink: impl Sink + 'static) -> Printer {
        Printer::new(
            self.header.clone(),
            sink,
            self.verbose_level,
            self.log_level,
        )
    }
}

fn noise_or<F>(lookup: &F, key: &str, default: Noise) -> Noise
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Ignoring {}: {}, using {}", key, e, default);
            default
        }),
    }
}
