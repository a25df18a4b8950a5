use std::fmt;
use std::str::FromStr;

use log::LevelFilter;

use crate::error::ConfigError;

/// Ordinal verbosity level. A message prints when its level is at or below
/// the printer's threshold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Noise {
    /// No output from the interface.
    Quiet = 0,
    /// Minimal amount of output.
    Subtle = 1,
    /// A reasonable amount of output.
    Moderate = 2,
    /// Everything.
    Loud = 3,
}

impl Noise {
    /// All levels, quietest first.
    pub const ALL: [Noise; 4] = [Noise::Quiet, Noise::Subtle, Noise::Moderate, Noise::Loud];

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Noise::Quiet => "quiet",
            Noise::Subtle => "subtle",
            Noise::Moderate => "moderate",
            Noise::Loud => "loud",
        }
    }

    /// The `log` filter that lets through what a threshold of `self` would.
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Noise::Quiet => LevelFilter::Error,
            Noise::Subtle => LevelFilter::Warn,
            Noise::Moderate => LevelFilter::Info,
            Noise::Loud => LevelFilter::Debug,
        }
    }
}

impl fmt::Display for Noise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Noise {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Noise::Quiet),
            1 => Ok(Noise::Subtle),
            2 => Ok(Noise::Moderate),
            3 => Ok(Noise::Loud),
            _ => Err(ConfigError::InvalidNoise {
                value: value.to_string(),
            }),
        }
    }
}

impl FromStr for Noise {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u8>() {
            return Noise::try_from(n);
        }
        Noise::ALL
            .into_iter()
            .find(|noise| noise.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::InvalidNoise {
                value: s.to_string(),
            })
    }
}
