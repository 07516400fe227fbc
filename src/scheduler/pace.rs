//! Step pacing.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Delay each loop waits between two steps.
///
/// Always finite and non-negative. Parsed from fractional seconds; invalid
/// input is rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Pace(Duration);

impl Pace {
    /// No delay between steps.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Half a second, the pace used when none is given.
    pub const DEFAULT: Self = Self(Duration::from_millis(500));

    /// Builds a pace from fractional seconds.
    ///
    /// # Errors
    /// [`ConfigError::NotFinite`], [`ConfigError::Negative`] or
    /// [`ConfigError::TooLarge`].
    pub fn from_secs_f64(secs: f64) -> Result<Self, ConfigError> {
        if !secs.is_finite() {
            return Err(ConfigError::NotFinite(secs));
        }
        if secs < 0.0 {
            return Err(ConfigError::Negative(secs));
        }
        Duration::try_from_secs_f64(secs)
            .map(Self)
            .map_err(|_| ConfigError::TooLarge(secs))
    }

    /// Wraps an existing duration.
    pub const fn from_duration(duration: Duration) -> Self {
        Self(duration)
    }

    /// The delay as a `Duration`.
    pub const fn duration(self) -> Duration {
        self.0
    }
}

impl Default for Pace {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Pace {
    type Error = ConfigError;

    fn try_from(secs: f64) -> Result<Self, Self::Error> {
        Self::from_secs_f64(secs)
    }
}

impl From<Pace> for f64 {
    fn from(pace: Pace) -> Self {
        pace.0.as_secs_f64()
    }
}

impl FromStr for Pace {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let secs: f64 = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::NotANumber(s.to_owned()))?;
        Self::from_secs_f64(secs)
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0.as_secs_f64())
    }
}
