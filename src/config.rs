//! Runtime configuration from environment variables.
//!
//! | Variable       | Default   |
//! |----------------|-----------|
//! | `HOST`         | `0.0.0.0` |
//! | `PORT`         | `8080`    |
//! | `MIN_TEAMS`    | `2`       |
//! | `MAX_TEAMS`    | `64`      |
//! | `EVENT_BUFFER` | `256`     |

use crate::logic::{MAX_TEAM_COUNT, MIN_TEAM_COUNT};
use crate::models::BracketError;
use std::str::FromStr;

/// Allowed team counts for new tournaments and qualifiers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TeamLimits {
    pub min: u32,
    pub max: u32,
}

impl Default for TeamLimits {
    fn default() -> Self {
        Self { min: 2, max: 64 }
    }
}

impl TeamLimits {
    /// Bounds clamped to what a bracket can hold, with `min <= max`.
    pub fn new(min: u32, max: u32) -> Self {
        let min = min.clamp(MIN_TEAM_COUNT, MAX_TEAM_COUNT);
        let max = max.clamp(min, MAX_TEAM_COUNT);
        Self { min, max }
    }

    /// Reject counts outside the bounds, and non-powers of two when `power_of_two` is set.
    pub fn check(&self, count: u32, power_of_two: bool) -> Result<(), BracketError> {
        let in_bounds = (self.min..=self.max).contains(&count);
        if !in_bounds || (power_of_two && !count.is_power_of_two()) {
            return Err(BracketError::InvalidTeamCount {
                count,
                min: self.min,
                max: self.max,
                power_of_two,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub limits: TeamLimits,
    /// Capacity of the live-event channel; slower viewers skip events beyond this.
    pub event_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            limits: TeamLimits::default(),
            event_buffer: 256,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let min = parse_or(&lookup, "MIN_TEAMS", defaults.limits.min);
        let max = parse_or(&lookup, "MAX_TEAMS", defaults.limits.max);
        let event_buffer = parse_or(&lookup, "EVENT_BUFFER", defaults.event_buffer).max(1);
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            limits: TeamLimits::new(min, max),
            event_buffer,
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
    }
}
