//! Integration tests for environment configuration.

use std::collections::HashMap;
use tennis_bracket_web::{BracketError, Config, TeamLimits};

fn config_from(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_without_environment() {
    let config = config_from(&[]);
    assert_eq!(config, Config::default());
    assert_eq!(config.limits, TeamLimits { min: 2, max: 64 });
    assert_eq!(config.port, 8080);
}

#[test]
fn values_are_read_and_invalid_ones_ignored() {
    let config = config_from(&[
        ("HOST", "127.0.0.1"),
        ("PORT", "not-a-port"),
        ("MAX_TEAMS", "32"),
        ("EVENT_BUFFER", "0"),
    ]);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.limits.max, 32);
    assert_eq!(config.event_buffer, 1);
}

#[test]
fn limits_are_normalised() {
    assert_eq!(TeamLimits::new(0, 1), TeamLimits { min: 2, max: 2 });
    assert_eq!(TeamLimits::new(16, 8), TeamLimits { min: 16, max: 16 });
    assert_eq!(TeamLimits::new(2, 1_000_000).max, 1024);
}

#[test]
fn limits_check_power_of_two_only_when_asked() {
    let limits = TeamLimits::default();
    assert!(limits.check(6, false).is_ok());
    assert_eq!(
        limits.check(6, true),
        Err(BracketError::InvalidTeamCount {
            count: 6,
            min: 2,
            max: 64,
            power_of_two: true
        })
    );
}
