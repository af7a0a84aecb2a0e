//! Environment configuration for the demo driver.

use thiserror::Error;

use stockwatch_core::DomainError;
use stockwatch_events::LineFormat;
use stockwatch_inventory::{DiscountPolicy, RestockPolicy};

pub const LOW_SUPPLY_THRESHOLD_ENV: &str = "STOCKWATCH_LOW_SUPPLY_THRESHOLD";
pub const RESTOCK_TARGET_ENV: &str = "STOCKWATCH_RESTOCK_TARGET";
pub const DISCOUNT_PERCENT_ENV: &str = "STOCKWATCH_DISCOUNT_PERCENT";
pub const OUTPUT_ENV: &str = "STOCKWATCH_OUTPUT";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var}: cannot parse '{value}'")]
    Parse { var: &'static str, value: String },

    #[error("{var}: {source}")]
    Invalid {
        var: &'static str,
        #[source]
        source: DomainError,
    },
}

/// Demo settings; every field has a default.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub restock: RestockPolicy,
    pub discount: DiscountPolicy,
    pub output: LineFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            restock: RestockPolicy::default(),
            discount: DiscountPolicy::default(),
            output: LineFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let threshold = parse_or(
            &lookup,
            LOW_SUPPLY_THRESHOLD_ENV,
            RestockPolicy::DEFAULT_LOW_SUPPLY_THRESHOLD,
        )?;
        let target = parse_or(&lookup, RESTOCK_TARGET_ENV, RestockPolicy::DEFAULT_RESTOCK_TARGET)?;
        let restock = RestockPolicy::new(threshold, target).map_err(|source| ConfigError::Invalid {
            var: RESTOCK_TARGET_ENV,
            source,
        })?;

        let percent = parse_or(
            &lookup,
            DISCOUNT_PERCENT_ENV,
            DiscountPolicy::DEFAULT_THRESHOLD_PERCENT,
        )?;
        let discount = DiscountPolicy::new(percent).map_err(|source| ConfigError::Invalid {
            var: DISCOUNT_PERCENT_ENV,
            source,
        })?;

        let output = match lookup(OUTPUT_ENV) {
            Some(value) => value.parse().map_err(|source| ConfigError::Invalid {
                var: OUTPUT_ENV,
                source,
            })?,
            None => LineFormat::Text,
        };

        Ok(Self {
            restock,
            discount,
            output,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Parse { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.restock.restock_target(), 15);
        assert_eq!(config.discount.threshold_percent(), 10.0);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            (LOW_SUPPLY_THRESHOLD_ENV, "4"),
            (RESTOCK_TARGET_ENV, " 30 "),
            (DISCOUNT_PERCENT_ENV, "25.5"),
            (OUTPUT_ENV, "json"),
        ]))
        .unwrap();

        assert_eq!(config.restock, RestockPolicy::new(4, 30).unwrap());
        assert_eq!(config.discount.threshold_percent(), 25.5);
        assert_eq!(config.output, LineFormat::Json);
    }

    #[test]
    fn reports_unparsable_values() {
        let err = Config::from_lookup(lookup(&[(RESTOCK_TARGET_ENV, "lots")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Parse {
                var: RESTOCK_TARGET_ENV,
                value: "lots".to_string()
            }
        );
    }

    #[test]
    fn rejects_target_below_threshold() {
        let err = Config::from_lookup(lookup(&[
            (LOW_SUPPLY_THRESHOLD_ENV, "20"),
            (RESTOCK_TARGET_ENV, "15"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var, .. } if var == RESTOCK_TARGET_ENV));
    }

    #[test]
    fn rejects_unknown_output() {
        let err = Config::from_lookup(lookup(&[(OUTPUT_ENV, "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var, .. } if var == OUTPUT_ENV));
    }
}
