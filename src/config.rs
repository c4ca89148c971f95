//! # Shopping List Configuration Module
//!
//! Settings that change how the generator shapes its output. Defaults reproduce
//! the behaviour the data layer expects; environment variables can override them.

use crate::errors::ConfigError;
use std::str::FromStr;

pub const PROVENANCE_ENV: &str = "SHOPPING_LIST_PROVENANCE";
pub const RESTRICT_TO_WEEK_ENV: &str = "SHOPPING_LIST_RESTRICT_TO_WEEK";

/// Number of days covered by one shopping list
pub const WEEK_LENGTH_DAYS: i64 = 7;

/// How much of a row's origin is copied onto each shopping list record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProvenanceMode {
    /// Only the first contributing recipe and meal plan entry
    #[default]
    First,
    /// The first contributor plus every contributing id
    All,
}

impl FromStr for ProvenanceMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(ProvenanceMode::First),
            "all" => Ok(ProvenanceMode::All),
            _ => Err(ConfigError::InvalidValue {
                key: PROVENANCE_ENV.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration for [`crate::shopping_list::ShoppingListGenerator`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShoppingListConfig {
    /// Which contributing ids each output record carries
    pub provenance: ProvenanceMode,
    /// Skip meal plan entries dated outside the requested week
    pub restrict_to_week: bool,
}

impl ShoppingListConfig {
    /// Load configuration from the process environment
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(PROVENANCE_ENV) {
            config.provenance = value.parse()?;
        }

        if let Some(value) = lookup(RESTRICT_TO_WEEK_ENV) {
            config.restrict_to_week = parse_flag(RESTRICT_TO_WEEK_ENV, &value)?;
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
