//! # Error Types Module
//!
//! The pipeline stages themselves never fail; these errors belong to the layers
//! around them (configuration loading).

/// Errors raised while building a [`crate::config::ShoppingListConfig`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A setting was present but its value is not one we understand
    InvalidValue { key: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {key}: '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ConfigError::InvalidValue {
            key: "SHOPPING_LIST_PROVENANCE".to_string(),
            value: "most".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for SHOPPING_LIST_PROVENANCE: 'most'"
        );
    }
}
