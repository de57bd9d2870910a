//! Error types for ltr-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while segmenting or aggregating text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LtrError {
    /// The command name does not map to a unit kind.
    #[error("unknown unit kind: {0}. Use: chars, words, sentences")]
    InvalidUnitKind(String),

    /// The locale could not be parsed or has no usable segmentation/collation data.
    #[error("invalid locale {locale:?}: {reason}")]
    InvalidLocale {
        /// The locale identifier as supplied.
        locale: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Result type alias using [`LtrError`].
pub type Result<T> = std::result::Result<T, LtrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_result_carries_config_errors() {
        let result: ConfigResult<()> = Err(ConfigError::NotFound);
        assert_eq!(
            result.unwrap_err().to_string(),
            "no configuration file found"
        );
    }

    #[test]
    fn result_carries_ltr_errors() {
        let result: Result<()> = Err(LtrError::InvalidUnitKind("lines".into()));
        assert!(result.unwrap_err().to_string().contains("lines"));
    }
}
