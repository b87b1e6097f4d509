use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::{cypher_ast::variable::VariableKind, utils::identifier_escaping::is_plain_identifier};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Naming and layout options for a build
#[derive(Clone, Debug, PartialEq, Eq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Prefix of generated node identifiers (`n1`, `n2`, ...)
    #[validate(custom(function = "validate_prefix"))]
    pub node_prefix: String,

    /// Prefix of generated relationship identifiers
    #[validate(custom(function = "validate_prefix"))]
    pub relationship_prefix: String,

    /// Prefix of generated identifiers for plain variables (aliases, UNWIND targets)
    #[validate(custom(function = "validate_prefix"))]
    pub variable_prefix: String,

    /// Prefix of generated parameter names (`$param0`, ...)
    #[validate(custom(function = "validate_prefix"))]
    pub param_prefix: String,

    /// One clause per line when true, a single line otherwise
    pub pretty: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            node_prefix: "n".to_string(),
            relationship_prefix: "r".to_string(),
            variable_prefix: "v".to_string(),
            param_prefix: "param".to_string(),
            pretty: true,
        }
    }
}

/// Generated names are `<prefix><counter>`, so the prefix alone must already
/// be a plain identifier.
fn validate_prefix(prefix: &str) -> Result<(), ValidationError> {
    if is_plain_identifier(prefix) {
        Ok(())
    } else {
        Err(ValidationError::new("prefix")
            .with_message("Prefix must be a non-empty plain identifier".into()))
    }
}

impl BuildConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            node_prefix: env::var("CYPHER_BUILDER_NODE_PREFIX").unwrap_or(defaults.node_prefix),
            relationship_prefix: env::var("CYPHER_BUILDER_RELATIONSHIP_PREFIX")
                .unwrap_or(defaults.relationship_prefix),
            variable_prefix: env::var("CYPHER_BUILDER_VARIABLE_PREFIX")
                .unwrap_or(defaults.variable_prefix),
            param_prefix: env::var("CYPHER_BUILDER_PARAM_PREFIX").unwrap_or(defaults.param_prefix),
            pretty: parse_env_var("CYPHER_BUILDER_PRETTY", "true")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file; missing keys take their defaults
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Default layout on a single line
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Default::default()
        }
    }

    pub fn prefix_for(&self, kind: VariableKind) -> &str {
        match kind {
            VariableKind::Node => &self.node_prefix,
            VariableKind::Relationship => &self.relationship_prefix,
            VariableKind::Var => &self.variable_prefix,
        }
    }

    pub fn clause_separator(&self) -> &'static str {
        if self.pretty {
            "\n"
        } else {
            " "
        }
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const ENV_KEYS: [&str; 5] = [
        "CYPHER_BUILDER_NODE_PREFIX",
        "CYPHER_BUILDER_RELATIONSHIP_PREFIX",
        "CYPHER_BUILDER_VARIABLE_PREFIX",
        "CYPHER_BUILDER_PARAM_PREFIX",
        "CYPHER_BUILDER_PRETTY",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.prefix_for(VariableKind::Node), "n");
        assert_eq!(config.prefix_for(VariableKind::Relationship), "r");
        assert_eq!(config.prefix_for(VariableKind::Var), "v");
        assert_eq!(config.param_prefix, "param");
        assert_eq!(config.clause_separator(), "\n");
    }

    #[test]
    fn test_compact_separator() {
        assert_eq!(BuildConfig::compact().clause_separator(), " ");
    }

    #[test]
    fn test_empty_prefix() {
        let config = BuildConfig {
            node_prefix: "".to_string(), // Invalid
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_identifier_prefix() {
        let config = BuildConfig {
            param_prefix: "p-".to_string(), // Invalid
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear_env();
        env::set_var("CYPHER_BUILDER_NODE_PREFIX", "node_");
        env::set_var("CYPHER_BUILDER_PRETTY", "false");

        let config = BuildConfig::from_env().unwrap();
        assert_eq!(config.node_prefix, "node_");
        assert_eq!(config.relationship_prefix, "r");
        assert!(!config.pretty);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_bad_bool() {
        clear_env();
        env::set_var("CYPHER_BUILDER_PRETTY", "sometimes");

        match BuildConfig::from_env() {
            Err(ConfigError::Parse { field, value, .. }) => {
                assert_eq!(field, "CYPHER_BUILDER_PRETTY");
                assert_eq!(value, "sometimes");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_prefix() {
        clear_env();
        env::set_var("CYPHER_BUILDER_PARAM_PREFIX", "1st");

        assert!(matches!(
            BuildConfig::from_env(),
            Err(ConfigError::Validation(_))
        ));
        clear_env();
    }

    #[test]
    fn test_from_yaml_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "param_prefix: p\npretty: false").unwrap();

        let config = BuildConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.param_prefix, "p");
        assert_eq!(config.node_prefix, "n");
        assert!(!config.pretty);
    }

    #[test]
    fn test_from_yaml_file_invalid_prefix() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "relationship_prefix: \"\"").unwrap();

        assert!(matches!(
            BuildConfig::from_yaml_file(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_from_yaml_file_missing() {
        assert!(matches!(
            BuildConfig::from_yaml_file("/nonexistent/cypher_builder.yaml"),
            Err(ConfigError::Parse { .. })
        ));
    }
}
