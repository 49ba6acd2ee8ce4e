//! API configuration

use serde::Deserialize;

use core_kernel::CoreError;
use domain_directory::DirectoryConfig;
use infra_db::DatabaseConfig;

/// API configuration
///
/// Every field can be overridden by an `API_`-prefixed environment variable,
/// e.g. `API_PORT=9000` or `API_REQUIRE_HEADQUARTER_FOR_BRANCHES=false`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Log output format: `json` or `text`
    pub log_format: String,
    /// Maximum pooled database connections
    pub max_connections: u32,
    /// Reject branches created before their headquarters
    pub require_headquarter_for_branches: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/swift_codes".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            max_connections: 10,
            require_headquarter_for_branches: true,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    ///
    /// # Errors
    ///
    /// `CoreError::Configuration` when a variable does not parse or a value
    /// is out of range.
    pub fn from_env() -> Result<Self, CoreError> {
        let config: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the server cannot run with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.port == 0 {
            return Err(CoreError::configuration("API_PORT must not be 0"));
        }
        if self.max_connections == 0 {
            return Err(CoreError::configuration("API_MAX_CONNECTIONS must be at least 1"));
        }
        if !["json", "text"].iter().any(|f| self.log_format.eq_ignore_ascii_case(f)) {
            return Err(CoreError::configuration(format!(
                "API_LOG_FORMAT must be json or text, got {}",
                self.log_format
            )));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether logs should be emitted as JSON
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Directory behavior derived from this configuration
    pub fn directory_config(&self) -> DirectoryConfig {
        DirectoryConfig {
            require_headquarter_for_branches: self.require_headquarter_for_branches,
        }
    }

    /// Pool settings derived from this configuration
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_url).max_connections(self.max_connections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert!(!config.json_logs());
        assert!(config.directory_config().require_headquarter_for_branches);
        assert_eq!(config.database_config().max_connections, 10);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: ApiConfig = config::Config::builder()
            .set_override("port", 9000)
            .unwrap()
            .set_override("log_format", "JSON")
            .unwrap()
            .set_override("require_headquarter_for_branches", false)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.json_logs());
        assert!(!config.directory_config().require_headquarter_for_branches);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let config = ApiConfig {
            max_connections: 0,
            ..ApiConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Configuration(_))));

        let config = ApiConfig {
            log_format: "yaml".to_string(),
            ..ApiConfig::default()
        };
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("yaml"));
    }
}
