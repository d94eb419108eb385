//! Database configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Database configuration (PostgreSQL)
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum pool connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum pool connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE_URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }

    #[test]
    fn test_valid_postgres_url() {
        assert!(config("postgresql://user@localhost/db").validate().is_ok());
        assert!(config("postgres://user@localhost/db").validate().is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(config("").validate().is_err());
    }

    #[test]
    fn test_non_postgres_url_rejected() {
        assert!(config("mysql://user@localhost/db").validate().is_err());
    }

    #[test]
    fn test_pool_size_validation() {
        let config = DatabaseConfig {
            url: "postgresql://user@localhost/db".to_string(),
            max_connections: 2,
            min_connections: 5,
        };
        assert!(config.validate().is_err());
    }
}
