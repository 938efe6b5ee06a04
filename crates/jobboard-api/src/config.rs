//! API configuration.

use thiserror::Error;

/// Front-end origins allowed to call the API with credentials.
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "https://job-portal-cb309.web.app",
    "https://job-portal-cb309.firebaseapp.com",
];

/// Configuration errors raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            max_body_size: 1024 * 1024, // 1MB
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

/// Token signing configuration.
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens
    pub jwt_secret: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Create config from environment variables. `JWT_SECRET` is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => Ok(Self::new(secret)),
            _ => Err(ConfigError::Missing("JWT_SECRET")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_api_config_defaults() {
        for var in ["API_HOST", "PORT", "CORS_ORIGINS", "MAX_BODY_SIZE", "ENVIRONMENT"] {
            std::env::remove_var(var);
        }
        let config = ApiConfig::from_env();
        assert_eq!(config.port, 5000);
        assert_eq!(config.cors_origins.len(), 3);
        assert!(!config.is_production());
    }

    #[test]
    #[serial]
    fn test_api_config_reads_environment() {
        std::env::set_var("PORT", "8080");
        std::env::set_var("ENVIRONMENT", "Production");
        std::env::set_var("CORS_ORIGINS", "https://a.example, https://b.example");
        let config = ApiConfig::from_env();
        assert_eq!(config.port, 8080);
        assert!(config.is_production());
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
        for var in ["PORT", "ENVIRONMENT", "CORS_ORIGINS"] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_auth_config_requires_secret() {
        std::env::remove_var("JWT_SECRET");
        assert!(AuthConfig::from_env().is_err());

        std::env::set_var("JWT_SECRET", "");
        assert!(AuthConfig::from_env().is_err());

        std::env::set_var("JWT_SECRET", "s3cr3t");
        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.jwt_secret, "s3cr3t");
        assert!(!format!("{:?}", config).contains("s3cr3t"));
        std::env::remove_var("JWT_SECRET");
    }
}
