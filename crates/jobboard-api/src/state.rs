//! Application state.

use std::sync::Arc;

use jobboard_store::{ApplicationRepository, DocumentStore, JobRepository, MongoStore};

use crate::auth::{CookiePolicy, TokenService};
use crate::config::{ApiConfig, AuthConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<dyn DocumentStore>,
    pub jobs: JobRepository,
    pub applications: ApplicationRepository,
    pub tokens: Arc<TokenService>,
    pub cookies: CookiePolicy,
}

impl AppState {
    /// Create application state backed by the configured database.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let auth = AuthConfig::from_env()?;
        let store = MongoStore::from_env().await?;
        Ok(Self::with_store(config, &auth, Arc::new(store)))
    }

    /// Create application state over an existing store.
    pub fn with_store(config: ApiConfig, auth: &AuthConfig, store: Arc<dyn DocumentStore>) -> Self {
        let cookies = CookiePolicy::from_config(&config);
        Self {
            config,
            jobs: JobRepository::new(Arc::clone(&store)),
            applications: ApplicationRepository::new(Arc::clone(&store)),
            store,
            tokens: Arc::new(TokenService::from_config(auth)),
            cookies,
        }
    }
}
