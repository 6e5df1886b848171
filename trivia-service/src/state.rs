//! Application state management

use std::sync::Arc;

use crate::{
    config::{Config, StoreBackend},
    error::{Error, Result},
    store::{MemoryStore, TriviaStore},
};

/// Application state shared across handlers
///
/// Holds the configuration and the process-wide store handle. Cloning is
/// cheap; both live behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    store: Arc<dyn TriviaStore>,
}

impl AppState {
    /// Create state around an already-built store
    pub fn new(config: Config, store: Arc<dyn TriviaStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Build the store named in `config.store` and wrap it in state
    ///
    /// The postgres backend connects (with retries) and, when configured,
    /// creates the tables before returning.
    pub async fn from_config(config: Config) -> Result<Self> {
        config.validate()?;

        let store: Arc<dyn TriviaStore> = match config.store.backend {
            StoreBackend::Memory => {
                if config.store.seed {
                    Arc::new(MemoryStore::seeded()?)
                } else {
                    Arc::new(MemoryStore::new())
                }
            }
            StoreBackend::Postgres => Self::postgres_store(&config).await?,
        };

        tracing::info!(backend = store.backend(), "Store ready");
        Ok(Self::new(config, store))
    }

    #[cfg(feature = "postgres")]
    async fn postgres_store(config: &Config) -> Result<Arc<dyn TriviaStore>> {
        let database = config.database.as_ref().ok_or_else(|| {
            Error::Internal("postgres backend selected without [database] config".to_string())
        })?;

        let pool = crate::database::create_pool(database).await?;
        let store = crate::store::PgStore::new(pool);
        if database.initialize_schema {
            store.initialize().await?;
        }
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "postgres"))]
    async fn postgres_store(_config: &Config) -> Result<Arc<dyn TriviaStore>> {
        Err(Error::Internal(
            "postgres backend requires the `postgres` feature".to_string(),
        ))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the store handle
    pub fn store(&self) -> &dyn TriviaStore {
        self.store.as_ref()
    }
}
