use crate::config::{AppConfig, JwtConfig};
use crate::store::memory::MemStore;
use crate::store::postgres::PgStore;
use crate::store::Store;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store: Arc<dyn Store> = match config.database_url.as_deref() {
            Some(url) => {
                let store = PgStore::connect(url).await?;
                info!("connected to postgres store");
                Arc::new(store)
            }
            None => {
                warn!("DATABASE_URL not set, using in-memory store; data is lost on restart");
                Arc::new(MemStore::with_fixtures())
            }
        };

        Ok(Self { store, config })
    }

    pub fn from_parts(store: Arc<dyn Store>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    /// Seeded in-memory state for tests.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            environment: "test".into(),
            database_url: None,
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "fitmeal".into(),
                audience: "fitmeal-users".into(),
                session_ttl_days: 7,
            },
        });

        let store = Arc::new(MemStore::with_fixtures()) as Arc<dyn Store>;
        Self { store, config }
    }
}
