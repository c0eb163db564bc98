use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    auth::TokenIssuer,
    config::Config,
    errors::StoreError,
    store::{
        BlogStore, MemoryBlogStore, MemoryRefreshTokenStore, MemoryUserStore, MongoStores,
        RefreshTokenStore, UserStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub users: Arc<dyn UserStore>,
    pub blogs: Arc<dyn BlogStore>,
    pub issuer: Arc<TokenIssuer>,
}

impl AppState {
    /// MongoDB-backed when `mongodb_uri` is configured, in-memory otherwise.
    pub async fn new(cfg: &Config) -> Result<Self, StoreError> {
        let Some(uri) = cfg.mongodb_uri.as_deref() else {
            warn!("MONGODB_URI not set, data will not survive a restart");
            return Ok(Self::in_memory(cfg));
        };

        let stores = MongoStores::connect(uri, &cfg.db_name).await?;
        info!(db = %cfg.db_name, "connected to mongodb");
        Ok(Self::from_stores(
            cfg,
            Arc::new(stores.users),
            Arc::new(stores.blogs),
            Arc::new(stores.refresh_tokens),
        ))
    }

    pub fn in_memory(cfg: &Config) -> Self {
        Self::from_stores(
            cfg,
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryBlogStore::new()),
            Arc::new(MemoryRefreshTokenStore::new()),
        )
    }

    pub fn from_stores(
        cfg: &Config,
        users: Arc<dyn UserStore>,
        blogs: Arc<dyn BlogStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
    ) -> Self {
        Self {
            cfg: Arc::new(cfg.clone()),
            users,
            blogs,
            issuer: Arc::new(TokenIssuer::new(&cfg.tokens, refresh_tokens)),
        }
    }
}
