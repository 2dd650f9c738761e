use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{RoleService, SeaOrmRoleService, SeaOrmUserService, UserService};

/// Everything a request handler or CLI command needs, built once from the
/// startup [`Config`].
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub user_service: Arc<dyn UserService>,

    pub role_service: Arc<dyn RoleService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let user_service = Arc::new(SeaOrmUserService::new(
            store.clone(),
            config.security.clone(),
        )?) as Arc<dyn UserService + Send + Sync + 'static>;

        let role_service = Arc::new(SeaOrmRoleService::new(store.clone()))
            as Arc<dyn RoleService + Send + Sync + 'static>;

        Ok(Self {
            config: Arc::new(config),
            store,
            user_service,
            role_service,
        })
    }
}
