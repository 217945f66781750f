//! 基础设施：日志、数据库与存储选择

#[cfg(feature = "database")]
pub mod database;
pub mod logger;
#[cfg(feature = "database")]
pub mod product_repository;

use std::sync::Arc;
use tracing::warn;

use crate::app::product::store::{MemoryProductStore, ProductStore};
use crate::config::{Config, DatabaseConfig};

/// 配置了数据库时使用 PostgreSQL，否则退回内存存储
pub async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn ProductStore>> {
    if let Some(store) = database_store(&config.database).await? {
        return Ok(store);
    }

    warn!("No database configured, products are kept in memory");
    Ok(Arc::new(MemoryProductStore::new()))
}

#[cfg(feature = "database")]
async fn database_store(
    config: &DatabaseConfig,
) -> anyhow::Result<Option<Arc<dyn ProductStore>>> {
    let Some(url) = config.url.as_deref() else {
        return Ok(None);
    };

    let manager = database::DatabaseManager::new(config, url).await?;
    manager.create_tables().await?;

    Ok(Some(Arc::new(product_repository::PgProductStore::new(
        manager.get_pool().clone(),
    ))))
}

#[cfg(not(feature = "database"))]
async fn database_store(
    config: &DatabaseConfig,
) -> anyhow::Result<Option<Arc<dyn ProductStore>>> {
    if config.url.is_some() {
        warn!("A database url is configured but the `database` feature is disabled");
    }
    Ok(None)
}
