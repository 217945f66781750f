//! 产品存储
//!
//! [`ProductStore`] 是处理器唯一依赖的持久化契约。数据库实现在
//! `infrastructure::product_repository` 中，这里提供进程内实现。

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::model::{NewProduct, Product, ProductChanges};

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[cfg(feature = "database")]
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("存储内部错误: {0}")]
    Internal(String),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 按插入顺序返回全部产品
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<Product>, StoreError>;

    async fn create(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// 只覆盖提供了的字段；产品不存在时返回 `None`
    async fn update(&self, id: i64, changes: ProductChanges)
        -> Result<Option<Product>, StoreError>;

    /// 返回是否真的删除了一条记录
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    fn kind(&self) -> &'static str;
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    rows: BTreeMap<i64, Product>,
}

/// 进程内存储，id 单调递增且删除后不复用
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    state: RwLock<MemoryState>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let state = self.state.read().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let state = self.state.read().await;
        Ok(state.rows.get(&id).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut state = self.state.write().await;
        state.last_id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Internal("product id space exhausted".to_string()))?;

        let now = Utc::now();
        let product = Product {
            id: state.last_id,
            name: product.name,
            price: product.price,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(product.id, product.clone());

        Ok(product)
    }

    async fn update(
        &self,
        id: i64,
        changes: ProductChanges,
    ) -> Result<Option<Product>, StoreError> {
        let mut state = self.state.write().await;

        Ok(state.rows.get_mut(&id).map(|product| {
            changes.apply_to(product);
            product.updated_at = Utc::now();
            product.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
