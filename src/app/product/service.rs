//! 产品业务服务
//!
//! 检查顺序固定：先确认资源存在，再校验字段，最后写入。

use std::sync::Arc;
use tracing::info;

use super::model::Product;
use super::rules::{self, RawAttributes};
use super::store::ProductStore;
use crate::core::error::ApiError;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    pub async fn ping(&self) -> Result<(), ApiError> {
        Ok(self.store.ping().await?)
    }

    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.store.list().await?)
    }

    pub async fn create(&self, attributes: RawAttributes) -> Result<Product, ApiError> {
        let new_product = rules::validate_create(&attributes)?;
        let product = self.store.create(new_product).await?;

        info!("Created product: {} ({})", product.name, product.id);
        Ok(product)
    }

    pub async fn show(&self, id: i64) -> Result<Product, ApiError> {
        self.store.find(id).await?.ok_or(ApiError::NotFound)
    }

    /// `attributes` 为请求体的解析结果，结构错误也要排在存在性检查之后上报
    pub async fn update(
        &self,
        id: i64,
        attributes: Result<RawAttributes, ApiError>,
    ) -> Result<Product, ApiError> {
        let existing = self.show(id).await?;
        let changes = rules::validate_update(&attributes?)?;

        if changes.is_empty() {
            return Ok(existing);
        }

        let product = self
            .store
            .update(id, changes)
            .await?
            .ok_or(ApiError::NotFound)?;

        info!("Updated product: {} ({})", product.name, product.id);
        Ok(product)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.show(id).await?;

        if !self.store.delete(id).await? {
            return Err(ApiError::NotFound);
        }

        info!("Deleted product: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::product::store::MemoryProductStore;
    use serde_json::json;

    fn service() -> ProductService {
        ProductService::new(Arc::new(MemoryProductStore::new()))
    }

    fn attrs(value: serde_json::Value) -> RawAttributes {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_show() {
        let service = service();
        let created = service
            .create(attrs(json!({"name": "Widget", "price": "9.5"})))
            .await
            .unwrap();

        let shown = service.show(created.id).await.unwrap();
        assert_eq!(shown.name, "Widget");
        assert_eq!(shown.formatted_price(), "9.50");
    }

    #[tokio::test]
    async fn test_invalid_create_writes_nothing() {
        let service = service();
        let err = service
            .create(attrs(json!({"name": "Widget", "price": "-1"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationFailed(_)));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_wins_over_invalid_payload() {
        let service = service();
        let err = service
            .update(2, Ok(attrs(json!({"price": "Not a number"}))))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));

        let err = service
            .update(2, Err(ApiError::unprocessable()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_product_untouched() {
        let service = service();
        let created = service
            .create(attrs(json!({"name": "Product name", "price": "100.30"})))
            .await
            .unwrap();

        let err = service
            .update(created.id, Ok(attrs(json!({"name": "x", "price": "-10"}))))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationFailed(_)));

        let shown = service.show(created.id).await.unwrap();
        assert_eq!(shown.name, "Product name");
        assert_eq!(shown.formatted_price(), "100.30");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = service();
        let created = service
            .create(attrs(json!({"name": "Widget", "price": 1})))
            .await
            .unwrap();

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.delete(created.id).await.unwrap_err(),
            ApiError::NotFound
        ));
    }
}
