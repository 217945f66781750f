//! PostgreSQL 产品存储

use async_trait::async_trait;
use sqlx::postgres::PgPool;

use crate::app::product::{
    model::{NewProduct, Product, ProductChanges},
    store::{ProductStore, StoreError},
};

const COLUMNS: &str = "id, name, price, created_at, updated_at";

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let products =
            sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(products)
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let product =
            sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(product)
    }

    async fn create(&self, product: NewProduct) -> Result<Product, StoreError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING {COLUMNS}"
        ))
        .bind(&product.name)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn update(
        &self,
        id: i64,
        changes: ProductChanges,
    ) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products \
             SET name = COALESCE($1, name), price = COALESCE($2, price), updated_at = NOW() \
             WHERE id = $3 RETURNING {COLUMNS}"
        ))
        .bind(changes.name)
        .bind(changes.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "postgres"
    }
}
