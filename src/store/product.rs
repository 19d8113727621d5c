//! Product persistence.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::error::AppError;
use crate::model::Product;
use crate::store::require_positive;

const COLUMNS: &str = "product_id, product_profile_id, product_content, product_date";

pub struct ProductStore;

impl ProductStore {
    /// Insert a new product and assign the store-generated id.
    pub async fn insert(pool: &PgPool, product: &mut Product) -> Result<(), AppError> {
        if product.product_id().is_some() {
            return Err(AppError::Conflict("not a new product".into()));
        }
        let sql = "INSERT INTO product (product_profile_id, product_content, product_date) \
             VALUES ($1, $2, $3) RETURNING product_id";
        tracing::debug!(sql, "insert product");
        let row = sqlx::query(sql)
            .bind(product.profile_id())
            .bind(product.content())
            .bind(product.date())
            .fetch_one(pool)
            .await?;
        product.assign_id(row.try_get("product_id")?);
        Ok(())
    }

    /// Update the mutable columns of a persisted product.
    pub async fn update(pool: &PgPool, product: &Product) -> Result<(), AppError> {
        let Some(product_id) = product.product_id() else {
            return Err(AppError::NotFound(
                "unable to update a product that does not exist".into(),
            ));
        };
        let sql = "UPDATE product SET product_profile_id = $1, product_content = $2, \
             product_date = $3 WHERE product_id = $4";
        tracing::debug!(sql, product_id, "update product");
        let result = sqlx::query(sql)
            .bind(product.profile_id())
            .bind(product.content())
            .bind(product.date())
            .bind(product_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("product does not exist".into()));
        }
        Ok(())
    }

    /// Delete a persisted product by primary key.
    pub async fn delete(pool: &PgPool, product: &Product) -> Result<(), AppError> {
        let Some(product_id) = product.product_id() else {
            return Err(AppError::NotFound(
                "unable to delete a product that does not exist".into(),
            ));
        };
        let sql = "DELETE FROM product WHERE product_id = $1";
        tracing::debug!(sql, product_id, "delete product");
        let result = sqlx::query(sql).bind(product_id).execute(pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("product does not exist".into()));
        }
        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, product_id: i64) -> Result<Option<Product>, AppError> {
        require_positive("product id", product_id)?;
        let sql = format!("SELECT {COLUMNS} FROM product WHERE product_id = $1");
        tracing::debug!(sql = %sql, product_id, "select product");
        let row = sqlx::query(&sql).bind(product_id).fetch_optional(pool).await?;
        row.as_ref().map(row_to_product).transpose()
    }

    pub async fn find_by_profile_id(
        pool: &PgPool,
        profile_id: i64,
    ) -> Result<Vec<Product>, AppError> {
        require_positive("product profile id", profile_id)?;
        let sql =
            format!("SELECT {COLUMNS} FROM product WHERE product_profile_id = $1 ORDER BY product_id");
        tracing::debug!(sql = %sql, profile_id, "select products by profile");
        let rows = sqlx::query(&sql).bind(profile_id).fetch_all(pool).await?;
        rows.iter().map(row_to_product).collect()
    }

    /// Substring search over content. The pattern is built host-side and
    /// bound as a parameter.
    pub async fn find_by_content(pool: &PgPool, content: &str) -> Result<Vec<Product>, AppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Invalid("product content search is empty".into()));
        }
        let sql =
            format!("SELECT {COLUMNS} FROM product WHERE product_content LIKE $1 ORDER BY product_id");
        let pattern = format!("%{content}%");
        tracing::debug!(sql = %sql, "select products by content");
        let rows = sqlx::query(&sql).bind(&pattern).fetch_all(pool).await?;
        rows.iter().map(row_to_product).collect()
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Product>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM product ORDER BY product_id");
        tracing::debug!(sql = %sql, "select all products");
        let rows = sqlx::query(&sql).fetch_all(pool).await?;
        rows.iter().map(row_to_product).collect()
    }
}

/// Rebuild a product from a row, re-running field validation.
fn row_to_product(row: &PgRow) -> Result<Product, AppError> {
    let product_id: i64 = row.try_get("product_id")?;
    let profile_id: i64 = row.try_get("product_profile_id")?;
    let content: String = row.try_get("product_content")?;
    let date: DateTime<Utc> = row.try_get("product_date")?;
    Product::new(Some(product_id), profile_id, &content, Some(date))
        .map_err(|e| AppError::Persistence(format!("corrupt product row {product_id}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://postgres@127.0.0.1/data_design_guard_tests")
            .expect("lazy pool")
    }

    #[tokio::test]
    async fn insert_rejects_an_already_persisted_product() {
        let mut product = Product::new(Some(3), 5, "hello", None).unwrap();
        let err = ProductStore::insert(&lazy_pool(), &mut product).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_and_delete_require_an_id() {
        let product = Product::new(None, 5, "hello", None).unwrap();
        assert!(matches!(
            ProductStore::update(&lazy_pool(), &product).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            ProductStore::delete(&lazy_pool(), &product).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn finders_validate_their_arguments() {
        assert!(matches!(
            ProductStore::find_by_id(&lazy_pool(), -4).await,
            Err(AppError::Range(_))
        ));
        assert!(matches!(
            ProductStore::find_by_profile_id(&lazy_pool(), 0).await,
            Err(AppError::Range(_))
        ));
        assert!(matches!(
            ProductStore::find_by_content(&lazy_pool(), "   ").await,
            Err(AppError::Invalid(_))
        ));
    }
}
