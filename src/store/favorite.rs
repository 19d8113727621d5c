//! Favorite persistence. Identity is the (product id, profile id) pair.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::error::AppError;
use crate::model::Favorite;
use crate::store::require_positive;

const COLUMNS: &str = "favorite_product_id, favorite_profile_id, favorite_date";

pub struct FavoriteStore;

impl FavoriteStore {
    /// Insert a favorite. Both linkage ids must already be set.
    pub async fn insert(pool: &PgPool, favorite: &Favorite) -> Result<(), AppError> {
        let Some(product_id) = favorite.product_id() else {
            return Err(AppError::Conflict("favorite is missing a product id".into()));
        };
        let Some(profile_id) = favorite.profile_id() else {
            return Err(AppError::Conflict("favorite is missing a profile id".into()));
        };
        let sql = "INSERT INTO favorite (favorite_product_id, favorite_profile_id, favorite_date) \
             VALUES ($1, $2, $3)";
        tracing::debug!(sql, product_id, profile_id, "insert favorite");
        sqlx::query(sql)
            .bind(product_id)
            .bind(profile_id)
            .bind(favorite.date())
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a favorite by composite identity.
    pub async fn delete(pool: &PgPool, favorite: &Favorite) -> Result<(), AppError> {
        let (Some(product_id), Some(profile_id)) = (favorite.product_id(), favorite.profile_id())
        else {
            return Err(AppError::NotFound(
                "unable to delete a favorite that does not exist".into(),
            ));
        };
        let sql = "DELETE FROM favorite WHERE favorite_product_id = $1 AND favorite_profile_id = $2";
        tracing::debug!(sql, product_id, profile_id, "delete favorite");
        let result = sqlx::query(sql)
            .bind(product_id)
            .bind(profile_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("favorite does not exist".into()));
        }
        Ok(())
    }

    pub async fn find_by_key(
        pool: &PgPool,
        product_id: i64,
        profile_id: i64,
    ) -> Result<Option<Favorite>, AppError> {
        require_positive("favorite product id", product_id)?;
        require_positive("favorite profile id", profile_id)?;
        let sql = format!(
            "SELECT {COLUMNS} FROM favorite WHERE favorite_product_id = $1 AND favorite_profile_id = $2"
        );
        tracing::debug!(sql = %sql, product_id, profile_id, "select favorite");
        let row = sqlx::query(&sql)
            .bind(product_id)
            .bind(profile_id)
            .fetch_optional(pool)
            .await?;
        row.as_ref().map(row_to_favorite).transpose()
    }

    pub async fn find_by_profile_id(
        pool: &PgPool,
        profile_id: i64,
    ) -> Result<Vec<Favorite>, AppError> {
        require_positive("favorite profile id", profile_id)?;
        let sql = format!(
            "SELECT {COLUMNS} FROM favorite WHERE favorite_profile_id = $1 ORDER BY favorite_product_id"
        );
        tracing::debug!(sql = %sql, profile_id, "select favorites by profile");
        let rows = sqlx::query(&sql).bind(profile_id).fetch_all(pool).await?;
        rows.iter().map(row_to_favorite).collect()
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Favorite>, AppError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM favorite ORDER BY favorite_profile_id, favorite_product_id"
        );
        tracing::debug!(sql = %sql, "select all favorites");
        let rows = sqlx::query(&sql).fetch_all(pool).await?;
        rows.iter().map(row_to_favorite).collect()
    }
}

fn row_to_favorite(row: &PgRow) -> Result<Favorite, AppError> {
    let product_id: i64 = row.try_get("favorite_product_id")?;
    let profile_id: i64 = row.try_get("favorite_profile_id")?;
    let date: DateTime<Utc> = row.try_get("favorite_date")?;
    Favorite::new(Some(product_id), Some(profile_id), Some(date)).map_err(|e| {
        AppError::Persistence(format!(
            "corrupt favorite row ({product_id}, {profile_id}): {e}"
        ))
    })
}
