//! Profile persistence.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::error::AppError;
use crate::model::Profile;
use crate::store::require_positive;

const COLUMNS: &str = "profile_id, profile_activation_token, profile_at_handle, \
     profile_email, profile_pass_hash, profile_salt_hash";

pub struct ProfileStore;

impl ProfileStore {
    /// Insert a new profile and assign the store-generated id.
    pub async fn insert(pool: &PgPool, profile: &mut Profile) -> Result<(), AppError> {
        if profile.profile_id().is_some() {
            return Err(AppError::Conflict("not a new profile".into()));
        }
        let sql = "INSERT INTO profile (profile_activation_token, profile_at_handle, \
             profile_email, profile_pass_hash, profile_salt_hash) \
             VALUES ($1, $2, $3, $4, $5) RETURNING profile_id";
        tracing::debug!(sql, "insert profile");
        let row = sqlx::query(sql)
            .bind(profile.activation_token())
            .bind(profile.at_handle())
            .bind(profile.email())
            .bind(profile.pass_hash())
            .bind(profile.salt_hash())
            .fetch_one(pool)
            .await?;
        profile.assign_id(row.try_get("profile_id")?);
        Ok(())
    }

    /// Update the mutable columns of a persisted profile.
    pub async fn update(pool: &PgPool, profile: &Profile) -> Result<(), AppError> {
        let Some(profile_id) = profile.profile_id() else {
            return Err(AppError::NotFound(
                "unable to update a profile that does not exist".into(),
            ));
        };
        let sql = "UPDATE profile SET profile_activation_token = $1, profile_at_handle = $2, \
             profile_email = $3, profile_pass_hash = $4, profile_salt_hash = $5 \
             WHERE profile_id = $6";
        tracing::debug!(sql, profile_id, "update profile");
        let result = sqlx::query(sql)
            .bind(profile.activation_token())
            .bind(profile.at_handle())
            .bind(profile.email())
            .bind(profile.pass_hash())
            .bind(profile.salt_hash())
            .bind(profile_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("profile does not exist".into()));
        }
        Ok(())
    }

    /// Delete a persisted profile by primary key.
    pub async fn delete(pool: &PgPool, profile: &Profile) -> Result<(), AppError> {
        let Some(profile_id) = profile.profile_id() else {
            return Err(AppError::NotFound(
                "unable to delete a profile that does not exist".into(),
            ));
        };
        let sql = "DELETE FROM profile WHERE profile_id = $1";
        tracing::debug!(sql, profile_id, "delete profile");
        let result = sqlx::query(sql).bind(profile_id).execute(pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("profile does not exist".into()));
        }
        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, profile_id: i64) -> Result<Option<Profile>, AppError> {
        require_positive("profile id", profile_id)?;
        let sql = format!("SELECT {COLUMNS} FROM profile WHERE profile_id = $1");
        tracing::debug!(sql = %sql, profile_id, "select profile");
        let row = sqlx::query(&sql).bind(profile_id).fetch_optional(pool).await?;
        row.as_ref().map(row_to_profile).transpose()
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Profile>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM profile ORDER BY profile_id");
        tracing::debug!(sql = %sql, "select all profiles");
        let rows = sqlx::query(&sql).fetch_all(pool).await?;
        rows.iter().map(row_to_profile).collect()
    }
}

/// Rebuild a profile from a row, re-running field validation. A row that no
/// longer satisfies the contract fails the whole query.
fn row_to_profile(row: &PgRow) -> Result<Profile, AppError> {
    let profile_id: i64 = row.try_get("profile_id")?;
    let activation_token: String = row.try_get("profile_activation_token")?;
    let at_handle: String = row.try_get("profile_at_handle")?;
    let email: String = row.try_get("profile_email")?;
    let pass_hash: String = row.try_get("profile_pass_hash")?;
    let salt_hash: String = row.try_get("profile_salt_hash")?;
    Profile::new(
        Some(profile_id),
        &activation_token,
        &at_handle,
        &email,
        &pass_hash,
        &salt_hash,
    )
    .map_err(|e| AppError::Persistence(format!("corrupt profile row {profile_id}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Profile;
    use sqlx::postgres::PgPoolOptions;

    // A lazy pool performs no IO until the first statement, so guard paths
    // are testable without a database.
    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://postgres@127.0.0.1/data_design_guard_tests")
            .expect("lazy pool")
    }

    fn persisted_profile() -> Profile {
        Profile::new(
            Some(9),
            &"a".repeat(32),
            "kkristl",
            "kkristl@cnm.edu",
            &"b".repeat(128),
            &"c".repeat(64),
        )
        .unwrap()
    }

    fn new_profile() -> Profile {
        Profile::new(
            None,
            &"a".repeat(32),
            "kkristl",
            "kkristl@cnm.edu",
            &"b".repeat(128),
            &"c".repeat(64),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn insert_rejects_an_already_persisted_profile() {
        let mut profile = persisted_profile();
        let err = ProfileStore::insert(&lazy_pool(), &mut profile).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_and_delete_require_an_id() {
        let profile = new_profile();
        assert!(matches!(
            ProfileStore::update(&lazy_pool(), &profile).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            ProfileStore::delete(&lazy_pool(), &profile).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn finders_reject_non_positive_ids() {
        assert!(matches!(
            ProfileStore::find_by_id(&lazy_pool(), 0).await,
            Err(AppError::Range(_))
        ));
    }
}
