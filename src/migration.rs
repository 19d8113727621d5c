//! Schema DDL. Order follows foreign-key dependencies: profile, product, favorite.

use sqlx::PgPool;

use crate::error::AppError;

const PROFILE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS profile (
    profile_id BIGSERIAL PRIMARY KEY,
    profile_activation_token CHAR(32) NOT NULL,
    profile_at_handle VARCHAR(32) NOT NULL,
    profile_email VARCHAR(32) NOT NULL,
    profile_pass_hash CHAR(128) NOT NULL,
    profile_salt_hash CHAR(64) NOT NULL
)
"#;

const PRODUCT_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS product (
    product_id BIGSERIAL PRIMARY KEY,
    product_profile_id BIGINT NOT NULL REFERENCES profile (profile_id),
    product_content VARCHAR(140) NOT NULL,
    product_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const FAVORITE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS favorite (
    favorite_product_id BIGINT NOT NULL REFERENCES product (product_id),
    favorite_profile_id BIGINT NOT NULL REFERENCES profile (profile_id),
    favorite_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (favorite_product_id, favorite_profile_id)
)
"#;

const INDEX_DDL: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS product_profile_id_idx ON product (product_profile_id)",
    "CREATE INDEX IF NOT EXISTS favorite_profile_id_idx ON favorite (favorite_profile_id)",
];

/// Create the three tables and their indexes if absent. Idempotent.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for ddl in [PROFILE_DDL, PRODUCT_DDL, FAVORITE_DDL] {
        sqlx::query(ddl).execute(pool).await?;
    }
    for ddl in INDEX_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!("schema is up to date");
    Ok(())
}
