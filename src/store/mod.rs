//! Persistence gateway: per-entity CRUD against PostgreSQL.
//! Every statement is parameterized; fetched rows are re-validated
//! through the entity constructors before they leave the gateway.

mod favorite;
mod product;
mod profile;

pub use favorite::FavoriteStore;
pub use product::ProductStore;
pub use profile::ProfileStore;

use crate::error::AppError;

/// Finder arguments are bounds-checked before any statement executes.
fn require_positive(label: &str, id: i64) -> Result<(), AppError> {
    if id <= 0 {
        return Err(AppError::Range(format!("{label} is not positive")));
    }
    Ok(())
}
