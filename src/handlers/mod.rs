//! HTTP handlers translating verb + query params + JSON body into entity operations.

pub mod product;
pub mod profile;

use std::collections::HashMap;

use crate::error::AppError;

/// Parse an integer query parameter. Present-but-malformed values are
/// rejected rather than silently dropped.
fn int_param(params: &HashMap<String, String>, name: &str) -> Result<Option<i64>, AppError> {
    match params.get(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::Invalid(format!("{name} must be an integer"))),
    }
}

/// Mutating methods need a positive `id` query parameter.
fn required_id(params: &HashMap<String, String>) -> Result<i64, AppError> {
    match int_param(params, "id")? {
        Some(id) if id > 0 => Ok(id),
        _ => Err(AppError::Invalid("id cannot be empty or negative".into())),
    }
}
