//! `/product` resource: GET by id, profile, content, or all; POST; PUT; DELETE.

use axum::{
    extract::{Query, State},
    response::Response,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::AppError;
use crate::handlers::{int_param, required_id};
use crate::model::Product;
use crate::response;
use crate::state::AppState;
use crate::store::ProductStore;
use crate::validation::parse_timestamp;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    profile_id: Option<i64>,
    product_content: Option<String>,
    product_date: Option<Value>,
}

/// GET: a specific product by `id`, a profile's products by `profileId`,
/// a content search by `content`, otherwise all products.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    if let Some(id) = int_param(&params, "id")? {
        return match ProductStore::find_by_id(&state.pool, id).await? {
            Some(product) => Ok(response::data(product)),
            None => Ok(response::empty()),
        };
    }
    if let Some(profile_id) = int_param(&params, "profileId")? {
        let products = ProductStore::find_by_profile_id(&state.pool, profile_id).await?;
        return Ok(response::data(products));
    }
    if let Some(content) = params.get("content") {
        let products = ProductStore::find_by_content(&state.pool, content).await?;
        return Ok(response::data(products));
    }
    let products = ProductStore::find_all(&state.pool).await?;
    Ok(response::data(products))
}

/// POST: construct a new product from the body and insert it.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ProductBody>,
) -> Result<Response, AppError> {
    let profile_id = body
        .profile_id
        .ok_or_else(|| AppError::Invalid("no profile id for product".into()))?;
    let content = body
        .product_content
        .as_deref()
        .ok_or_else(|| AppError::Invalid("no content for product".into()))?;
    let date = parse_timestamp(body.product_date.as_ref())?;

    let mut product = Product::new(None, profile_id, content, Some(date))?;
    ProductStore::insert(&state.pool, &mut product).await?;
    tracing::info!(product_id = ?product.product_id(), "product created");
    Ok(response::created("product created OK", product))
}

/// PUT: fetch the product named by `id`, apply body mutators, persist.
pub async fn update(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<ProductBody>,
) -> Result<Response, AppError> {
    let id = required_id(&params)?;
    let mut product = ProductStore::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("product does not exist".into()))?;

    let content = body
        .product_content
        .as_deref()
        .ok_or_else(|| AppError::Invalid("no content for product".into()))?;
    product.set_content(content)?;
    if let Some(raw_date) = body.product_date.as_ref() {
        product.set_date(Some(parse_timestamp(Some(raw_date))?));
    }
    if let Some(profile_id) = body.profile_id {
        product.set_profile_id(profile_id)?;
    }

    ProductStore::update(&state.pool, &product).await?;
    Ok(response::message_with_data("product updated OK", product))
}

/// DELETE: fetch the product named by `id`, then delete it.
pub async fn destroy(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let id = required_id(&params)?;
    let product = ProductStore::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("product does not exist".into()))?;
    ProductStore::delete(&state.pool, &product).await?;
    tracing::info!(product_id = id, "product deleted");
    Ok(response::message_with_data("product deleted OK", product))
}
