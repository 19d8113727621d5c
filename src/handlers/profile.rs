//! `/profile` resource: GET by id or all; POST; PUT; DELETE.

use axum::{
    extract::{Query, State},
    response::Response,
    Json,
};
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::AppError;
use crate::handlers::{int_param, required_id};
use crate::model::Profile;
use crate::response;
use crate::state::AppState;
use crate::store::ProfileStore;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    profile_activation_token: Option<String>,
    profile_at_handle: Option<String>,
    profile_email: Option<String>,
    profile_pass_hash: Option<String>,
    profile_salt_hash: Option<String>,
}

/// GET: a specific profile by `id`, otherwise all profiles.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    if let Some(id) = int_param(&params, "id")? {
        return match ProfileStore::find_by_id(&state.pool, id).await? {
            Some(profile) => Ok(response::data(profile)),
            None => Ok(response::empty()),
        };
    }
    let profiles = ProfileStore::find_all(&state.pool).await?;
    Ok(response::data(profiles))
}

/// POST: construct a new profile from the body and insert it.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ProfileBody>,
) -> Result<Response, AppError> {
    let activation_token = body
        .profile_activation_token
        .as_deref()
        .ok_or_else(|| AppError::Invalid("no activation token for profile".into()))?;
    let at_handle = body
        .profile_at_handle
        .as_deref()
        .ok_or_else(|| AppError::Invalid("no at handle for profile".into()))?;
    let email = body
        .profile_email
        .as_deref()
        .ok_or_else(|| AppError::Invalid("no email for profile".into()))?;
    let pass_hash = body
        .profile_pass_hash
        .as_deref()
        .ok_or_else(|| AppError::Invalid("no password hash for profile".into()))?;
    let salt_hash = body
        .profile_salt_hash
        .as_deref()
        .ok_or_else(|| AppError::Invalid("no salt hash for profile".into()))?;

    let mut profile = Profile::new(None, activation_token, at_handle, email, pass_hash, salt_hash)?;
    ProfileStore::insert(&state.pool, &mut profile).await?;
    tracing::info!(profile_id = ?profile.profile_id(), "profile created");
    Ok(response::created("profile created OK", profile))
}

/// PUT: fetch the profile named by `id`, apply body mutators, persist.
/// Handle and email are required; credential fields update only when present.
pub async fn update(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<ProfileBody>,
) -> Result<Response, AppError> {
    let id = required_id(&params)?;
    let mut profile = ProfileStore::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("profile does not exist".into()))?;

    let at_handle = body
        .profile_at_handle
        .as_deref()
        .ok_or_else(|| AppError::Invalid("no at handle for profile".into()))?;
    let email = body
        .profile_email
        .as_deref()
        .ok_or_else(|| AppError::Invalid("no email for profile".into()))?;
    profile.set_at_handle(at_handle)?;
    profile.set_email(email)?;
    if let Some(token) = body.profile_activation_token.as_deref() {
        profile.set_activation_token(token)?;
    }
    if let Some(pass_hash) = body.profile_pass_hash.as_deref() {
        profile.set_pass_hash(pass_hash)?;
    }
    if let Some(salt_hash) = body.profile_salt_hash.as_deref() {
        profile.set_salt_hash(salt_hash)?;
    }

    ProfileStore::update(&state.pool, &profile).await?;
    Ok(response::message_with_data("profile updated OK", profile))
}

/// DELETE: fetch the profile named by `id`, then delete it.
pub async fn destroy(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let id = required_id(&params)?;
    let profile = ProfileStore::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("profile does not exist".into()))?;
    ProfileStore::delete(&state.pool, &profile).await?;
    tracing::info!(profile_id = id, "profile deleted");
    Ok(response::message_with_data("profile deleted OK", profile))
}
