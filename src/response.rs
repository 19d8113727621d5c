//! Standard reply envelope: `{status, message?, data?}` with absent fields omitted.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Reply<T> {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 200 with an entity (or list) as `data`.
pub fn data<T: Serialize>(value: T) -> Response {
    let body = Reply {
        status: StatusCode::OK.as_u16(),
        message: None,
        data: Some(value),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// 200 with neither `message` nor `data`, e.g. a fetch that matched nothing.
pub fn empty() -> Response {
    let body: Reply<()> = Reply {
        status: StatusCode::OK.as_u16(),
        message: None,
        data: None,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// 201 with a human-readable message and the created entity.
pub fn created<T: Serialize>(message: &str, value: T) -> Response {
    let body = Reply {
        status: StatusCode::CREATED.as_u16(),
        message: Some(message.to_string()),
        data: Some(value),
    };
    (StatusCode::CREATED, Json(body)).into_response()
}

/// 200 with a message and an entity, for updates and deletes.
pub fn message_with_data<T: Serialize>(message: &str, value: T) -> Response {
    let body = Reply {
        status: StatusCode::OK.as_u16(),
        message: Some(message.to_string()),
        data: Some(value),
    };
    (StatusCode::OK, Json(body)).into_response()
}
