//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::Reply;

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or missing required data.
    #[error("{0}")]
    Invalid(String),
    /// Value outside allowed bounds or length.
    #[error("{0}")]
    Range(String),
    /// Operation invalid for the entity's current state.
    #[error("{0}")]
    Conflict(String),
    /// Referenced entity absent.
    #[error("{0}")]
    NotFound(String),
    /// Store-level failure, e.g. a row that no longer satisfies the entity contract.
    #[error("persistence: {0}")]
    Persistence(String),
    /// Driver failure. Rendered as a generic message; detail stays in the log.
    #[error("database error")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Invalid(_) => StatusCode::BAD_REQUEST,
            AppError::Range(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Db(ref source) = self {
            tracing::error!(error = %source, "database error");
        }
        let body: Reply<()> = Reply {
            status: status.as_u16(),
            message: Some(self.to_string()),
            data: None,
        };
        (status, Json(body)).into_response()
    }
}
