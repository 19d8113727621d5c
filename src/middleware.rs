//! Verb override: an `X-HTTP-Method` header replaces the transport method
//! before routing, for clients that can only emit GET and POST.

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::Response,
};

pub const METHOD_OVERRIDE_HEADER: &str = "x-http-method";

/// Known override verbs only; anything else is ignored.
pub async fn method_override(mut req: Request, next: Next) -> Response {
    let overridden = req
        .headers()
        .get(METHOD_OVERRIDE_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Method::from_bytes(value.trim().to_uppercase().as_bytes()).ok());
    if let Some(method) = overridden {
        if matches!(method, Method::GET | Method::POST | Method::PUT | Method::DELETE) {
            *req.method_mut() = method;
        }
    }
    next.run(req).await
}
