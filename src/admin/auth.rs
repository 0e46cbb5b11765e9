use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::http::request::request_id;

/// Bearer key accepted by the admin routes.
#[derive(Clone)]
pub struct AdminKey(Arc<str>);

impl AdminKey {
    pub fn new(key: &str) -> Self {
        Self(Arc::from(key))
    }
}

pub async fn admin_auth_middleware(
    State(key): State<AdminKey>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(token) if !key.0.is_empty() && token == &*key.0 => Ok(next.run(request).await),
        _ => {
            tracing::warn!(
                request_id = %request_id(request.headers()),
                path = %request.uri().path(),
                "Rejected admin request"
            );
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
