//! Bearer-token authentication middleware for the REST API.
//!
//! Every API route is gated by a static bearer token configured via the
//! `API_TOKEN` environment variable. The check is a plain comparison; callers
//! are other backend services of the community (exporter, dashboards), not
//! end users.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

/// Requires a valid `Authorization: Bearer <token>` header on the request.
///
/// # Arguments
/// - `state` - Application state carrying the configured token
/// - `request` - The incoming request
/// - `next` - The rest of the middleware/handler chain
///
/// # Returns
/// - `Ok(Response)` - The downstream response when the token matches
/// - `Err(AppError::Unauthorized)` - Header missing, malformed, or wrong token
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if token == state.config.api_token => Ok(next.run(request).await),
        _ => Err(AppError::Unauthorized(
            "missing or invalid bearer token".to_string(),
        )),
    }
}
