use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::error::ApiError;

/// Authenticated caller, injected into request extensions by [`jwt_auth_middleware`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// JWT authentication middleware that validates tokens and extracts user context.
///
/// Runs before any extractor of the protected handlers, so an unauthenticated
/// request never reaches body validation or the store.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        ApiError::unauthorized("Invalid or expired token")
    })?;

    request.extensions_mut().insert(AuthUser { user_id: claims.sub });

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The header must split on single spaces into exactly two parts, the first
/// being the literal `Bearer`.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Token not provided"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid token format"))?;

    let parts: Vec<&str> = auth_str.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok(token),
        _ => Err(ApiError::unauthorized("Invalid token format")),
    }
}
