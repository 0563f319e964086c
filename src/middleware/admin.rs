use crate::{config::site::SiteConfig, error::AppError};
use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
    Extension,
};

/// Marker put into request extensions once the admin token has been verified.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser;

/// Bearer-token guard for the admin API.
///
/// The token is compared against `ADMIN_TOKEN`; when no token is configured
/// every admin request is refused.
pub async fn admin_auth_middleware(
    Extension(site): Extension<SiteConfig>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let expected = site.admin_token.as_deref().ok_or(AppError::Unauthorized)?;
    let provided = extract_bearer_token(&headers).ok_or(AppError::Unauthorized)?;

    if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
        tracing::warn!("rejected admin request with invalid token");
        return Err(AppError::Unauthorized);
    }

    request.extensions_mut().insert(AdminUser);
    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?
        .strip_prefix("Bearer ")?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminUser>()
            .copied()
            .ok_or(AppError::Unauthorized)
    }
}
