use super::jwt::{CurrentUser, JwtAuth};
use crate::errors::{AppError, ErrorCode};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

/// Bearer token from `Authorization`, falling back to the `access_token` cookie.
pub(crate) fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .or_else(|| {
            headers
                .get(header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        cookie
                            .trim()
                            .strip_prefix("access_token=")
                            .filter(|token| !token.is_empty())
                    })
                })
        })
}

/// Attach the caller's [`CurrentUser`] to the request when a valid token is sent.
///
/// Missing or invalid tokens leave the request anonymous; access decisions
/// belong to [`require_role`].
pub async fn identity_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = extract_token(request.headers()).and_then(|token| match auth.verify(token) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!("Ignoring invalid session token: {}", e);
            None
        }
    });

    if let Some(user) = user {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

/// Role a route demands, passed as state to [`require_role`].
#[derive(Clone, Copy, Debug)]
pub struct RequiredRole(pub &'static str);

impl RequiredRole {
    pub const ADMIN: RequiredRole = RequiredRole("admin");
}

/// Reject with 403 unless the caller has the required role.
///
/// An anonymous caller is treated the same as one with the wrong role.
pub async fn require_role(
    State(RequiredRole(role)): State<RequiredRole>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match request.extensions().get::<CurrentUser>() {
        Some(user) if user.has_role(role) => Ok(next.run(request).await),
        Some(user) => {
            tracing::warn!(user_id = %user.id, role = %user.role, required = role, "Role check failed");
            Err(forbidden())
        }
        None => {
            tracing::warn!(required = role, "Role check failed for anonymous caller");
            Err(forbidden())
        }
    }
}

fn forbidden() -> AppError {
    AppError::Forbidden(ErrorCode::Forbidden.default_message().to_string())
}
