//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, header::AUTHORIZATION, header::WWW_AUTHENTICATE, request::Parts},
    middleware::Next,
    response::Response,
};
use docengine_db::UserRepository;
use docengine_shared::{AppError, Claims, types::UserId};
use tracing::debug;

use crate::AppState;
use crate::error::app_error_response;

/// Message returned for every authentication failure.
pub const CREDENTIALS_MESSAGE: &str = "Could not validate credentials.";

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn unauthorized() -> Response {
    let mut response =
        app_error_response(&AppError::Unauthorized(CREDENTIALS_MESSAGE.to_string()));
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Checks that the subject still exists and is active
/// 4. Stores the claims in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return unauthorized();
    };

    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Rejected bearer token");
            return unauthorized();
        }
    };

    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo.find_by_id(UserId::from(claims.user_id())).await {
        Ok(Some(user)) if user.is_active => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Ok(_) => {
            debug!(user_id = %claims.sub, "Token subject missing or inactive");
            unauthorized()
        }
        Err(e) => app_error_response(&AppError::Database(e.to_string())),
    }
}

/// Extractor for authenticated user claims.
///
/// Use this in handlers to get the authenticated user:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let approver = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the authenticated user's ID.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from(self.0.user_id())
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(unauthorized)
    }
}
