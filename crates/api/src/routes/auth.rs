//! Authentication routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use docengine_core::auth::{
    AuthError, UserCredentials, normalize_email, require_password, verify_login,
};
use docengine_db::UserRepository;
use docengine_shared::{LoginRequest, TokenResponse};
use tracing::{error, info};

use crate::AppState;
use crate::error::{error_response, json_rejection_response};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

fn auth_error_response(e: &AuthError) -> Response {
    let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %e, "Login failed unexpectedly");
        return error_response(status, e.error_code(), "An error occurred during login");
    }
    error_response(status, e.error_code(), e.to_string())
}

fn internal_error() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An error occurred during login",
    )
}

/// POST /auth/login - Authenticate a user and return an access token.
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(&rejection),
    };
    let email = match normalize_email(&payload.email) {
        Ok(email) => email,
        Err(e) => return auth_error_response(&e),
    };
    if let Err(e) = require_password(&payload.password) {
        return auth_error_response(&e);
    }

    let user_repo = UserRepository::new((*state.db).clone());
    let found: Option<UserCredentials> = match user_repo.find_by_email(&email).await {
        Ok(found) => found.map(Into::into),
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error();
        }
    };

    let user = match verify_login(&email, found, &payload.password) {
        Ok(user) => user,
        Err(e) => {
            info!(email = %email, reason = e.error_code(), "Failed login attempt");
            return auth_error_response(&e);
        }
    };

    let access_token = match state
        .jwt_service
        .generate_access_token(user.id.into_inner(), &user.email)
    {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error();
        }
    };

    info!(user_id = %user.id, "User logged in");
    (
        StatusCode::OK,
        Json(TokenResponse::bearer(
            access_token,
            state.jwt_service.access_token_expires_in(),
        )),
    )
        .into_response()
}
