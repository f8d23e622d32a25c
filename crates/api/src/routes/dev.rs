//! Developer shortcuts, mounted outside production only.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use docengine_core::auth::{PasswordError, hash_password, normalize_email};
use docengine_db::{UserError, UserRepository};
use docengine_shared::AppError;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::{app_error_response, json_rejection_response};

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
}

/// Created user.
#[derive(Debug, Serialize)]
pub struct CreatedUser {
    /// User ID.
    pub id: Uuid,
    /// Stored (normalized) email.
    pub email: String,
}

/// Creates the developer router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dev/users", post(create_user))
}

/// POST /dev/users - Create an active user.
async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(&rejection),
    };
    let Ok(email) = normalize_email(&payload.email) else {
        return app_error_response(&AppError::Validation("Email must be provided.".to_string()));
    };

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(PasswordError::Empty) => {
            return app_error_response(&AppError::Validation(
                "Password must be provided.".to_string(),
            ));
        }
        Err(e) => return app_error_response(&AppError::Internal(e.to_string())),
    };

    let repo = UserRepository::new((*state.db).clone());
    match repo.create(&email, &password_hash).await {
        Ok(user) => {
            info!(user_id = %user.id, "Developer user created");
            (
                StatusCode::CREATED,
                Json(CreatedUser {
                    id: user.id,
                    email: user.email,
                }),
            )
                .into_response()
        }
        Err(UserError::EmailTaken(email)) => app_error_response(&AppError::Conflict(format!(
            "Email '{email}' is already registered"
        ))),
        Err(UserError::Database(e)) => app_error_response(&AppError::Database(e.to_string())),
    }
}
