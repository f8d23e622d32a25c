//! Approval decision routes.
//!
//! `POST /documents/{document_id}/steps/{step_id}/approve` and `.../reject`.
//! The approver is always the authenticated user.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    response::IntoResponse,
    routing::post,
};
use docengine_core::approval::{ApprovalError, Decision, DecisionError};
use docengine_db::ApprovalRepository;
use docengine_shared::types::{ApprovalStepId, DocumentId};
use uuid::Uuid;

use crate::AppState;
use crate::error::{decision_error_response, path_rejection_response};
use crate::middleware::AuthUser;

/// Creates the approval router.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/documents/{document_id}/steps/{step_id}/{decision}",
        post(decide_step),
    )
}

/// POST /documents/{document_id}/steps/{step_id}/{decision} - Approve or reject a step.
async fn decide_step(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<(Uuid, Uuid, String)>, PathRejection>,
) -> impl IntoResponse {
    let Path((document_id, step_id, decision)) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejection_response(&rejection),
    };
    let step_id = ApprovalStepId::from(step_id);

    let decision = match decision.parse::<Decision>() {
        Ok(decision) => decision,
        Err(reason) => {
            let err = DecisionError::from(ApprovalError::InvalidStepTransition { step_id, reason });
            return decision_error_response(&err);
        }
    };

    let repo = ApprovalRepository::new((*state.db).clone());
    match repo
        .decide(
            DocumentId::from(document_id),
            step_id,
            auth.user_id(),
            decision,
        )
        .await
    {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => decision_error_response(&e),
    }
}
