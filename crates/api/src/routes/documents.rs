//! Document routes.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use docengine_db::{DocumentError, DocumentRepository};
use docengine_shared::{AppError, types::DocumentId};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::{app_error_response, json_rejection_response, path_rejection_response};
use crate::middleware::AuthUser;

/// Request body for creating a document.
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    /// Document title, 1 to 255 characters after trimming.
    pub title: String,
}

/// Creates the document router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", post(create_document))
        .route("/documents/{document_id}", get(get_document))
        .route("/documents/{document_id}/steps", get(list_steps))
}

fn document_error_response(e: DocumentError) -> Response {
    let err = match e {
        DocumentError::InvalidTitle => AppError::Validation(e.to_string()),
        DocumentError::NotFound(_) => AppError::NotFound("Document not found.".to_string()),
        DocumentError::Database(db) => AppError::Database(db.to_string()),
    };
    app_error_response(&err)
}

/// POST /documents - Create a pending document.
async fn create_document(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateDocumentRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(&rejection),
    };
    let repo = DocumentRepository::new((*state.db).clone());

    match repo.create(&payload.title).await {
        Ok(document) => {
            info!(document_id = %document.id, created_by = %auth.user_id(), "Document created");
            (StatusCode::CREATED, Json(document)).into_response()
        }
        Err(e) => document_error_response(e),
    }
}

/// GET /documents/{document_id} - Fetch one document.
async fn get_document(
    State(state): State<AppState>,
    _auth: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> impl IntoResponse {
    let Path(document_id) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejection_response(&rejection),
    };
    let repo = DocumentRepository::new((*state.db).clone());

    match repo.find_by_id(DocumentId::from(document_id)).await {
        Ok(Some(document)) => Json(document).into_response(),
        Ok(None) => app_error_response(&AppError::NotFound("Document not found.".to_string())),
        Err(e) => app_error_response(&AppError::Database(e.to_string())),
    }
}

/// GET /documents/{document_id}/steps - List a document's steps in order.
async fn list_steps(
    State(state): State<AppState>,
    _auth: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> impl IntoResponse {
    let Path(document_id) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejection_response(&rejection),
    };
    let repo = DocumentRepository::new((*state.db).clone());

    match repo.list_steps(DocumentId::from(document_id)).await {
        Ok(steps) => Json(steps).into_response(),
        Err(e) => document_error_response(e),
    }
}
