//! Document repository for database operations.

use chrono::Utc;
use docengine_core::approval::{ApprovalStep, Document};
use docengine_shared::types::{ApprovalStepId, DocumentId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::entities::{
    approval_steps, documents,
    sea_orm_active_enums::{DocumentStatus, StepStatus},
};

/// Error types for document operations.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Title is blank or longer than 255 characters.
    #[error("Title must be between 1 and {} characters", Document::MAX_TITLE_LEN)]
    InvalidTitle,

    /// Document not found.
    #[error("Document not found: {0}")]
    NotFound(DocumentId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Document repository for creation and reads.
///
/// Status changes are not made here; they go through
/// [`ApprovalRepository`](super::ApprovalRepository).
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: DatabaseConnection,
}

impl DocumentRepository {
    /// Creates a new document repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidTitle` if the trimmed title is empty or too long.
    pub async fn create(&self, title: &str) -> Result<Document, DocumentError> {
        let title = Document::normalize_title(title).ok_or(DocumentError::InvalidTitle)?;

        let document = documents::ActiveModel {
            id: Set(DocumentId::new().into_inner()),
            title: Set(title),
            status: Set(DocumentStatus::Pending),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        debug!(document_id = %document.id, "Document created");
        Ok(document.into())
    }

    /// Finds a document by ID.
    pub async fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, DbErr> {
        let found = documents::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(found.map(Into::into))
    }

    /// Lists the steps of a document, ascending by `step_order`.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::NotFound` if the document does not exist.
    pub async fn list_steps(&self, id: DocumentId) -> Result<Vec<ApprovalStep>, DocumentError> {
        if self.find_by_id(id).await?.is_none() {
            return Err(DocumentError::NotFound(id));
        }

        let steps = approval_steps::Entity::find()
            .filter(approval_steps::Column::DocumentId.eq(id.into_inner()))
            .order_by_asc(approval_steps::Column::StepOrder)
            .all(&self.db)
            .await?;

        Ok(steps.into_iter().map(Into::into).collect())
    }

    /// Attaches pending steps to a document, one per approver, in the given order.
    ///
    /// Orders continue after the highest existing `step_order`. Used by the
    /// seeder and by tests; the HTTP surface does not create steps.
    pub async fn add_steps(
        &self,
        id: DocumentId,
        approvers: &[UserId],
    ) -> Result<Vec<ApprovalStep>, DocumentError> {
        let txn = self.db.begin().await?;

        if documents::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(DocumentError::NotFound(id));
        }

        let last_order = approval_steps::Entity::find()
            .filter(approval_steps::Column::DocumentId.eq(id.into_inner()))
            .order_by_desc(approval_steps::Column::StepOrder)
            .one(&txn)
            .await?
            .map_or(0, |step| step.step_order);

        let mut created = Vec::with_capacity(approvers.len());
        for (approver_id, step_order) in approvers.iter().zip(last_order + 1..) {
            let step = approval_steps::ActiveModel {
                id: Set(ApprovalStepId::new().into_inner()),
                document_id: Set(id.into_inner()),
                approver_id: Set(approver_id.into_inner()),
                step_order: Set(step_order),
                status: Set(StepStatus::Pending),
            }
            .insert(&txn)
            .await?;
            created.push(step.into());
        }

        txn.commit().await?;
        Ok(created)
    }
}
