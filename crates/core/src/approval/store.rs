//! Persistence boundary of the approval workflow.

use async_trait::async_trait;
use docengine_shared::types::{ApprovalStepId, DocumentId};

use crate::approval::error::StoreError;
use crate::approval::types::{ApprovalOutcome, ApprovalStep, Document};

/// Repository the approval workflow reads from and writes to.
///
/// A single decide-step call issues all of its reads and its one write
/// through the same store. Implementations backed by a database are expected
/// to wrap that call in one transaction that holds a lock on the document,
/// so that two concurrent decisions on the same document are serialized.
#[async_trait]
pub trait ApprovalStore: Send + Sync {
    /// Loads a document by ID.
    async fn find_document(&self, id: DocumentId) -> Result<Option<Document>, StoreError>;

    /// Loads a step by ID, regardless of the document it belongs to.
    async fn find_step(&self, id: ApprovalStepId) -> Result<Option<ApprovalStep>, StoreError>;

    /// Loads every step of a document, ascending by `step_order`.
    async fn find_steps_by_document(
        &self,
        document_id: DocumentId,
    ) -> Result<Vec<ApprovalStep>, StoreError>;

    /// Persists the decided step and its document together.
    async fn save_outcome(&self, outcome: &ApprovalOutcome) -> Result<(), StoreError>;
}
