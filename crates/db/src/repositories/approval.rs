//! Approval repository: the transaction boundary around step decisions.
//!
//! Every decision runs in its own database transaction. The document row is
//! locked first (`SELECT ... FOR UPDATE`), so two decisions on steps of the
//! same document are serialized and the second one sees the first one's
//! committed statuses.

use async_trait::async_trait;
use docengine_core::approval::{
    ApprovalOutcome, ApprovalService, ApprovalStep, ApprovalStore, Decision, DecisionError,
    Document, StoreError,
};
use docengine_shared::types::{ApprovalStepId, DocumentId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info};

use crate::entities::{approval_steps, documents};

/// [`ApprovalStore`] over any SeaORM connection, usually a transaction.
pub struct SeaOrmApprovalStore<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> SeaOrmApprovalStore<'a, C> {
    /// Wraps a connection or transaction.
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C: ConnectionTrait> ApprovalStore for SeaOrmApprovalStore<'_, C> {
    async fn find_document(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        documents::Entity::find_by_id(id.into_inner())
            .one(self.conn)
            .await
            .map(|found| found.map(Into::into))
            .map_err(StoreError::new)
    }

    async fn find_step(&self, id: ApprovalStepId) -> Result<Option<ApprovalStep>, StoreError> {
        approval_steps::Entity::find_by_id(id.into_inner())
            .one(self.conn)
            .await
            .map(|found| found.map(Into::into))
            .map_err(StoreError::new)
    }

    async fn find_steps_by_document(
        &self,
        document_id: DocumentId,
    ) -> Result<Vec<ApprovalStep>, StoreError> {
        approval_steps::Entity::find()
            .filter(approval_steps::Column::DocumentId.eq(document_id.into_inner()))
            .order_by_asc(approval_steps::Column::StepOrder)
            .all(self.conn)
            .await
            .map(|steps| steps.into_iter().map(Into::into).collect())
            .map_err(StoreError::new)
    }

    async fn save_outcome(&self, outcome: &ApprovalOutcome) -> Result<(), StoreError> {
        approval_steps::ActiveModel {
            id: Set(outcome.step.id.into_inner()),
            status: Set(outcome.step.status.into()),
            ..Default::default()
        }
        .update(self.conn)
        .await
        .map_err(StoreError::new)?;

        documents::ActiveModel {
            id: Set(outcome.document.id.into_inner()),
            status: Set(outcome.document.status.into()),
            ..Default::default()
        }
        .update(self.conn)
        .await
        .map_err(StoreError::new)?;

        Ok(())
    }
}

/// Repository that applies approve/reject decisions atomically.
#[derive(Debug, Clone)]
pub struct ApprovalRepository {
    db: DatabaseConnection,
}

impl ApprovalRepository {
    /// Creates a new approval repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Decides a step inside one transaction.
    ///
    /// On any error the transaction is dropped without commit, which rolls it
    /// back; no partial update is ever visible.
    pub async fn decide(
        &self,
        document_id: DocumentId,
        step_id: ApprovalStepId,
        approver_id: UserId,
        decision: Decision,
    ) -> Result<ApprovalOutcome, DecisionError> {
        let txn = self.db.begin().await.map_err(StoreError::new)?;

        // Held until commit or rollback. A missing row is reported by the
        // service below.
        documents::Entity::find_by_id(document_id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(StoreError::new)?;
        debug!(%document_id, "Document locked for decision");

        let store = SeaOrmApprovalStore::new(&txn);
        let outcome =
            ApprovalService::decide(&store, document_id, step_id, approver_id, decision).await?;

        txn.commit().await.map_err(StoreError::new)?;

        info!(
            %document_id,
            %step_id,
            %approver_id,
            %decision,
            step_status = %outcome.step.status,
            document_status = %outcome.document.status,
            "Approval step decided"
        );
        Ok(outcome)
    }

    /// Approves a step.
    pub async fn approve(
        &self,
        document_id: DocumentId,
        step_id: ApprovalStepId,
        approver_id: UserId,
    ) -> Result<ApprovalOutcome, DecisionError> {
        self.decide(document_id, step_id, approver_id, Decision::Approve)
            .await
    }

    /// Rejects a step and its document.
    pub async fn reject(
        &self,
        document_id: DocumentId,
        step_id: ApprovalStepId,
        approver_id: UserId,
    ) -> Result<ApprovalOutcome, DecisionError> {
        self.decide(document_id, step_id, approver_id, Decision::Reject)
            .await
    }
}
