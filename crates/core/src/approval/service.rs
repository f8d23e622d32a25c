//! Approval service for step decisions.
//!
//! This module implements the decision applier and the two entry points the
//! transport layer calls. Every check runs before any value is changed, so a
//! failed call never produces a partial outcome.

use docengine_shared::types::{ApprovalStepId, DocumentId, UserId};

use crate::approval::error::{ApprovalError, DecisionError, TransitionViolation};
use crate::approval::lookup::{load_document, load_ordered_steps, load_step};
use crate::approval::ordering::ensure_step_order;
use crate::approval::store::ApprovalStore;
use crate::approval::types::{
    ApprovalOutcome, ApprovalStep, Decision, Document, DocumentStatus, StepStatus,
};

/// Stateless service for deciding approval steps.
///
/// `apply_decision` is the pure state machine; `decide` composes it with the
/// store lookups and the final write.
pub struct ApprovalService;

impl ApprovalService {
    /// Fails with `DocumentStateError` unless the document is still pending.
    pub fn ensure_document_pending(document: &Document) -> Result<(), ApprovalError> {
        if document.status.is_terminal() {
            return Err(ApprovalError::DocumentStateError {
                document_id: document.id,
                status: document.status,
            });
        }
        Ok(())
    }

    /// Fails with `InvalidStepTransition` unless the step is still pending.
    pub fn ensure_step_pending(step: &ApprovalStep) -> Result<(), ApprovalError> {
        if step.status != StepStatus::Pending {
            return Err(ApprovalError::InvalidStepTransition {
                step_id: step.id,
                reason: TransitionViolation::AlreadyDecided(step.status),
            });
        }
        Ok(())
    }

    /// Applies a decision to a validated step.
    ///
    /// # Arguments
    /// * `document` - The document owning `step`
    /// * `step` - The step being decided
    /// * `steps` - Every step of the document, ascending by `step_order`
    /// * `decision` - Approve or reject
    ///
    /// # Returns
    /// * The document and step as they stand after the decision
    /// * `Err(DocumentStateError)` if the document is no longer pending
    /// * `Err(InvalidStepTransition)` if the step was already decided
    /// * Any ordering error from [`ensure_step_order`]
    pub fn apply_decision(
        document: Document,
        step: ApprovalStep,
        steps: &[ApprovalStep],
        decision: Decision,
    ) -> Result<ApprovalOutcome, ApprovalError> {
        Self::ensure_document_pending(&document)?;
        Self::ensure_step_pending(&step)?;
        ensure_step_order(steps, &step)?;

        let mut document = document;
        let mut step = step;
        step.status = decision.resulting_step_status();

        match decision {
            Decision::Approve => {
                let others_approved = steps
                    .iter()
                    .filter(|other| other.id != step.id)
                    .all(|other| other.status == StepStatus::Approved);
                if others_approved {
                    document.status = DocumentStatus::Approved;
                }
            }
            Decision::Reject => document.status = DocumentStatus::Rejected,
        }

        Ok(ApprovalOutcome { document, step })
    }

    /// Decides a step and persists the outcome through `store`.
    ///
    /// Checks run in a fixed order: document existence, document status,
    /// step existence and ownership, approver, step status, ordering.
    /// Nothing is written unless all of them pass.
    pub async fn decide<S>(
        store: &S,
        document_id: DocumentId,
        step_id: ApprovalStepId,
        approver_id: UserId,
        decision: Decision,
    ) -> Result<ApprovalOutcome, DecisionError>
    where
        S: ApprovalStore + ?Sized,
    {
        let document = load_document(store, document_id).await?;
        Self::ensure_document_pending(&document)?;

        let step = load_step(store, step_id, document_id, approver_id).await?;
        let steps = load_ordered_steps(store, document_id).await?;

        let outcome = Self::apply_decision(document, step, &steps, decision)?;
        store.save_outcome(&outcome).await?;
        Ok(outcome)
    }

    /// Approves a step.
    pub async fn approve<S>(
        store: &S,
        document_id: DocumentId,
        step_id: ApprovalStepId,
        approver_id: UserId,
    ) -> Result<ApprovalOutcome, DecisionError>
    where
        S: ApprovalStore + ?Sized,
    {
        Self::decide(store, document_id, step_id, approver_id, Decision::Approve).await
    }

    /// Rejects a step, and with it the document.
    pub async fn reject<S>(
        store: &S,
        document_id: DocumentId,
        step_id: ApprovalStepId,
        approver_id: UserId,
    ) -> Result<ApprovalOutcome, DecisionError>
    where
        S: ApprovalStore + ?Sized,
    {
        Self::decide(store, document_id, step_id, approver_id, Decision::Reject).await
    }
}
