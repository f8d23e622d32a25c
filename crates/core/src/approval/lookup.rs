//! Document and step resolution.
//!
//! Existence and ownership are always checked before the approver, so a
//! caller probing an unknown step cannot learn who its approver would be.

use docengine_shared::types::{ApprovalStepId, DocumentId, UserId};

use crate::approval::error::{ApprovalError, DecisionError};
use crate::approval::store::ApprovalStore;
use crate::approval::types::{ApprovalStep, Document};

/// Turns a document lookup result into the document or `DocumentNotFound`.
pub fn resolve_document(
    found: Option<Document>,
    document_id: DocumentId,
) -> Result<Document, ApprovalError> {
    found.ok_or(ApprovalError::DocumentNotFound(document_id))
}

/// Turns a step lookup result into a step the approver may act on.
///
/// # Errors
///
/// - `StepNotFound` if the step is absent or owned by another document
/// - `ApproverMismatch` if the step is assigned to someone else
pub fn resolve_step(
    found: Option<ApprovalStep>,
    step_id: ApprovalStepId,
    document_id: DocumentId,
    approver_id: UserId,
) -> Result<ApprovalStep, ApprovalError> {
    let step = found
        .filter(|step| step.document_id == document_id)
        .ok_or(ApprovalError::StepNotFound {
            step_id,
            document_id,
        })?;

    if step.approver_id != approver_id {
        return Err(ApprovalError::ApproverMismatch {
            step_id,
            approver_id,
        });
    }

    Ok(step)
}

/// Loads a document.
pub async fn load_document<S>(store: &S, document_id: DocumentId) -> Result<Document, DecisionError>
where
    S: ApprovalStore + ?Sized,
{
    let found = store.find_document(document_id).await?;
    resolve_document(found, document_id).map_err(DecisionError::from)
}

/// Loads a step of `document_id` that `approver_id` is entitled to decide.
pub async fn load_step<S>(
    store: &S,
    step_id: ApprovalStepId,
    document_id: DocumentId,
    approver_id: UserId,
) -> Result<ApprovalStep, DecisionError>
where
    S: ApprovalStore + ?Sized,
{
    let found = store.find_step(step_id).await?;
    resolve_step(found, step_id, document_id, approver_id).map_err(DecisionError::from)
}

/// Loads all steps of a document, ascending by `step_order`.
pub async fn load_ordered_steps<S>(
    store: &S,
    document_id: DocumentId,
) -> Result<Vec<ApprovalStep>, DecisionError>
where
    S: ApprovalStore + ?Sized,
{
    let mut steps = store.find_steps_by_document(document_id).await?;
    steps.sort_by_key(|step| step.step_order);
    Ok(steps)
}
