//! Sequential eligibility rules.
//!
//! A step may be decided only when every step before it approved and it is
//! the lowest-ordered step still pending.

use crate::approval::error::{ApprovalError, TransitionViolation};
use crate::approval::types::{ApprovalStep, StepStatus};

/// Checks whether `target` may be decided now, given all steps of its document.
///
/// `steps` must be ascending by `step_order`; earlier rejections are then
/// reported before earlier pending steps are.
///
/// # Errors
///
/// - `DocumentStateAlreadyRejected` if an earlier step rejected the document
/// - `StepOutOfOrder` if an earlier step is still pending, or another pending
///   step has a lower order than `target`
/// - `InvalidStepTransition` if no step is pending at all
pub fn ensure_step_order(steps: &[ApprovalStep], target: &ApprovalStep) -> Result<(), ApprovalError> {
    for earlier in steps.iter().filter(|s| s.step_order < target.step_order) {
        match earlier.status {
            StepStatus::Approved => {}
            StepStatus::Rejected => {
                return Err(ApprovalError::DocumentStateAlreadyRejected {
                    document_id: target.document_id,
                });
            }
            StepStatus::Pending => {
                return Err(ApprovalError::StepOutOfOrder { step_id: target.id });
            }
        }
    }

    let next_pending = next_pending_step(steps)
        .map(|s| s.step_order)
        .ok_or(ApprovalError::InvalidStepTransition {
            step_id: target.id,
            reason: TransitionViolation::NoPendingSteps,
        })?;

    if target.step_order != next_pending {
        return Err(ApprovalError::StepOutOfOrder { step_id: target.id });
    }

    Ok(())
}

/// Returns the step that must be decided next, if any.
#[must_use]
pub fn next_pending_step(steps: &[ApprovalStep]) -> Option<&ApprovalStep> {
    steps
        .iter()
        .filter(|s| s.status == StepStatus::Pending)
        .min_by_key(|s| s.step_order)
}
