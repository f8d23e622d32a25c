//! Approval error types.
//!
//! [`ApprovalError`] is the closed set of workflow rule violations. Every
//! variant maps to exactly one [`ErrorClass`], which the transport layer turns
//! into a protocol response. Storage failures are kept apart in [`StoreError`].

use docengine_shared::types::{ApprovalStepId, DocumentId, UserId};
use std::fmt;
use thiserror::Error;

use crate::approval::types::{DocumentStatus, StepStatus};

/// Transport-independent class of an approval failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The addressed document or step does not exist.
    NotFound,
    /// The caller may not act on the step.
    Forbidden,
    /// The request conflicts with the current workflow state.
    Conflict,
}

/// Why a step cannot move out of its current status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionViolation {
    /// The step was already approved or rejected.
    AlreadyDecided(StepStatus),
    /// The document has no pending steps left.
    NoPendingSteps,
    /// The requested decision is neither approve nor reject.
    UnsupportedDecision(String),
}

impl fmt::Display for TransitionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDecided(status) => write!(f, "step is already {status}"),
            Self::NoPendingSteps => f.write_str("no pending steps remain"),
            Self::UnsupportedDecision(decision) => write!(f, "unsupported decision `{decision}`"),
        }
    }
}

/// Errors that can occur while deciding an approval step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApprovalError {
    /// The document does not exist.
    #[error("Document {0} was not found")]
    DocumentNotFound(DocumentId),

    /// The step does not exist or belongs to another document.
    #[error("Step {step_id} does not belong to document {document_id}")]
    StepNotFound {
        /// The requested step.
        step_id: ApprovalStepId,
        /// The document named in the request.
        document_id: DocumentId,
    },

    /// The step exists but is assigned to a different approver.
    #[error("Step {step_id} cannot be decided by approver {approver_id}")]
    ApproverMismatch {
        /// The requested step.
        step_id: ApprovalStepId,
        /// The approver who attempted the decision.
        approver_id: UserId,
    },

    /// The document already reached a terminal status.
    #[error("Document {document_id} is {status} and cannot be changed")]
    DocumentStateError {
        /// The document.
        document_id: DocumentId,
        /// Its terminal status.
        status: DocumentStatus,
    },

    /// The step cannot take the requested transition.
    #[error("Step {step_id} cannot be decided: {reason}")]
    InvalidStepTransition {
        /// The requested step.
        step_id: ApprovalStepId,
        /// What blocks the transition.
        reason: TransitionViolation,
    },

    /// An earlier step is still pending.
    #[error("Step {step_id} is not the next pending approval")]
    StepOutOfOrder {
        /// The requested step.
        step_id: ApprovalStepId,
    },

    /// An earlier step already rejected the document.
    #[error("Document {document_id} was already rejected at an earlier step")]
    DocumentStateAlreadyRejected {
        /// The document.
        document_id: DocumentId,
    },
}

impl ApprovalError {
    /// Returns the transport-independent class of this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::DocumentNotFound(_) | Self::StepNotFound { .. } => ErrorClass::NotFound,

            Self::ApproverMismatch { .. } => ErrorClass::Forbidden,

            Self::DocumentStateError { .. }
            | Self::InvalidStepTransition { .. }
            | Self::StepOutOfOrder { .. }
            | Self::DocumentStateAlreadyRejected { .. } => ErrorClass::Conflict,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DocumentNotFound(_) => "DOCUMENT_NOT_FOUND",
            Self::StepNotFound { .. } => "STEP_NOT_FOUND",
            Self::ApproverMismatch { .. } => "APPROVER_MISMATCH",
            Self::DocumentStateError { .. } => "DOCUMENT_STATE_ERROR",
            Self::InvalidStepTransition { .. } => "INVALID_STEP_TRANSITION",
            Self::StepOutOfOrder { .. } => "STEP_OUT_OF_ORDER",
            Self::DocumentStateAlreadyRejected { .. } => "DOCUMENT_ALREADY_REJECTED",
        }
    }
}

/// Failure reported by an [`ApprovalStore`](super::ApprovalStore) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Storage error: {0}")]
pub struct StoreError(pub String);

impl StoreError {
    /// Wraps any displayable storage failure.
    pub fn new(err: impl fmt::Display) -> Self {
        Self(err.to_string())
    }
}

/// Outcome of a failed decide-step call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// A workflow rule was violated; nothing was changed.
    #[error(transparent)]
    Approval(#[from] ApprovalError),

    /// The store failed; the surrounding transaction must not commit.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DecisionError {
    /// Returns the workflow violation, if this is one.
    #[must_use]
    pub const fn as_approval(&self) -> Option<&ApprovalError> {
        match self {
            Self::Approval(err) => Some(err),
            Self::Store(_) => None,
        }
    }
}
