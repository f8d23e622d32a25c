//! Approval workflow domain types.
//!
//! Documents and steps are plain value records. Their statuses only move
//! forward from `Pending`, and only [`ApprovalService`](super::ApprovalService)
//! produces the moved values.

use chrono::{DateTime, Utc};
use docengine_shared::types::{ApprovalStepId, DocumentId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::approval::error::TransitionViolation;

/// Document-level approval status.
///
/// Valid transitions:
/// - Pending → Approved (last step approved)
/// - Pending → Rejected (any step rejected)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    /// Waiting on one or more steps.
    Pending,
    /// Every step approved.
    Approved,
    /// A step rejected the document.
    Rejected,
}

impl DocumentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Returns true once no further decisions are allowed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single approval step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Not decided yet.
    Pending,
    /// Approved by its approver.
    Approved,
    /// Rejected by its approver.
    Rejected,
}

impl StepStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verb applied to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Approve the step.
    Approve,
    /// Reject the step, and with it the whole document.
    Reject,
}

impl Decision {
    /// Returns the string representation of the decision.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    /// Step status a pending step moves to under this decision.
    #[must_use]
    pub const fn resulting_step_status(&self) -> StepStatus {
        match self {
            Self::Approve => StepStatus::Approved,
            Self::Reject => StepStatus::Rejected,
        }
    }
}

impl FromStr for Decision {
    type Err = TransitionViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            _ => Err(TransitionViolation::UnsupportedDecision(s.to_string())),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document moving through approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document ID.
    pub id: DocumentId,
    /// Non-empty title.
    pub title: String,
    /// Current approval status.
    pub status: DocumentStatus,
    /// Creation time, never changed.
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Longest allowed title, in characters.
    pub const MAX_TITLE_LEN: usize = 255;

    /// Trims a proposed title, returning it if 1 to 255 characters remain.
    #[must_use]
    pub fn normalize_title(title: &str) -> Option<String> {
        let trimmed = title.trim();
        let len = trimmed.chars().count();
        (1..=Self::MAX_TITLE_LEN)
            .contains(&len)
            .then(|| trimmed.to_string())
    }
}

/// One approval step of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalStep {
    /// Step ID.
    pub id: ApprovalStepId,
    /// Owning document.
    pub document_id: DocumentId,
    /// The only principal allowed to decide this step.
    pub approver_id: UserId,
    /// Position in the document's sequence; unique per document.
    pub step_order: i32,
    /// Current step status.
    pub status: StepStatus,
}

/// Document and step as they stand after a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalOutcome {
    /// The document, possibly moved to a terminal status.
    pub document: Document,
    /// The decided step.
    pub step: ApprovalStep,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_status_strings() {
        assert_eq!(DocumentStatus::Pending.as_str(), "PENDING");
        assert_eq!(DocumentStatus::Rejected.to_string(), "REJECTED");
    }

    #[test]
    fn test_document_status_terminal() {
        assert!(!DocumentStatus::Pending.is_terminal());
        assert!(DocumentStatus::Approved.is_terminal());
        assert!(DocumentStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_step_status_strings() {
        assert_eq!(StepStatus::Approved.to_string(), "approved");
        assert_eq!(StepStatus::Pending.as_str(), "pending");
    }

    #[test]
    fn test_status_serialization_matches_wire_format() {
        assert_eq!(
            serde_json::to_string(&DocumentStatus::Approved).unwrap(),
            "\"APPROVED\""
        );
        assert_eq!(
            serde_json::to_string(&StepStatus::Rejected).unwrap(),
            "\"rejected\""
        );
    }

    #[test]
    fn test_decision_parse() {
        assert_eq!("approve".parse::<Decision>(), Ok(Decision::Approve));
        assert_eq!(" Reject ".parse::<Decision>(), Ok(Decision::Reject));
        assert_eq!(
            "escalate".parse::<Decision>(),
            Err(TransitionViolation::UnsupportedDecision("escalate".to_string()))
        );
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(
            Document::normalize_title("  Budget 2026 "),
            Some("Budget 2026".to_string())
        );
        assert_eq!(Document::normalize_title("   "), None);
        assert_eq!(Document::normalize_title(&"x".repeat(255)).map(|t| t.len()), Some(255));
        assert_eq!(Document::normalize_title(&"x".repeat(256)), None);
    }

    #[test]
    fn test_decision_resulting_status() {
        assert_eq!(
            Decision::Approve.resulting_step_status(),
            StepStatus::Approved
        );
        assert_eq!(
            Decision::Reject.resulting_step_status(),
            StepStatus::Rejected
        );
    }
}
