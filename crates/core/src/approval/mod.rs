//! Document approval workflow.
//!
//! A document owns an ordered list of approval steps. Steps are decided one
//! at a time in ascending `step_order`, each by its assigned approver. The
//! document is approved once every step approves and rejected as soon as any
//! step rejects.
//!
//! # Modules
//!
//! - `types` - Documents, steps, statuses and decisions
//! - `error` - The closed approval error taxonomy
//! - `store` - Repository trait the workflow reads and writes through
//! - `lookup` - Document and step resolution
//! - `ordering` - Sequential eligibility rules
//! - `service` - Decision application and the approve/reject entry points

pub mod error;
pub mod lookup;
pub mod ordering;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod memory_store;
#[cfg(test)]
mod ordering_props;
#[cfg(test)]
mod service_scenarios;

pub use error::{ApprovalError, DecisionError, ErrorClass, StoreError, TransitionViolation};
pub use service::ApprovalService;
pub use store::ApprovalStore;
pub use types::{ApprovalOutcome, ApprovalStep, Decision, Document, DocumentStatus, StepStatus};
