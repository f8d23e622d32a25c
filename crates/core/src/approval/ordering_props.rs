//! Property-based tests for step ordering and decision application.

use chrono::Utc;
use docengine_shared::types::{ApprovalStepId, DocumentId, UserId};
use proptest::prelude::*;

use crate::approval::error::{ApprovalError, TransitionViolation};
use crate::approval::ordering::ensure_step_order;
use crate::approval::service::ApprovalService;
use crate::approval::types::{
    ApprovalStep, Decision, Document, DocumentStatus, StepStatus,
};

/// A document whose first `approved` of `count` steps are approved.
fn progressed(count: usize, approved: usize) -> (Document, Vec<ApprovalStep>) {
    let document = Document {
        id: DocumentId::new(),
        title: "Policy".to_string(),
        status: DocumentStatus::Pending,
        created_at: Utc::now(),
    };
    let approver_id = UserId::new();
    let steps = (0..count)
        .map(|i| ApprovalStep {
            id: ApprovalStepId::new(),
            document_id: document.id,
            approver_id,
            step_order: i32::try_from(i + 1).unwrap(),
            status: if i < approved {
                StepStatus::Approved
            } else {
                StepStatus::Pending
            },
        })
        .collect();
    (document, steps)
}

fn arb_progress() -> impl Strategy<Value = (usize, usize)> {
    (1usize..8).prop_flat_map(|count| (Just(count), 0..count))
}

fn arb_decision() -> impl Strategy<Value = Decision> {
    prop_oneof![Just(Decision::Approve), Just(Decision::Reject)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Only the lowest pending step is eligible; every later one is out of order.
    #[test]
    fn prop_only_next_pending_step_is_eligible(
        (count, approved) in arb_progress(),
    ) {
        let (_, steps) = progressed(count, approved);

        for (index, step) in steps.iter().enumerate().skip(approved) {
            let result = ensure_step_order(&steps, step);
            if index == approved {
                prop_assert_eq!(result, Ok(()));
            } else {
                prop_assert_eq!(result, Err(ApprovalError::StepOutOfOrder { step_id: step.id }));
            }
        }
    }

    /// A decided step can never be decided again.
    #[test]
    fn prop_decided_step_is_never_redecided(
        (count, approved) in (2usize..8).prop_flat_map(|count| (Just(count), 1..count)),
        pick in any::<prop::sample::Index>(),
        decision in arb_decision(),
    ) {
        let (document, steps) = progressed(count, approved);
        let target = steps[pick.index(approved)].clone();

        let result = ApprovalService::apply_decision(document, target.clone(), &steps, decision);

        prop_assert_eq!(
            result,
            Err(ApprovalError::InvalidStepTransition {
                step_id: target.id,
                reason: TransitionViolation::AlreadyDecided(StepStatus::Approved),
            })
        );
    }

    /// Approving the next step approves the document exactly when it is the last one.
    #[test]
    fn prop_document_approved_only_by_last_step(
        (count, approved) in arb_progress(),
    ) {
        let (document, steps) = progressed(count, approved);
        let target = steps[approved].clone();

        let outcome = ApprovalService::apply_decision(document, target, &steps, Decision::Approve)
            .unwrap();

        prop_assert_eq!(outcome.step.status, StepStatus::Approved);
        let expected = if approved + 1 == count {
            DocumentStatus::Approved
        } else {
            DocumentStatus::Pending
        };
        prop_assert_eq!(outcome.document.status, expected);
    }

    /// Rejecting the next step always rejects the document.
    #[test]
    fn prop_reject_always_terminates(
        (count, approved) in arb_progress(),
    ) {
        let (document, steps) = progressed(count, approved);
        let target = steps[approved].clone();

        let outcome = ApprovalService::apply_decision(document, target, &steps, Decision::Reject)
            .unwrap();

        prop_assert_eq!(outcome.step.status, StepStatus::Rejected);
        prop_assert_eq!(outcome.document.status, DocumentStatus::Rejected);
    }

    /// Terminal documents refuse every decision on every step.
    #[test]
    fn prop_terminal_document_refuses_decisions(
        (count, approved) in arb_progress(),
        terminal in prop_oneof![Just(DocumentStatus::Approved), Just(DocumentStatus::Rejected)],
        decision in arb_decision(),
    ) {
        let (mut document, steps) = progressed(count, approved);
        document.status = terminal;

        for step in &steps {
            let result = ApprovalService::apply_decision(
                document.clone(),
                step.clone(),
                &steps,
                decision,
            );
            prop_assert_eq!(
                result,
                Err(ApprovalError::DocumentStateError { document_id: document.id, status: terminal })
            );
        }
    }
}
