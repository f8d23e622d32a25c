//! End-to-end decision scenarios against the in-memory store.

use docengine_shared::types::{ApprovalStepId, DocumentId, UserId};

use crate::approval::error::{ApprovalError, DecisionError, StoreError};
use crate::approval::memory_store::MemoryStore;
use crate::approval::service::ApprovalService;
use crate::approval::types::{DocumentStatus, StepStatus};

fn approval_err(result: Result<impl std::fmt::Debug, DecisionError>) -> ApprovalError {
    match result {
        Err(DecisionError::Approval(err)) => err,
        other => panic!("expected approval error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_second_step_before_first_is_out_of_order() {
    let store = MemoryStore::new();
    let approver = UserId::new();
    let (doc, steps) = store.seed(&[approver, approver]);

    let err = approval_err(ApprovalService::approve(&store, doc.id, steps[1].id, approver).await);

    assert_eq!(err, ApprovalError::StepOutOfOrder { step_id: steps[1].id });
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_sequential_approvals_approve_document() {
    let store = MemoryStore::new();
    let approver = UserId::new();
    let (doc, steps) = store.seed(&[approver, approver]);

    let first = ApprovalService::approve(&store, doc.id, steps[0].id, approver)
        .await
        .unwrap();
    assert_eq!(first.step.status, StepStatus::Approved);
    assert_eq!(first.document.status, DocumentStatus::Pending);

    let second = ApprovalService::approve(&store, doc.id, steps[1].id, approver)
        .await
        .unwrap();
    assert_eq!(second.step.status, StepStatus::Approved);
    assert_eq!(second.document.status, DocumentStatus::Approved);

    assert_eq!(store.document(doc.id).status, DocumentStatus::Approved);
    assert_eq!(store.write_count(), 2);
}

#[tokio::test]
async fn test_rejection_terminates_and_blocks_later_steps() {
    let store = MemoryStore::new();
    let (first, second) = (UserId::new(), UserId::new());
    let (doc, steps) = store.seed(&[first, second]);

    let rejected = ApprovalService::reject(&store, doc.id, steps[0].id, first)
        .await
        .unwrap();
    assert_eq!(rejected.step.status, StepStatus::Rejected);
    assert_eq!(rejected.document.status, DocumentStatus::Rejected);

    let err = approval_err(ApprovalService::approve(&store, doc.id, steps[1].id, second).await);
    assert_eq!(
        err,
        ApprovalError::DocumentStateError {
            document_id: doc.id,
            status: DocumentStatus::Rejected,
        }
    );
    assert_eq!(store.step(steps[1].id).status, StepStatus::Pending);
}

#[tokio::test]
async fn test_step_under_other_document_is_not_found() {
    let store = MemoryStore::new();
    let approver = UserId::new();
    let (doc_x, steps_x) = store.seed(&[approver]);
    let (doc_y, _) = store.seed(&[approver]);

    let err = approval_err(ApprovalService::approve(&store, doc_y.id, steps_x[0].id, approver).await);

    assert_eq!(
        err,
        ApprovalError::StepNotFound {
            step_id: steps_x[0].id,
            document_id: doc_y.id,
        }
    );
    assert_eq!(store.document(doc_x.id).status, DocumentStatus::Pending);
}

#[tokio::test]
async fn test_wrong_approver_on_next_step_is_mismatch() {
    let store = MemoryStore::new();
    let (owner, intruder) = (UserId::new(), UserId::new());
    let (doc, steps) = store.seed(&[owner]);

    let err = approval_err(ApprovalService::approve(&store, doc.id, steps[0].id, intruder).await);

    assert_eq!(
        err,
        ApprovalError::ApproverMismatch {
            step_id: steps[0].id,
            approver_id: intruder,
        }
    );
    assert_eq!(store.step(steps[0].id).status, StepStatus::Pending);
}

#[tokio::test]
async fn test_unknown_document() {
    let store = MemoryStore::new();
    let missing = DocumentId::new();

    let err = approval_err(
        ApprovalService::reject(&store, missing, ApprovalStepId::new(), UserId::new()).await,
    );

    assert_eq!(err, ApprovalError::DocumentNotFound(missing));
}

#[tokio::test]
async fn test_approved_document_refuses_further_decisions() {
    let store = MemoryStore::new();
    let approver = UserId::new();
    let (doc, steps) = store.seed(&[approver]);

    ApprovalService::approve(&store, doc.id, steps[0].id, approver)
        .await
        .unwrap();
    let err = approval_err(ApprovalService::reject(&store, doc.id, steps[0].id, approver).await);

    assert!(matches!(err, ApprovalError::DocumentStateError { .. }));
    assert_eq!(store.write_count(), 1);
}

#[tokio::test]
async fn test_document_state_checked_before_step_lookup() {
    let store = MemoryStore::new();
    let approver = UserId::new();
    let (doc, steps) = store.seed(&[approver]);
    ApprovalService::reject(&store, doc.id, steps[0].id, approver)
        .await
        .unwrap();

    // An unknown step on a rejected document still reports the document state.
    let err = approval_err(
        ApprovalService::approve(&store, doc.id, ApprovalStepId::new(), approver).await,
    );

    assert!(matches!(err, ApprovalError::DocumentStateError { .. }));
}

#[tokio::test]
async fn test_redeciding_step_on_pending_document_is_invalid_transition() {
    let store = MemoryStore::new();
    let approver = UserId::new();
    let (doc, steps) = store.seed(&[approver, approver]);
    ApprovalService::approve(&store, doc.id, steps[0].id, approver)
        .await
        .unwrap();

    let err = approval_err(ApprovalService::approve(&store, doc.id, steps[0].id, approver).await);

    assert!(matches!(err, ApprovalError::InvalidStepTransition { .. }));
    assert_eq!(store.write_count(), 1);
}

#[tokio::test]
async fn test_earlier_rejected_step_reports_already_rejected() {
    // A rejected step left behind a pending document, as a stale row could.
    let store = MemoryStore::new();
    let approver = UserId::new();
    let (doc, steps) = store.seed(&[approver, approver]);
    store.set_step_status(steps[0].id, StepStatus::Rejected);

    let err = approval_err(ApprovalService::approve(&store, doc.id, steps[1].id, approver).await);

    assert_eq!(
        err,
        ApprovalError::DocumentStateAlreadyRejected {
            document_id: doc.id
        }
    );
}

#[tokio::test]
async fn test_store_failure_is_propagated() {
    let store = MemoryStore::failing_writes();
    let approver = UserId::new();
    let (doc, steps) = store.seed(&[approver]);

    let result = ApprovalService::approve(&store, doc.id, steps[0].id, approver).await;

    assert_eq!(
        result,
        Err(DecisionError::Store(StoreError::new("write rejected")))
    );
    assert_eq!(store.document(doc.id).status, DocumentStatus::Pending);
}
