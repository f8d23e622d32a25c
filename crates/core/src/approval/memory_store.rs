//! In-memory `ApprovalStore` for workflow tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use docengine_shared::types::{ApprovalStepId, DocumentId, UserId};

use crate::approval::error::StoreError;
use crate::approval::store::ApprovalStore;
use crate::approval::types::{ApprovalOutcome, ApprovalStep, Document, DocumentStatus, StepStatus};

#[derive(Default)]
struct Tables {
    documents: HashMap<DocumentId, Document>,
    steps: HashMap<ApprovalStepId, ApprovalStep>,
}

/// Store backed by two hash maps behind one mutex.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    writes: Mutex<usize>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `save_outcome` always fails.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Inserts a pending document with one pending step per approver, ordered 1..=N.
    pub fn seed(&self, approvers: &[UserId]) -> (Document, Vec<ApprovalStep>) {
        let document = Document {
            id: DocumentId::new(),
            title: "Quarterly report".to_string(),
            status: DocumentStatus::Pending,
            created_at: Utc::now(),
        };
        let steps: Vec<ApprovalStep> = approvers
            .iter()
            .zip(1..)
            .map(|(approver_id, step_order)| ApprovalStep {
                id: ApprovalStepId::new(),
                document_id: document.id,
                approver_id: *approver_id,
                step_order,
                status: StepStatus::Pending,
            })
            .collect();

        let mut tables = self.tables.lock().unwrap();
        tables.documents.insert(document.id, document.clone());
        for step in &steps {
            tables.steps.insert(step.id, step.clone());
        }
        (document, steps)
    }

    pub fn document(&self, id: DocumentId) -> Document {
        self.tables.lock().unwrap().documents[&id].clone()
    }

    pub fn step(&self, id: ApprovalStepId) -> ApprovalStep {
        self.tables.lock().unwrap().steps[&id].clone()
    }

    pub fn set_step_status(&self, id: ApprovalStepId, status: StepStatus) {
        if let Some(step) = self.tables.lock().unwrap().steps.get_mut(&id) {
            step.status = status;
        }
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

#[async_trait]
impl ApprovalStore for MemoryStore {
    async fn find_document(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self.tables.lock().unwrap().documents.get(&id).cloned())
    }

    async fn find_step(&self, id: ApprovalStepId) -> Result<Option<ApprovalStep>, StoreError> {
        Ok(self.tables.lock().unwrap().steps.get(&id).cloned())
    }

    async fn find_steps_by_document(
        &self,
        document_id: DocumentId,
    ) -> Result<Vec<ApprovalStep>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut steps: Vec<ApprovalStep> = tables
            .steps
            .values()
            .filter(|s| s.document_id == document_id)
            .cloned()
            .collect();
        steps.sort_by_key(|s| s.step_order);
        Ok(steps)
    }

    async fn save_outcome(&self, outcome: &ApprovalOutcome) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::new("write rejected"));
        }
        let mut tables = self.tables.lock().unwrap();
        tables
            .documents
            .insert(outcome.document.id, outcome.document.clone());
        tables.steps.insert(outcome.step.id, outcome.step.clone());
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }
}
