//! Status enums stored as string columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use docengine_core::approval;

/// Stored status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum DocumentStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

/// Stored status of an approval step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum StepStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl From<DocumentStatus> for approval::DocumentStatus {
    fn from(status: DocumentStatus) -> Self {
        match status {
            DocumentStatus::Pending => Self::Pending,
            DocumentStatus::Approved => Self::Approved,
            DocumentStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<approval::DocumentStatus> for DocumentStatus {
    fn from(status: approval::DocumentStatus) -> Self {
        match status {
            approval::DocumentStatus::Pending => Self::Pending,
            approval::DocumentStatus::Approved => Self::Approved,
            approval::DocumentStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<StepStatus> for approval::StepStatus {
    fn from(status: StepStatus) -> Self {
        match status {
            StepStatus::Pending => Self::Pending,
            StepStatus::Approved => Self::Approved,
            StepStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<approval::StepStatus> for StepStatus {
    fn from(status: approval::StepStatus) -> Self {
        match status {
            approval::StepStatus::Pending => Self::Pending,
            approval::StepStatus::Approved => Self::Approved,
            approval::StepStatus::Rejected => Self::Rejected,
        }
    }
}
