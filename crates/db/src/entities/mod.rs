//! `SeaORM` entity definitions.

pub mod approval_steps;
pub mod audit_logs;
pub mod documents;
pub mod sea_orm_active_enums;
pub mod users;
