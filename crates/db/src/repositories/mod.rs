//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod approval;
pub mod document;
pub mod user;

pub use approval::{ApprovalRepository, SeaOrmApprovalStore};
pub use document::{DocumentError, DocumentRepository};
pub use user::{UserError, UserRepository};
