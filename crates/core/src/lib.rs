//! Core business logic for DocEngine.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached only through the [`approval::ApprovalStore`] trait.
//!
//! # Modules
//!
//! - `approval` - Sequential document approval state machine
//! - `auth` - Password hashing and login rules

pub mod approval;
pub mod auth;
