//! # Accounting Types
//!
//! Domain types and port traits for the accounting service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (the Receipt aggregate)
//! - `ports/` - Trait definitions that adapters must implement
//! - `error/` - Domain and application error types

pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Item, ItemId, Receipt, ReceiptId, ReceiptInfo, Store, Totals};
pub use error::{AppError, RepoError};
pub use ports::ReceiptRepository;
