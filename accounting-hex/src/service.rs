//! Receipt Application Service
//!
//! Orchestrates aggregate operations through the repository port.
//! Contains NO infrastructure logic - pure business orchestration.

use accounting_types::{AppError, Receipt, ReceiptRepository};

/// Application service for the Receipt aggregate.
///
/// Generic over `R: ReceiptRepository` - the adapter is injected at compile
/// time, so it can run against SQLite in production and an in-memory repo
/// in tests.
pub struct ReceiptService<R: ReceiptRepository> {
    repo: R,
}

impl<R: ReceiptRepository> ReceiptService<R> {
    /// Creates a new receipt service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Stores a whole receipt aggregate.
    ///
    /// There is nothing to validate: every field of a receipt is optional
    /// by contract. Any identifiers on the input are discarded and fresh
    /// ones assigned by the store.
    pub async fn create_receipt(&self, receipt: Receipt) -> Result<Receipt, AppError> {
        self.repo.create(receipt).await.map_err(Into::into)
    }

    /// Lists every stored receipt with all owned entities populated.
    pub async fn list_receipts(&self) -> Result<Vec<Receipt>, AppError> {
        self.repo.list_all().await.map_err(Into::into)
    }
}
