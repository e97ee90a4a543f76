//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (SQLite, InMemory) will implement this trait.

use crate::domain::Receipt;
use crate::error::RepoError;

/// The main repository port for the Receipt aggregate.
///
/// Writes MUST be atomic: the root and all owned entities (store, info,
/// items, totals) are committed together or not at all.
#[async_trait::async_trait]
pub trait ReceiptRepository: Send + Sync + 'static {
    /// Persists a whole aggregate, assigning fresh identifiers to the root
    /// and every item. Caller-supplied identifiers are ignored.
    async fn create(&self, receipt: Receipt) -> Result<Receipt, RepoError>;

    /// Returns every stored receipt with all owned entities eagerly
    /// populated and items in their original order. No pagination.
    async fn list_all(&self) -> Result<Vec<Receipt>, RepoError>;

    /// Number of stored receipts. Drives one-time seeding.
    async fn count(&self) -> Result<i64, RepoError>;
}
