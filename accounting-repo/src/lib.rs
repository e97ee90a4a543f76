//! # Accounting Repository
//!
//! Concrete repository implementation (adapter) for the accounting service.
//! This crate provides the SQLite adapter that implements the
//! `ReceiptRepository` port, plus the one-time seed data for a fresh store.

pub mod seed;
pub mod sqlite;

mod types;


pub use seed::{fixture_receipts, seed_if_empty};
pub use sqlite::SqliteRepo;

/// Build and initialize a repository from a database URL.
///
/// This function:
/// 1. Connects to the database (creating the file if missing)
/// 2. Runs migrations to create tables
/// 3. Returns a ready-to-use repository
///
/// # Examples
///
/// ```ignore
/// let repo = build_repo("sqlite://accounting.db?mode=rwc").await?;
/// ```
pub async fn build_repo(database_url: &str) -> anyhow::Result<SqliteRepo> {
    SqliteRepo::new(database_url).await
}
