//! Domain models for the accounting service.

pub mod receipt;

pub use receipt::{Item, ItemId, Receipt, ReceiptId, ReceiptInfo, Store, Totals};
