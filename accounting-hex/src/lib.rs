//! # Accounting Hex
//!
//! Application service layer and HTTP adapter for the accounting service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates the Receipt aggregate)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `R: ReceiptRepository`, allowing
//! different repository implementations to be injected. The rate
//! converter rides along as an independent component: it shares the
//! router but nothing else with the receipt side.

pub mod inbound;
pub mod service;


pub use service::ReceiptService;
