//! Inbound HTTP adapter (Axum).

pub mod handlers;
pub mod server;

pub use server::HttpServer;
