//! Application layer

pub mod audit;
pub mod commands;
pub mod handler;
pub mod queries;

pub use audit::{AuditRecord, AuditRecorder};
pub use handler::InventoryService;
