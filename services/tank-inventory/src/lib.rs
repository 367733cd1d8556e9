//! Tank inventory service library

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::InventoryService;
pub use error::InventoryError;
