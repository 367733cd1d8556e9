//! tankfarm-adapter-storage - 集合存储适配器
//!
//! JSON 文件与进程内存两种 `CollectionStore` 实现，以及基于集合存储的审计日志

mod audit_log;
mod json_file;
mod memory;

pub use audit_log::CollectionAuditLog;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
