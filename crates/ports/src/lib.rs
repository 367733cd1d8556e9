//! ports - 抽象 trait 层
//!
//! 定义所有基础设施的抽象接口

mod audit_log;
mod collection_store;

pub use audit_log::*;
pub use collection_store::*;
