//! domain-core - 跨 context 的领域核心类型
//!
//! 实体 trait、体积值对象与小数精度处理

mod entity;
mod precision;
mod volume;

pub use entity::*;
pub use precision::*;
pub use volume::*;

// Re-export common types
pub use tankfarm_common::UserId;
