//! 查询定义与只读视图

mod movement_queries;
mod projection_queries;

pub use movement_queries::*;
pub use projection_queries::*;
