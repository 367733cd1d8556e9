//! 值对象模块

mod ids;
mod property_value;

pub use ids::*;
pub use property_value::*;
