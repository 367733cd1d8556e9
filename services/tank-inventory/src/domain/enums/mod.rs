//! 枚举模块

mod movement_state;
mod movement_type;

pub use movement_state::*;
pub use movement_type::*;
