//! 领域服务：属性调和、移库单校验、储罐变更、库存预测

mod movement_validator;
mod projection_engine;
mod property_blender;
mod tank_mutator;

pub use movement_validator::*;
pub use projection_engine::*;
pub use property_blender::*;
pub use tank_mutator::*;
