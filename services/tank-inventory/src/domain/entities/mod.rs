//! 实体模块

mod movement;
mod property_definition;
mod tank;
mod user;

pub use movement::{CompletedMovement, Movement};
pub use property_definition::PropertyDefinition;
pub use tank::{DEFAULT_PRODUCT, Tank};
pub use user::User;
