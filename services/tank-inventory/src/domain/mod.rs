//! Domain layer

pub mod entities;
pub mod enums;
pub mod services;
pub mod value_objects;
