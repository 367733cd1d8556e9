//! 命令定义
//!
//! 每个命令自带输入校验，一次返回全部字段错误

mod movement_commands;
mod property_commands;
mod tank_commands;

pub use movement_commands::*;
pub use property_commands::*;
pub use tank_commands::*;

use tankfarm_errors::{AppError, AppResult, FieldError};

use crate::domain::value_objects::PropertyValue;

fn into_result(errors: Vec<FieldError>) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation_failed(errors))
    }
}

fn require_text(errors: &mut Vec<FieldError>, field: &str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
    }
}

/// 体积 > 0
fn require_positive(errors: &mut Vec<FieldError>, field: &str, label: &str, value: f64) {
    if !value.is_finite() {
        errors.push(FieldError::new(field, format!("{label} must be a number")));
    } else if value <= 0.0 {
        errors.push(FieldError::new(field, format!("{label} must be greater than 0")));
    }
}

/// 体积 >= 0
fn require_non_negative(errors: &mut Vec<FieldError>, field: &str, label: &str, value: f64) {
    if !value.is_finite() {
        errors.push(FieldError::new(field, format!("{label} must be a number")));
    } else if value < 0.0 {
        errors.push(FieldError::new(field, format!("{label} cannot be negative")));
    }
}

fn check_properties(errors: &mut Vec<FieldError>, properties: &[PropertyValue]) {
    for property in properties {
        if property.property_id.as_str().trim().is_empty() {
            errors.push(FieldError::new("properties", "Property id is required"));
        }
        if property.value.is_some_and(|v| !v.is_finite()) {
            errors.push(FieldError::new(
                "properties",
                format!("Value of {} must be a number", property.property_id),
            ));
        }
    }
}

/// 去掉首尾空白，空串视为未填写
fn normalized(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
