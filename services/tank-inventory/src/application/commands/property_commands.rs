//! Property definition commands

use tankfarm_common::UserId;
use tankfarm_errors::AppResult;

use crate::domain::value_objects::PropertyId;

use super::{into_result, require_text};

/// 创建属性定义命令
#[derive(Debug, Clone, Default)]
pub struct CreatePropertyCommand {
    pub user_id: UserId,
    pub name: String,
    pub unit: Option<String>,
}

impl CreatePropertyCommand {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();
        require_text(&mut errors, "name", "Property name", &self.name);
        into_result(errors)
    }
}

/// 更新属性定义命令
#[derive(Debug, Clone)]
pub struct UpdatePropertyCommand {
    pub property_id: PropertyId,
    pub user_id: UserId,
    pub name: Option<String>,
    pub unit: Option<String>,
}

impl UpdatePropertyCommand {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            require_text(&mut errors, "name", "Property name", name);
        }
        into_result(errors)
    }
}

/// 删除属性定义命令
#[derive(Debug, Clone)]
pub struct DeletePropertyCommand {
    pub property_id: PropertyId,
    pub user_id: UserId,
}
