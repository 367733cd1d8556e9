//! Tank commands

use tankfarm_common::UserId;
use tankfarm_errors::AppResult;

use crate::domain::value_objects::{PropertyValue, TankId};

use super::{check_properties, into_result, require_non_negative, require_text};

/// 创建储罐命令
#[derive(Debug, Clone, Default)]
pub struct CreateTankCommand {
    pub user_id: UserId,
    pub name: String,
    /// 缺省为 Carbon Black Oil
    pub product: Option<String>,
    pub location: Option<String>,
    /// 缺省为 0
    pub current_volume: Option<f64>,
    pub properties: Vec<PropertyValue>,
}

impl CreateTankCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();
        require_text(&mut errors, "name", "Tank name", &self.name);
        if let Some(volume) = self.current_volume {
            require_non_negative(&mut errors, "currentVolume", "Current volume", volume);
        }
        check_properties(&mut errors, &self.properties);
        into_result(errors)
    }
}

/// 更新储罐命令（只修改有值的字段）
#[derive(Debug, Clone)]
pub struct UpdateTankCommand {
    pub tank_id: TankId,
    pub user_id: UserId,
    pub name: Option<String>,
    pub product: Option<String>,
    pub location: Option<String>,
    pub current_volume: Option<f64>,
    pub properties: Option<Vec<PropertyValue>>,
}

impl UpdateTankCommand {
    pub fn new(tank_id: TankId) -> Self {
        Self {
            tank_id,
            user_id: UserId::system(),
            name: None,
            product: None,
            location: None,
            current_volume: None,
            properties: None,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            require_text(&mut errors, "name", "Tank name", name);
        }
        if let Some(volume) = self.current_volume {
            require_non_negative(&mut errors, "currentVolume", "Current volume", volume);
        }
        if let Some(properties) = &self.properties {
            check_properties(&mut errors, properties);
        }
        into_result(errors)
    }
}

/// 以实测结果重置储罐
#[derive(Debug, Clone)]
pub struct ResetTankCommand {
    pub tank_id: TankId,
    pub user_id: UserId,
    pub volume: f64,
    pub properties: Vec<PropertyValue>,
}

impl ResetTankCommand {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();
        require_non_negative(&mut errors, "volume", "Volume", self.volume);
        check_properties(&mut errors, &self.properties);
        into_result(errors)
    }
}

/// 删除储罐命令
#[derive(Debug, Clone)]
pub struct DeleteTankCommand {
    pub tank_id: TankId,
    pub user_id: UserId,
}
