//! 储罐实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tankfarm_domain_core::{Entity, Volume};

use crate::domain::value_objects::{PropertyValue, TankId};

/// 默认油品
pub const DEFAULT_PRODUCT: &str = "Carbon Black Oil";

/// 储罐实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tank {
    pub id: TankId,
    pub name: String,
    pub product: String,
    pub location: String,
    /// 当前体积（KB），任何变更后不为负
    pub current_volume: Volume,
    /// 当前油品属性快照
    pub properties: Vec<PropertyValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tank {
    pub fn new(
        name: impl Into<String>,
        product: impl Into<String>,
        location: impl Into<String>,
        current_volume: Volume,
        properties: Vec<PropertyValue>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TankId::generate(),
            name: name.into(),
            product: product.into(),
            location: location.into(),
            current_volume: clamp(current_volume),
            properties,
            created_at: now,
            updated_at: now,
        }
    }

    /// 名称比较（忽略大小写与首尾空白）
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// 收入油品：以调和结果替换属性并增加体积
    pub fn fill(&mut self, volume: Volume, blended: Vec<PropertyValue>, at: DateTime<Utc>) {
        self.properties = blended;
        self.current_volume = clamp(self.current_volume + volume);
        self.updated_at = at;
    }

    /// 抽出油品：体积扣减到零为止，属性不变
    pub fn draw(&mut self, volume: Volume, at: DateTime<Utc>) {
        self.current_volume = self.current_volume.saturating_sub(volume);
        self.updated_at = at;
    }

    /// 以实测值覆盖体积和属性
    pub fn reset(&mut self, volume: Volume, properties: Vec<PropertyValue>, at: DateTime<Utc>) {
        self.current_volume = clamp(volume);
        self.properties = properties;
        self.updated_at = at;
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

fn clamp(volume: Volume) -> Volume {
    if volume.is_negative() {
        Volume::ZERO
    } else {
        volume
    }
}

impl Entity for Tank {
    type Id = TankId;

    fn id(&self) -> &TankId {
        &self.id
    }
}
