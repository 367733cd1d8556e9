//! 属性定义实体
//!
//! 属性 ID → 名称/单位 的注册表条目

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tankfarm_domain_core::Entity;

use crate::domain::value_objects::PropertyId;

/// 属性定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub id: PropertyId,
    /// 名称，如 "API"、"Sulfur"
    pub name: String,
    /// 单位，如 "%"、"ppm"
    pub unit: String,
    pub created_at: DateTime<Utc>,
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: PropertyId::generate(),
            name: name.into(),
            unit: unit.into(),
            created_at: now,
        }
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

impl Entity for PropertyDefinition {
    type Id = PropertyId;

    fn id(&self) -> &PropertyId {
        &self.id
    }
}
