//! 属性值

use serde::{Deserialize, Serialize};

use super::PropertyId;

/// 一项测量或调和得到的油品属性
///
/// `value` 为 None 表示未知，与 0 不同
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyValue {
    pub property_id: PropertyId,
    #[serde(default)]
    pub value: Option<f64>,
}

impl PropertyValue {
    pub fn new(property_id: impl Into<PropertyId>, value: Option<f64>) -> Self {
        Self {
            property_id: property_id.into(),
            value,
        }
    }

    pub fn known(property_id: impl Into<PropertyId>, value: f64) -> Self {
        Self::new(property_id, Some(value))
    }

    pub fn unknown(property_id: impl Into<PropertyId>) -> Self {
        Self::new(property_id, None)
    }
}
