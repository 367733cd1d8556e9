//! 强类型 ID 定义
//!
//! ID 形如 `tank-<uuid>`，由存储层生成并以字符串形式持久化

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tankfarm_common::prefixed_id;

/// 储罐 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
#[display("{_0}")]
pub struct TankId(pub String);

impl TankId {
    pub const PREFIX: &'static str = "tank";

    pub fn generate() -> Self {
        Self(prefixed_id(Self::PREFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TankId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// 移库单 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
#[display("{_0}")]
pub struct MovementId(pub String);

impl MovementId {
    pub const PREFIX: &'static str = "mov";

    pub fn generate() -> Self {
        Self(prefixed_id(Self::PREFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MovementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// 属性定义 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
#[display("{_0}")]
pub struct PropertyId(pub String);

impl PropertyId {
    pub const PREFIX: &'static str = "prop";

    pub fn generate() -> Self {
        Self(prefixed_id(Self::PREFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PropertyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
