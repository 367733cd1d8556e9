//! 通用类型定义

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// 未指定操作人时使用的用户 ID
pub const SYSTEM_USER: &str = "system";

/// 用户 ID
///
/// 用户目录由外部系统维护，这里只保存其不透明标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
#[display("{_0}")]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn system() -> Self {
        Self(SYSTEM_USER.to_string())
    }

    /// 空值或缺省时回落到 system
    pub fn or_system(id: Option<String>) -> Self {
        match id {
            Some(id) if !id.trim().is_empty() => Self(id),
            _ => Self::system(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::system()
    }
}
