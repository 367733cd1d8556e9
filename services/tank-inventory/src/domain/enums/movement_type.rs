//! 移库类型枚举

use serde::{Deserialize, Serialize};
use std::fmt;

/// 移库类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// 收油（外部 → 目标罐）
    Receive,
    /// 倒罐（源罐 → 目标罐）
    Transfer,
    /// 发油（源罐 → 外部）
    Ship,
}

impl MovementType {
    /// 是否需要源罐
    pub fn requires_source(&self) -> bool {
        matches!(self, Self::Transfer | Self::Ship)
    }

    /// 是否需要目标罐
    pub fn requires_destination(&self) -> bool {
        matches!(self, Self::Receive | Self::Transfer)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Receive => "receive",
            Self::Transfer => "transfer",
            Self::Ship => "ship",
        }
    }

    /// 校验提示中使用的复数名词
    pub(crate) fn plural_noun(&self) -> &'static str {
        match self {
            Self::Receive => "receives",
            Self::Transfer => "transfers",
            Self::Ship => "shipments",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
