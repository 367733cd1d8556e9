//! Movement queries

use crate::domain::value_objects::TankId;

/// 移库单列表查询
#[derive(Debug, Clone, Default)]
pub struct ListMovementsQuery {
    /// 只返回以源罐或目标罐身份涉及该储罐的移库单
    pub tank_id: Option<TankId>,
}

impl ListMovementsQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_tank(tank_id: impl Into<TankId>) -> Self {
        Self {
            tank_id: Some(tank_id.into()),
        }
    }
}
