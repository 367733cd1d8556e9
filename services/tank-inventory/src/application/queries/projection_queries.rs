//! Projection queries and views

use serde::Serialize;
use tankfarm_domain_core::Volume;

use crate::domain::services::LevelPoint;
use crate::domain::value_objects::{PropertyValue, TankId};

/// 液位曲线查询
#[derive(Debug, Clone)]
pub struct TankTimelineQuery {
    pub tank_id: TankId,
    /// 缺省取配置中的 projection.horizon_days
    pub horizon_days: Option<u32>,
}

/// 储罐预测视图
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TankProjection {
    pub tank_id: TankId,
    pub tank_name: String,
    pub current_volume: Volume,
    pub projected_volume: Volume,
    pub properties: Vec<PropertyValue>,
    /// 参与预测的计划中移库单数
    pub pending_movements: usize,
}

/// 液位曲线视图
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TankTimeline {
    pub tank_id: TankId,
    pub horizon_days: u32,
    pub points: Vec<LevelPoint>,
}
