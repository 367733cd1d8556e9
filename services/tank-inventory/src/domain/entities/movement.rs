//! 移库单实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tankfarm_common::UserId;
use tankfarm_domain_core::{Entity, Volume};

use crate::domain::enums::{Completion, MovementState, MovementType};
use crate::domain::value_objects::{MovementId, PropertyValue, TankId};

/// 移库单实体
///
/// 对储罐只持有软引用：引用的储罐可能已被删除
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: MovementId,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    /// 计划日期 / 执行日期
    #[serde(flatten)]
    pub state: MovementState,
    /// 预计体积（> 0）
    pub expected_volume: Volume,
    /// 实际体积（有值时 > 0）
    #[serde(default)]
    pub actual_volume: Option<Volume>,
    #[serde(default)]
    pub source_tank_id: Option<TankId>,
    #[serde(default)]
    pub destination_tank_id: Option<TankId>,
    /// 所移油品的属性
    #[serde(default)]
    pub properties: Vec<PropertyValue>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub ticket_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// 随附单据路径
    #[serde(default)]
    pub pdf_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: UserId,
}

impl Movement {
    pub fn new(
        movement_type: MovementType,
        state: MovementState,
        expected_volume: Volume,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MovementId::generate(),
            movement_type,
            state,
            expected_volume,
            actual_volume: None,
            source_tank_id: None,
            destination_tank_id: None,
            properties: Vec::new(),
            carrier: None,
            ticket_number: None,
            notes: None,
            pdf_path: None,
            created_at: now,
            created_by,
        }
    }

    pub fn with_actual_volume(mut self, volume: Option<Volume>) -> Self {
        self.actual_volume = volume;
        self
    }

    pub fn with_source(mut self, tank_id: Option<TankId>) -> Self {
        self.source_tank_id = tank_id;
        self
    }

    pub fn with_destination(mut self, tank_id: Option<TankId>) -> Self {
        self.destination_tank_id = tank_id;
        self
    }

    pub fn with_properties(mut self, properties: Vec<PropertyValue>) -> Self {
        self.properties = properties;
        self
    }

    /// 有效体积：有实际体积用实际体积，否则用预计体积
    pub fn effective_volume(&self) -> Volume {
        self.actual_volume.unwrap_or(self.expected_volume)
    }

    pub fn scheduled_date(&self) -> DateTime<Utc> {
        self.state.scheduled_date()
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.state.date()
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    /// 是否以源罐或目标罐身份涉及该储罐
    pub fn involves(&self, tank_id: &TankId) -> bool {
        self.source_tank_id.as_ref() == Some(tank_id)
            || self.destination_tank_id.as_ref() == Some(tank_id)
    }

    /// 赋予执行日期，返回是否发生了首次完成迁移
    pub fn complete(&mut self, at: DateTime<Utc>) -> Completion {
        self.state.complete(at)
    }

    /// 已完成视图；计划中的移库单返回 None
    pub fn as_completed(&self) -> Option<CompletedMovement<'_>> {
        self.state
            .date()
            .map(|date| CompletedMovement { movement: self, date })
    }
}

impl Entity for Movement {
    type Id = MovementId;

    fn id(&self) -> &MovementId {
        &self.id
    }
}

/// 已完成移库单的借用视图
///
/// 只能通过 [`Movement::as_completed`] 获得，储罐变更只接受该类型
#[derive(Debug, Clone, Copy)]
pub struct CompletedMovement<'a> {
    movement: &'a Movement,
    date: DateTime<Utc>,
}

impl CompletedMovement<'_> {
    /// 执行日期
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

impl std::ops::Deref for CompletedMovement<'_> {
    type Target = Movement;

    fn deref(&self) -> &Movement {
        self.movement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn june(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 8, 0, 0).unwrap()
    }

    fn ship(actual: Option<f64>) -> Movement {
        Movement::new(
            MovementType::Ship,
            MovementState::new(june(1), None),
            Volume::new(80.0),
            UserId::system(),
            june(1),
        )
        .with_actual_volume(actual.map(Volume::new))
        .with_source(Some(TankId::from("tank-a")))
    }

    #[test]
    fn test_effective_volume_prefers_actual() {
        assert_eq!(ship(None).effective_volume(), Volume::new(80.0));
        assert_eq!(ship(Some(78.5)).effective_volume(), Volume::new(78.5));
    }

    #[test]
    fn test_completed_view_only_for_dated_movements() {
        let mut m = ship(None);
        assert!(m.as_completed().is_none());

        m.complete(june(3));
        let completed = m.as_completed().unwrap();
        assert_eq!(completed.date(), june(3));
        assert_eq!(completed.movement_type, MovementType::Ship);
    }

    #[test]
    fn test_involves() {
        let m = ship(None);
        assert!(m.involves(&TankId::from("tank-a")));
        assert!(!m.involves(&TankId::from("tank-b")));
    }

    #[test]
    fn test_flat_wire_shape() {
        let mut m = ship(None);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["type"], "ship");
        assert_eq!(json["expectedVolume"], 80.0);
        assert_eq!(json["sourceTankId"], "tank-a");
        assert!(json["date"].is_null());
        assert!(json["scheduledDate"].is_string());

        m.complete(june(2));
        let json = serde_json::to_string(&m).unwrap();
        let back: Movement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        assert!(back.is_completed());
    }
}
