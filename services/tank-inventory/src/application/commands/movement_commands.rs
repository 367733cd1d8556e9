//! Movement commands

use chrono::{DateTime, Utc};
use tankfarm_common::UserId;
use tankfarm_domain_core::Volume;
use tankfarm_errors::{AppResult, FieldError};

use crate::domain::entities::Movement;
use crate::domain::enums::{MovementState, MovementType};
use crate::domain::value_objects::{MovementId, PropertyValue, TankId};

use super::{check_properties, into_result, normalized, require_positive};

/// 创建移库单命令
#[derive(Debug, Clone)]
pub struct CreateMovementCommand {
    pub user_id: UserId,
    pub movement_type: MovementType,
    /// 缺省为当前时间
    pub scheduled_date: Option<DateTime<Utc>>,
    /// 有值即创建为已完成
    pub date: Option<DateTime<Utc>>,
    pub expected_volume: f64,
    pub actual_volume: Option<f64>,
    pub source_tank_id: Option<TankId>,
    pub destination_tank_id: Option<TankId>,
    pub properties: Vec<PropertyValue>,
    pub carrier: Option<String>,
    pub ticket_number: Option<String>,
    pub notes: Option<String>,
    pub pdf_path: Option<String>,
}

impl CreateMovementCommand {
    pub fn new(movement_type: MovementType, expected_volume: f64) -> Self {
        Self {
            user_id: UserId::system(),
            movement_type,
            scheduled_date: None,
            date: None,
            expected_volume,
            actual_volume: None,
            source_tank_id: None,
            destination_tank_id: None,
            properties: Vec::new(),
            carrier: None,
            ticket_number: None,
            notes: None,
            pdf_path: None,
        }
    }

    pub fn from_tank(mut self, tank_id: impl Into<TankId>) -> Self {
        self.source_tank_id = Some(tank_id.into());
        self
    }

    pub fn to_tank(mut self, tank_id: impl Into<TankId>) -> Self {
        self.destination_tank_id = Some(tank_id.into());
        self
    }

    pub fn completed_at(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn scheduled_for(mut self, scheduled_date: DateTime<Utc>) -> Self {
        self.scheduled_date = Some(scheduled_date);
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        into_result(self.violations())
    }

    /// 输入层面的字段错误，与业务规则错误合并后一起返回
    pub fn violations(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_positive(&mut errors, "expectedVolume", "Expected volume", self.expected_volume);
        if let Some(actual) = self.actual_volume {
            require_positive(&mut errors, "actualVolume", "Actual volume", actual);
        }
        check_properties(&mut errors, &self.properties);
        errors
    }

    /// 构造移库单实体（业务规则校验由调用方完成）
    pub fn into_movement(self, now: DateTime<Utc>) -> Movement {
        let state = MovementState::new(self.scheduled_date.unwrap_or(now), self.date);

        let mut movement = Movement::new(
            self.movement_type,
            state,
            Volume::new(self.expected_volume),
            self.user_id,
            now,
        )
        .with_actual_volume(self.actual_volume.map(Volume::new))
        .with_source(self.source_tank_id)
        .with_destination(self.destination_tank_id)
        .with_properties(self.properties);

        movement.carrier = normalized(self.carrier);
        movement.ticket_number = normalized(self.ticket_number);
        movement.notes = normalized(self.notes);
        movement.pdf_path = normalized(self.pdf_path);
        movement
    }
}

/// 更新移库单命令（只修改有值的字段，类型不可修改）
#[derive(Debug, Clone)]
pub struct UpdateMovementCommand {
    pub movement_id: MovementId,
    pub user_id: UserId,
    pub scheduled_date: Option<DateTime<Utc>>,
    /// 计划中的移库单赋予日期即完成；已完成的只更正日期
    pub date: Option<DateTime<Utc>>,
    pub expected_volume: Option<f64>,
    pub actual_volume: Option<f64>,
    pub source_tank_id: Option<TankId>,
    pub destination_tank_id: Option<TankId>,
    pub properties: Option<Vec<PropertyValue>>,
    pub carrier: Option<String>,
    pub ticket_number: Option<String>,
    pub notes: Option<String>,
    pub pdf_path: Option<String>,
}

impl UpdateMovementCommand {
    pub fn new(movement_id: MovementId) -> Self {
        Self {
            movement_id,
            user_id: UserId::system(),
            scheduled_date: None,
            date: None,
            expected_volume: None,
            actual_volume: None,
            source_tank_id: None,
            destination_tank_id: None,
            properties: None,
            carrier: None,
            ticket_number: None,
            notes: None,
            pdf_path: None,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        into_result(self.violations())
    }

    pub fn violations(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(expected) = self.expected_volume {
            require_positive(&mut errors, "expectedVolume", "Expected volume", expected);
        }
        if let Some(actual) = self.actual_volume {
            require_positive(&mut errors, "actualVolume", "Actual volume", actual);
        }
        if let Some(properties) = &self.properties {
            check_properties(&mut errors, properties);
        }
        errors
    }

    /// 合并除执行日期以外的字段
    pub fn merge_into(&self, movement: &mut Movement) {
        if let Some(scheduled_date) = self.scheduled_date {
            movement.state.reschedule(scheduled_date);
        }
        if let Some(expected) = self.expected_volume {
            movement.expected_volume = Volume::new(expected);
        }
        if let Some(actual) = self.actual_volume {
            movement.actual_volume = Some(Volume::new(actual));
        }
        if let Some(source) = &self.source_tank_id {
            movement.source_tank_id = Some(source.clone());
        }
        if let Some(destination) = &self.destination_tank_id {
            movement.destination_tank_id = Some(destination.clone());
        }
        if let Some(properties) = &self.properties {
            movement.properties = properties.clone();
        }
        if self.carrier.is_some() {
            movement.carrier = normalized(self.carrier.clone());
        }
        if self.ticket_number.is_some() {
            movement.ticket_number = normalized(self.ticket_number.clone());
        }
        if self.notes.is_some() {
            movement.notes = normalized(self.notes.clone());
        }
        if self.pdf_path.is_some() {
            movement.pdf_path = normalized(self.pdf_path.clone());
        }
    }
}

/// 删除移库单命令
#[derive(Debug, Clone)]
pub struct DeleteMovementCommand {
    pub movement_id: MovementId,
    pub user_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_volumes_must_be_positive() {
        let mut cmd = CreateMovementCommand::new(MovementType::Receive, 0.0);
        cmd.actual_volume = Some(-3.0);

        let err = cmd.validate().unwrap_err();
        let messages: Vec<&str> = err.field_errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Expected volume must be greater than 0", "Actual volume must be greater than 0"]
        );
    }

    #[test]
    fn test_into_movement_defaults() {
        let movement = CreateMovementCommand::new(MovementType::Receive, 10.0)
            .to_tank("tank-a")
            .into_movement(day(4));

        assert_eq!(movement.scheduled_date(), day(4));
        assert!(!movement.is_completed());
        assert_eq!(movement.created_by, UserId::system());
        assert!(movement.id.as_str().starts_with("mov-"));
    }

    #[test]
    fn test_into_movement_with_date_is_completed() {
        let mut cmd = CreateMovementCommand::new(MovementType::Receive, 10.0)
            .to_tank("tank-a")
            .scheduled_for(day(1))
            .completed_at(day(2));
        cmd.carrier = Some("  ".to_string());

        let movement = cmd.into_movement(day(3));
        assert_eq!(movement.date(), Some(day(2)));
        assert_eq!(movement.scheduled_date(), day(1));
        assert!(movement.carrier.is_none());
    }

    #[test]
    fn test_merge_leaves_date_alone() {
        let mut movement = CreateMovementCommand::new(MovementType::Ship, 10.0)
            .from_tank("tank-a")
            .scheduled_for(day(1))
            .into_movement(day(1));

        let mut cmd = UpdateMovementCommand::new(movement.id.clone());
        cmd.date = Some(day(9));
        cmd.scheduled_date = Some(day(5));
        cmd.notes = Some("moved to friday".to_string());
        cmd.merge_into(&mut movement);

        assert!(!movement.is_completed());
        assert_eq!(movement.scheduled_date(), day(5));
        assert_eq!(movement.notes.as_deref(), Some("moved to friday"));
    }
}
