//! 库存预测
//!
//! 在储罐当前状态上依次叠加计划中的移库单，得到未来体积与属性。
//! 只读：不修改输入，也不持久化结果。

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Serialize;
use tankfarm_domain_core::Volume;

use crate::domain::entities::{Movement, Tank};
use crate::domain::enums::MovementType;
use crate::domain::services::PropertyBlender;
use crate::domain::value_objects::{MovementId, PropertyValue, TankId};

/// 预测结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedState {
    pub volume: Volume,
    pub properties: Vec<PropertyValue>,
}

/// 液位曲线上的一个点
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelPoint {
    pub date: DateTime<Utc>,
    pub volume: Volume,
    /// 本点对应移库单带来的体积变化，起点和终点为 0
    pub volume_change: f64,
    pub movement_id: Option<MovementId>,
    pub movement_type: Option<MovementType>,
    /// 起点为当前实际值，其余为预测值
    pub projected: bool,
}

/// 预测引擎
pub struct ProjectionEngine;

impl ProjectionEngine {
    /// 与该储罐相关、尚未完成的移库单，按计划日期升序
    ///
    /// 稳定排序：计划日期相同时保持存储顺序（即创建顺序）
    pub fn pending_for<'a>(tank_id: &TankId, movements: &'a [Movement]) -> Vec<&'a Movement> {
        let mut pending: Vec<&Movement> = movements
            .iter()
            .filter(|m| !m.is_completed() && m.involves(tank_id))
            .collect();
        pending.sort_by_key(|m| m.scheduled_date());
        pending
    }

    /// 计算储罐的预测状态
    ///
    /// 与 [`TankMutator`](super::TankMutator) 使用相同的效果规则，
    /// 区别是调入时只使用移库单自身声明的属性
    pub fn project(tank: &Tank, movements: &[Movement]) -> ProjectedState {
        let mut volume = tank.current_volume;
        let mut properties = tank.properties.clone();

        for movement in Self::pending_for(&tank.id, movements) {
            let moved = movement.effective_volume();

            match Self::direction(movement, &tank.id) {
                Some(Direction::Out) => {
                    volume = volume.saturating_sub(moved);
                }
                Some(Direction::In) => {
                    properties =
                        PropertyBlender::blend(volume, &properties, moved, &movement.properties);
                    volume = volume + moved;
                }
                None => {}
            }
        }

        ProjectedState {
            volume: volume.rounded(),
            properties,
        }
    }

    /// 移库单对该储罐的带符号体积变化
    pub fn volume_change(movement: &Movement, tank_id: &TankId) -> f64 {
        let volume = movement.effective_volume().value();
        match Self::direction(movement, tank_id) {
            Some(Direction::In) => volume,
            Some(Direction::Out) => -volume,
            None => 0.0,
        }
    }

    /// 液位曲线
    ///
    /// 起点为今天零点的当前体积；每张在预测窗口内、会改变体积的计划移库单一个点；
    /// 最后一个点不在窗口终点时补一个终点。日期按 UTC 取整到天，
    /// 逾期未完成的移库单记在今天，点的日期单调不减。
    pub fn level_timeline(
        tank: &Tank,
        movements: &[Movement],
        now: DateTime<Utc>,
        horizon_days: u32,
    ) -> Vec<LevelPoint> {
        let today = start_of_day(now);
        let end = today + Duration::days(i64::from(horizon_days));

        let mut points = vec![LevelPoint {
            date: today,
            volume: tank.current_volume,
            volume_change: 0.0,
            movement_id: None,
            movement_type: None,
            projected: false,
        }];

        let mut running = tank.current_volume.value();
        for movement in Self::pending_for(&tank.id, movements) {
            if movement.scheduled_date() > end {
                break;
            }

            let change = Self::volume_change(movement, &tank.id);
            if change == 0.0 {
                continue;
            }

            running = (running + change).max(0.0);
            points.push(LevelPoint {
                date: start_of_day(movement.scheduled_date()).max(today),
                volume: Volume::new(running).rounded(),
                volume_change: change,
                movement_id: Some(movement.id.clone()),
                movement_type: Some(movement.movement_type),
                projected: true,
            });
        }

        if points.last().map(|p| p.date) != Some(end) {
            points.push(LevelPoint {
                date: end,
                volume: Volume::new(running).rounded(),
                volume_change: 0.0,
                movement_id: None,
                movement_type: None,
                projected: true,
            });
        }

        points
    }

    /// 调出优先：同时是源罐和目标罐时按调出处理
    fn direction(movement: &Movement, tank_id: &TankId) -> Option<Direction> {
        let is_source = movement.source_tank_id.as_ref() == Some(tank_id);
        let is_destination = movement.destination_tank_id.as_ref() == Some(tank_id);

        match movement.movement_type {
            MovementType::Receive if is_destination => Some(Direction::In),
            MovementType::Ship if is_source => Some(Direction::Out),
            MovementType::Transfer if is_source => Some(Direction::Out),
            MovementType::Transfer if is_destination => Some(Direction::In),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    In,
    Out,
}

fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_time(NaiveTime::MIN).and_utc()
}
