//! 储罐变更
//!
//! 把已完成移库单的体积与属性效果作用到储罐快照上

use chrono::{DateTime, Utc};
use tankfarm_domain_core::position_of;
use tracing::debug;

use crate::domain::entities::{CompletedMovement, Tank};
use crate::domain::enums::MovementType;
use crate::domain::services::PropertyBlender;
use crate::domain::value_objects::{PropertyValue, TankId};

/// 一次应用实际改动了哪些储罐
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedEffect {
    pub drawn_from: Option<TankId>,
    pub filled: Option<TankId>,
}

impl AppliedEffect {
    pub fn is_empty(&self) -> bool {
        self.drawn_from.is_none() && self.filled.is_none()
    }
}

/// 储罐变更器
///
/// 只接受 [`CompletedMovement`]，计划中的移库单无法被应用。
/// 调用方负责保证每张移库单只应用一次，并在互斥下读改写储罐集合。
pub struct TankMutator;

impl TankMutator {
    /// 应用移库单效果
    ///
    /// 引用的储罐找不到时静默跳过该侧，不报错
    pub fn apply(
        movement: CompletedMovement<'_>,
        tanks: &mut [Tank],
        at: DateTime<Utc>,
    ) -> AppliedEffect {
        let volume = movement.effective_volume();
        let mut effect = AppliedEffect::default();

        match movement.movement_type {
            MovementType::Receive => {
                if let Some(index) = Self::locate(tanks, movement.destination_tank_id.as_ref()) {
                    Self::fill(&mut tanks[index], &movement.properties, movement, at);
                    effect.filled = Some(tanks[index].id.clone());
                }
            }
            MovementType::Ship => {
                if let Some(index) = Self::locate(tanks, movement.source_tank_id.as_ref()) {
                    tanks[index].draw(volume, at);
                    effect.drawn_from = Some(tanks[index].id.clone());
                }
            }
            MovementType::Transfer => {
                // 源罐属性必须在扣减前取出
                let mut source_properties = Vec::new();
                if let Some(index) = Self::locate(tanks, movement.source_tank_id.as_ref()) {
                    source_properties = tanks[index].properties.clone();
                    tanks[index].draw(volume, at);
                    effect.drawn_from = Some(tanks[index].id.clone());
                }

                if let Some(index) = Self::locate(tanks, movement.destination_tank_id.as_ref()) {
                    let moved = if movement.properties.is_empty() {
                        &source_properties
                    } else {
                        &movement.properties
                    };
                    Self::fill(&mut tanks[index], moved, movement, at);
                    effect.filled = Some(tanks[index].id.clone());
                }
            }
        }

        if effect.is_empty() {
            debug!(movement_id = %movement.id, "Movement references no known tank, nothing applied");
        }

        effect
    }

    fn locate(tanks: &[Tank], tank_id: Option<&TankId>) -> Option<usize> {
        let tank_id = tank_id?;
        let index = position_of(tanks, tank_id);
        if index.is_none() {
            debug!(tank_id = %tank_id, "Referenced tank not found, side skipped");
        }
        index
    }

    fn fill(
        tank: &mut Tank,
        moved_properties: &[PropertyValue],
        movement: CompletedMovement<'_>,
        at: DateTime<Utc>,
    ) {
        let volume = movement.effective_volume();
        let blended =
            PropertyBlender::blend(tank.current_volume, &tank.properties, volume, moved_properties);
        tank.fill(volume, blended, at);
    }
}
