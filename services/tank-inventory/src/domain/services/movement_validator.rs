//! 移库单校验
//!
//! 校验失败是数据而不是错误：返回字段级违规列表，空列表表示通过

use tankfarm_domain_core::find_entity;
use tankfarm_errors::FieldError;

use crate::domain::entities::{Movement, Tank};
use crate::domain::enums::MovementType;
use crate::domain::value_objects::TankId;

pub const FIELD_SOURCE_TANK: &str = "sourceTankId";
pub const FIELD_DESTINATION_TANK: &str = "destinationTankId";
pub const FIELD_EXPECTED_VOLUME: &str = "expectedVolume";

/// 移库单校验器
pub struct MovementValidator;

impl MovementValidator {
    /// 校验待提交的移库单
    ///
    /// - receive: 必须有目标罐，不校验容量
    /// - ship: 必须有源罐；已完成时有效体积不得超过源罐当前体积
    /// - transfer: 源罐、目标罐都必须有且不同；容量规则同 ship
    ///
    /// 计划中的移库单跳过容量校验：预测不阻止受理，只有执行才受限。
    pub fn validate(candidate: &Movement, tanks: &[Tank]) -> Vec<FieldError> {
        let mut errors = Self::validate_references(candidate);

        if candidate.movement_type.requires_source() {
            if let Some(error) = Self::check_source_capacity(candidate, tanks) {
                errors.push(error);
            }
        }

        errors
    }

    /// 只校验储罐引用（必填、源与目标不同），不涉及容量
    pub fn validate_references(candidate: &Movement) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let kind = candidate.movement_type;
        let source = present(candidate.source_tank_id.as_ref());
        let destination = present(candidate.destination_tank_id.as_ref());

        if kind.requires_source() && source.is_none() {
            errors.push(FieldError::new(
                FIELD_SOURCE_TANK,
                format!("Source tank is required for {}", kind.plural_noun()),
            ));
        }

        if kind.requires_destination() && destination.is_none() {
            errors.push(FieldError::new(
                FIELD_DESTINATION_TANK,
                format!("Destination tank is required for {}", kind.plural_noun()),
            ));
        }

        if kind == MovementType::Transfer {
            if let (Some(source), Some(destination)) = (source, destination) {
                if source == destination {
                    errors.push(FieldError::new(
                        FIELD_DESTINATION_TANK,
                        "Source and destination tanks must be different",
                    ));
                }
            }
        }

        errors
    }

    fn check_source_capacity(candidate: &Movement, tanks: &[Tank]) -> Option<FieldError> {
        if !candidate.is_completed() {
            return None;
        }

        let source_id = present(candidate.source_tank_id.as_ref())?;
        // 源罐不存在时不报容量错误
        let source = find_entity(tanks, source_id)?;
        let requested = candidate.effective_volume();

        if requested > source.current_volume {
            Some(FieldError::new(
                FIELD_EXPECTED_VOLUME,
                format!(
                    "Insufficient volume. Tank has {:.2} KB, requested {:.2} KB",
                    source.current_volume.value(),
                    requested.value()
                ),
            ))
        } else {
            None
        }
    }
}

/// 空白 ID 视为未填写
fn present(id: Option<&TankId>) -> Option<&TankId> {
    id.filter(|id| !id.as_str().trim().is_empty())
}
