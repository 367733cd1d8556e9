//! Tank inventory metrics
//!
//! 业务指标记录；未安装 recorder 时为空操作

use metrics::counter;
use tankfarm_telemetry::names;

use crate::domain::enums::MovementType;

/// 记录新建移库单
pub fn record_movement_created(movement_type: MovementType, completed: bool) {
    let labels = [
        ("type", movement_type.as_str().to_string()),
        ("completed", completed.to_string()),
    ];
    counter!(names::MOVEMENTS_CREATED, &labels).increment(1);
}

/// 记录移库单效果已作用到储罐
pub fn record_movement_applied(movement_type: MovementType) {
    let labels = [("type", movement_type.as_str().to_string())];
    counter!(names::MOVEMENTS_APPLIED, &labels).increment(1);
}

/// 记录业务规则拒绝
pub fn record_validation_rejection(operation: &str) {
    let labels = [("operation", operation.to_string())];
    counter!(names::VALIDATION_REJECTIONS, &labels).increment(1);
}

/// 记录审计写入失败
pub fn record_audit_failure(entity_type: &str) {
    let labels = [("entity_type", entity_type.to_string())];
    counter!(names::AUDIT_FAILURES, &labels).increment(1);
}
