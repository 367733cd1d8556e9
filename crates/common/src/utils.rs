//! 通用工具函数

use uuid::Uuid;

/// 生成带前缀的实体 ID，如 `tank-<uuid>`
///
/// 使用 UUID v7（时间有序），同一集合内的 ID 与创建顺序一致
pub fn prefixed_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::now_v7())
}
