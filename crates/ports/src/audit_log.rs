//! 审计日志 Repository trait 定义

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tankfarm_common::{UserId, prefixed_id};
use tankfarm_errors::AppResult;

/// 审计操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Reset,
}

/// 审计实体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditEntityType {
    Tank,
    Movement,
    Property,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Reset => "reset",
        };
        f.write_str(s)
    }
}

impl fmt::Display for AuditEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Tank => "tank",
            Self::Movement => "movement",
            Self::Property => "property",
        };
        f.write_str(s)
    }
}

/// 变更前后快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditChanges {
    pub old: Value,
    pub new: Value,
}

/// 审计日志条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// 唯一标识（audit-<uuid>）
    pub id: String,
    pub action: AuditAction,
    pub entity_type: AuditEntityType,
    pub entity_id: String,
    pub user_id: UserId,
    pub timestamp: DateTime<Utc>,
    pub changes: AuditChanges,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AuditLogEntry {
    /// 创建新的审计日志条目，变更快照默认为空对象
    pub fn new(
        action: AuditAction,
        entity_type: AuditEntityType,
        entity_id: impl Into<String>,
        user_id: UserId,
    ) -> Self {
        Self {
            id: prefixed_id("audit"),
            action,
            entity_type,
            entity_id: entity_id.into(),
            user_id,
            timestamp: Utc::now(),
            changes: AuditChanges {
                old: Value::Object(Default::default()),
                new: Value::Object(Default::default()),
            },
            description: None,
        }
    }

    /// 设置变更值
    pub fn with_changes(mut self, old: Value, new: Value) -> Self {
        self.changes = AuditChanges { old, new };
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// 审计日志过滤器
#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    pub entity_type: Option<AuditEntityType>,
    pub entity_id: Option<String>,
}

impl AuditLogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按实体类型过滤
    pub fn by_entity_type(mut self, entity_type: AuditEntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    /// 按实体 ID 过滤
    pub fn by_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        self.entity_type.is_none_or(|t| t == entry.entity_type)
            && self
                .entity_id
                .as_deref()
                .is_none_or(|id| id == entry.entity_id)
    }
}

/// 审计日志 Repository trait
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// 追加一条审计日志
    async fn append(&self, entry: AuditLogEntry) -> AppResult<()>;

    /// 按过滤条件查询，按时间倒序
    async fn query(&self, filter: AuditLogFilter) -> AppResult<Vec<AuditLogEntry>>;
}
