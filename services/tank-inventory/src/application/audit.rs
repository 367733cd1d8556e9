//! 审计记录
//!
//! 尽力而为：写入失败只记日志和指标，不影响主操作

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tankfarm_common::UserId;
use tankfarm_errors::AppResult;
use tankfarm_ports::{
    AuditAction, AuditEntityType, AuditLogEntry, AuditLogFilter, AuditLogRepository,
};
use tracing::warn;

use crate::infrastructure::observability::metrics;

/// 一次审计的内容
pub struct AuditRecord<'a> {
    pub action: AuditAction,
    pub entity_type: AuditEntityType,
    pub entity_id: &'a str,
    pub user_id: &'a UserId,
    pub description: Option<&'a str>,
}

impl<'a> AuditRecord<'a> {
    pub fn new(
        action: AuditAction,
        entity_type: AuditEntityType,
        entity_id: &'a str,
        user_id: &'a UserId,
    ) -> Self {
        Self {
            action,
            entity_type,
            entity_id,
            user_id,
            description: None,
        }
    }

    pub fn described(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }
}

/// 审计记录器
pub struct AuditRecorder {
    repository: Arc<dyn AuditLogRepository>,
    enabled: bool,
}

impl AuditRecorder {
    pub fn new(repository: Arc<dyn AuditLogRepository>, enabled: bool) -> Self {
        Self {
            repository,
            enabled,
        }
    }

    /// 记录变更前后快照，缺失的一侧记为 `{}`
    pub async fn record<T: Serialize>(
        &self,
        record: AuditRecord<'_>,
        old: Option<&T>,
        new: Option<&T>,
    ) {
        if !self.enabled {
            return;
        }

        let mut entry = AuditLogEntry::new(
            record.action,
            record.entity_type,
            record.entity_id,
            record.user_id.clone(),
        )
        .with_changes(snapshot(old), snapshot(new));
        if let Some(description) = record.description {
            entry = entry.with_description(description);
        }

        if let Err(e) = self.repository.append(entry).await {
            warn!(
                action = %record.action,
                entity_type = %record.entity_type,
                entity_id = record.entity_id,
                error = %e,
                "Failed to write audit log entry"
            );
            metrics::record_audit_failure(&record.entity_type.to_string());
        }
    }

    /// 查询审计日志，时间倒序
    pub async fn query(&self, filter: AuditLogFilter) -> AppResult<Vec<AuditLogEntry>> {
        self.repository.query(filter).await
    }
}

fn snapshot<T: Serialize>(value: Option<&T>) -> Value {
    let empty = || Value::Object(Default::default());
    match value {
        Some(value) => serde_json::to_value(value).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to snapshot entity for audit");
            empty()
        }),
        None => empty(),
    }
}
