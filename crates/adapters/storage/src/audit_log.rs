//! 基于集合存储的审计日志

use async_trait::async_trait;
use tankfarm_errors::AppResult;
use tankfarm_ports::{AuditLogEntry, AuditLogFilter, AuditLogRepository, CollectionStore};
use tokio::sync::Mutex;

/// 审计日志（追加写入底层集合）
pub struct CollectionAuditLog<S> {
    store: S,
    append_lock: Mutex<()>,
}

impl<S> CollectionAuditLog<S>
where
    S: CollectionStore<AuditLogEntry>,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            append_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<S> AuditLogRepository for CollectionAuditLog<S>
where
    S: CollectionStore<AuditLogEntry>,
{
    async fn append(&self, entry: AuditLogEntry) -> AppResult<()> {
        let _guard = self.append_lock.lock().await;
        let mut entries = self.store.read().await?;
        entries.push(entry);
        self.store.write(&entries).await
    }

    async fn query(&self, filter: AuditLogFilter) -> AppResult<Vec<AuditLogEntry>> {
        let mut entries: Vec<AuditLogEntry> = self
            .store
            .read()
            .await?
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect();

        // 时间倒序
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use tankfarm_common::UserId;
    use tankfarm_ports::{AuditAction, AuditEntityType};

    #[tokio::test]
    async fn test_query_filters_and_orders_newest_first() {
        let log = CollectionAuditLog::new(MemoryStore::new());

        let mut first = AuditLogEntry::new(
            AuditAction::Create,
            AuditEntityType::Tank,
            "tank-1",
            UserId::system(),
        );
        first.timestamp = first.timestamp - chrono_seconds(60);
        let second = AuditLogEntry::new(
            AuditAction::Update,
            AuditEntityType::Tank,
            "tank-1",
            UserId::system(),
        );
        let other = AuditLogEntry::new(
            AuditAction::Create,
            AuditEntityType::Movement,
            "mov-1",
            UserId::system(),
        );

        log.append(first.clone()).await.unwrap();
        log.append(second.clone()).await.unwrap();
        log.append(other).await.unwrap();

        let tank_entries = log
            .query(AuditLogFilter::new().by_entity("tank-1"))
            .await
            .unwrap();
        assert_eq!(tank_entries.len(), 2);
        assert_eq!(tank_entries[0].id, second.id);
        assert_eq!(tank_entries[1].id, first.id);

        let all = log.query(AuditLogFilter::new()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    fn chrono_seconds(secs: i64) -> chrono::TimeDelta {
        chrono::TimeDelta::seconds(secs)
    }
}
