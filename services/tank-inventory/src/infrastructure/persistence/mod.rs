//! 持久化装配
//!
//! 按配置选择 JSON 文件或内存后端

use std::sync::Arc;

use tankfarm_adapter_storage::{CollectionAuditLog, JsonFileStore, MemoryStore};
use tankfarm_common::RetryConfig;
use tankfarm_config::{StorageBackend, StorageConfig, WriteRetryConfig};
use tankfarm_ports::{AuditLogEntry, AuditLogRepository, CollectionStore};
use tracing::info;

use crate::domain::entities::{Movement, PropertyDefinition, Tank, User};

pub const TANKS_FILE: &str = "tanks.json";
pub const MOVEMENTS_FILE: &str = "movements.json";
pub const PROPERTIES_FILE: &str = "properties.json";
pub const AUDIT_LOG_FILE: &str = "audit-log.json";
pub const USERS_FILE: &str = "users.json";

/// 各实体集合的存储
pub struct Stores {
    pub tanks: Arc<dyn CollectionStore<Tank>>,
    pub movements: Arc<dyn CollectionStore<Movement>>,
    pub properties: Arc<dyn CollectionStore<PropertyDefinition>>,
    /// 只读
    pub users: Arc<dyn CollectionStore<User>>,
    pub audit_log: Arc<dyn AuditLogRepository>,
}

impl Stores {
    pub fn from_config(config: &StorageConfig) -> Self {
        match config.backend {
            StorageBackend::Json => {
                info!(data_dir = %config.data_dir.display(), "Using JSON file storage");
                let retry = retry_config(&config.write_retry);
                let dir = &config.data_dir;

                let tanks = JsonFileStore::<Tank>::in_dir(dir, TANKS_FILE);
                let movements = JsonFileStore::<Movement>::in_dir(dir, MOVEMENTS_FILE);
                let properties = JsonFileStore::<PropertyDefinition>::in_dir(dir, PROPERTIES_FILE);
                let audit_log = JsonFileStore::<AuditLogEntry>::in_dir(dir, AUDIT_LOG_FILE);
                let users = JsonFileStore::<User>::in_dir(dir, USERS_FILE);

                Self {
                    tanks: Arc::new(tanks.with_retry(retry.clone())),
                    movements: Arc::new(movements.with_retry(retry.clone())),
                    properties: Arc::new(properties.with_retry(retry.clone())),
                    users: Arc::new(users),
                    audit_log: Arc::new(CollectionAuditLog::new(audit_log.with_retry(retry))),
                }
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Self::in_memory()
            }
        }
    }

    /// 全部使用内存存储
    pub fn in_memory() -> Self {
        Self {
            tanks: Arc::new(MemoryStore::<Tank>::new()),
            movements: Arc::new(MemoryStore::<Movement>::new()),
            properties: Arc::new(MemoryStore::<PropertyDefinition>::new()),
            users: Arc::new(MemoryStore::<User>::new()),
            audit_log: Arc::new(CollectionAuditLog::new(MemoryStore::<AuditLogEntry>::new())),
        }
    }
}

fn retry_config(config: &WriteRetryConfig) -> RetryConfig {
    RetryConfig::new(config.max_attempts, config.initial_delay(), config.max_delay())
}
