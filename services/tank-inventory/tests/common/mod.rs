//! 测试公共工具

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tank_inventory::InventoryService;
use tank_inventory::application::AuditRecorder;
use tank_inventory::application::commands::CreateTankCommand;
use tank_inventory::domain::entities::Tank;
use tank_inventory::domain::value_objects::PropertyValue;
use tank_inventory::infrastructure::persistence::Stores;
use tankfarm_ports::{AuditLogRepository, CollectionStore};

/// 全内存服务
pub fn service() -> InventoryService {
    let stores = Stores::in_memory();
    let audit = AuditRecorder::new(stores.audit_log, true);
    InventoryService::new(
        stores.tanks,
        stores.movements,
        stores.properties,
        stores.users,
        audit,
    )
}

/// 使用指定审计仓储的内存服务
pub fn service_with_audit(audit_log: Arc<dyn AuditLogRepository>, enabled: bool) -> InventoryService {
    let stores = Stores::in_memory();
    InventoryService::new(
        stores.tanks,
        stores.movements,
        stores.properties,
        stores.users,
        AuditRecorder::new(audit_log, enabled),
    )
}

/// 使用指定储罐存储的内存服务
pub fn service_with_tanks(tanks: Arc<dyn CollectionStore<Tank>>) -> InventoryService {
    let stores = Stores::in_memory();
    InventoryService::new(
        tanks,
        stores.movements,
        stores.properties,
        stores.users,
        AuditRecorder::new(stores.audit_log, true),
    )
}

pub async fn create_tank(
    service: &InventoryService,
    name: &str,
    volume: f64,
    properties: Vec<PropertyValue>,
) -> Tank {
    let cmd = CreateTankCommand {
        current_volume: Some(volume),
        properties,
        ..CreateTankCommand::new(name)
    };
    service.create_tank(cmd).await.unwrap()
}

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, d, 0, 0, 0).unwrap()
}
