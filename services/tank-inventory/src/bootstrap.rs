//! 服务装配

use tankfarm_config::AppConfig;
use tankfarm_telemetry::{PrometheusHandle, init_metrics, init_tracing, init_tracing_json};
use tracing::info;

use crate::application::{AuditRecorder, InventoryService};
use crate::infrastructure::persistence::Stores;

/// 初始化日志与指标，返回 Prometheus 句柄（未启用时为 None）
pub fn init_runtime(config: &AppConfig) -> anyhow::Result<Option<PrometheusHandle>> {
    if config.json_logs() {
        init_tracing_json(&config.telemetry.log_level)?;
    } else {
        init_tracing(&config.telemetry.log_level)?;
    }

    let metrics = if config.telemetry.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        metrics = metrics.is_some(),
        "Runtime initialized"
    );

    Ok(metrics)
}

/// 按配置构建服务
pub fn build_service(config: &AppConfig) -> InventoryService {
    let stores = Stores::from_config(&config.storage);
    let audit = AuditRecorder::new(stores.audit_log, config.audit.enabled);

    InventoryService::new(
        stores.tanks,
        stores.movements,
        stores.properties,
        stores.users,
        audit,
    )
    .with_horizon_days(config.projection.horizon_days)
}
