//! tank-inventory - 储罐库存服务

use anyhow::Context;
use tank_inventory::bootstrap::{build_service, init_runtime};
use tankfarm_config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // 1. 加载配置
    let config = AppConfig::load("config").context("Failed to load configuration")?;

    // 2. 初始化运行时
    let _metrics = init_runtime(&config)?;

    info!("Starting {} service", config.app_name);

    // 3. 构建服务
    let service = build_service(&config);

    // 4. 输出库存报告
    let report = service.project_all().await?;
    for projection in &report {
        info!(
            tank_id = %projection.tank_id,
            tank = %projection.tank_name,
            current_volume = projection.current_volume.value(),
            projected_volume = projection.projected_volume.value(),
            pending_movements = projection.pending_movements,
            "Tank inventory"
        );
    }
    info!(tanks = report.len(), "Inventory report complete");

    Ok(())
}
