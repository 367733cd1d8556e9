//! JSON 文件后端端到端测试

use std::path::PathBuf;

use tank_inventory::application::commands::{CreateMovementCommand, CreateTankCommand};
use tank_inventory::bootstrap::build_service;
use tank_inventory::domain::enums::MovementType;
use tank_inventory::domain::entities::User;
use tank_inventory::infrastructure::persistence::{MOVEMENTS_FILE, TANKS_FILE, USERS_FILE};
use tankfarm_config::{AppConfig, StorageBackend};
use tankfarm_domain_core::Volume;

fn temp_data_dir() -> PathBuf {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    std::env::temp_dir().join(format!("tank-inventory-{}-{}", std::process::id(), nanos))
}

fn json_config(data_dir: PathBuf) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::Json;
    config.storage.data_dir = data_dir;
    config
}

#[tokio::test]
async fn test_state_survives_restart() {
    let data_dir = temp_data_dir();
    let config = json_config(data_dir.clone());

    let tank_id = {
        let service = build_service(&config);
        let tank = service
            .create_tank(CreateTankCommand {
                current_volume: Some(50.0),
                ..CreateTankCommand::new("T-1")
            })
            .await
            .unwrap();

        let cmd = CreateMovementCommand::new(MovementType::Ship, 20.0)
            .from_tank(tank.id.clone())
            .completed_at(chrono::Utc::now());
        service.create_movement(cmd).await.unwrap();
        tank.id
    };

    assert!(data_dir.join(TANKS_FILE).exists());
    assert!(data_dir.join(MOVEMENTS_FILE).exists());

    let reopened = build_service(&config);
    let tank = reopened.get_tank(&tank_id).await.unwrap();
    assert_eq!(tank.current_volume, Volume::new(30.0));

    let raw = std::fs::read_to_string(data_dir.join(MOVEMENTS_FILE)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["type"], "ship");
    assert!(json[0]["date"].is_string());
    assert_eq!(json[0]["createdBy"], "system");

    let _ = std::fs::remove_dir_all(&data_dir);
}

#[tokio::test]
async fn test_users_come_from_directory_file() {
    let data_dir = temp_data_dir();
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(
        data_dir.join(USERS_FILE),
        r#"[{"id":"u-1","name":"Dana"},{"id":"u-2","name":"Ravi"}]"#,
    )
    .unwrap();

    let service = build_service(&json_config(data_dir.clone()));
    let users = service.list_users().await.unwrap();

    assert_eq!(users, vec![User::new("u-1", "Dana"), User::new("u-2", "Ravi")]);

    let _ = std::fs::remove_dir_all(&data_dir);
}

#[tokio::test]
async fn test_missing_users_file_lists_nobody() {
    let service = build_service(&json_config(temp_data_dir()));
    assert!(service.list_users().await.unwrap().is_empty());
}
