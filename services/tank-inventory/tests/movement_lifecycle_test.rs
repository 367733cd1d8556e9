//! 移库单生命周期测试

mod common;

use chrono::{Duration, Utc};
use common::{create_tank, day, service};
use tank_inventory::application::commands::{
    CreateMovementCommand, DeleteMovementCommand, DeleteTankCommand, UpdateMovementCommand,
};
use tank_inventory::application::queries::{ListMovementsQuery, TankTimelineQuery};
use tank_inventory::domain::enums::MovementType;
use tank_inventory::domain::value_objects::PropertyValue;
use tankfarm_domain_core::Volume;

#[tokio::test]
async fn test_completed_receive_applies_once() {
    let service = service();
    let tank = create_tank(&service, "T-1", 100.0, vec![PropertyValue::known("visc", 10.0)]).await;

    let mut cmd = CreateMovementCommand::new(MovementType::Receive, 100.0)
        .to_tank(tank.id.clone())
        .completed_at(day(2));
    cmd.properties = vec![PropertyValue::known("visc", 20.0)];
    let movement = service.create_movement(cmd).await.unwrap();
    assert!(movement.is_completed());

    let after_create = service.get_tank(&tank.id).await.unwrap();
    assert_eq!(after_create.current_volume, Volume::new(200.0));
    assert_eq!(after_create.properties, vec![PropertyValue::known("visc", 15.0)]);

    // 与完成无关的修改不会重复应用
    let mut update = UpdateMovementCommand::new(movement.id.clone());
    update.notes = Some("ticket scanned".to_string());
    service.update_movement(update).await.unwrap();

    let after_update = service.get_tank(&tank.id).await.unwrap();
    assert_eq!(after_update.current_volume, Volume::new(200.0));
    assert_eq!(after_update.properties, after_create.properties);
}

#[tokio::test]
async fn test_completed_ship_over_capacity_is_rejected() {
    let service = service();
    let tank = create_tank(&service, "T-1", 100.0, vec![]).await;

    let cmd = CreateMovementCommand::new(MovementType::Ship, 150.0)
        .from_tank(tank.id.clone())
        .completed_at(day(2));
    let err = service.create_movement(cmd).await.unwrap_err();

    assert_eq!(err.status_code(), 400);
    let errors = err.field_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "expectedVolume");
    assert!(errors[0].message.contains("100.0"));
    assert!(errors[0].message.contains("150.0"));

    // 被拒绝的请求不落库、不改储罐
    assert!(service.list_movements(ListMovementsQuery::all()).await.unwrap().is_empty());
    assert_eq!(
        service.get_tank(&tank.id).await.unwrap().current_volume,
        Volume::new(100.0)
    );
}

#[tokio::test]
async fn test_scheduled_ship_bypasses_capacity_and_clamps_on_completion() {
    let service = service();
    let tank = create_tank(&service, "T-1", 100.0, vec![]).await;

    let cmd = CreateMovementCommand::new(MovementType::Ship, 150.0)
        .from_tank(tank.id.clone())
        .scheduled_for(day(3));
    let movement = service.create_movement(cmd).await.unwrap();
    assert!(!movement.is_completed());
    assert_eq!(
        service.get_tank(&tank.id).await.unwrap().current_volume,
        Volume::new(100.0)
    );

    // 完成时不再校验容量，体积截断到 0
    let mut update = UpdateMovementCommand::new(movement.id.clone());
    update.date = Some(day(3));
    let completed = service.update_movement(update).await.unwrap();

    assert!(completed.is_completed());
    assert_eq!(service.get_tank(&tank.id).await.unwrap().current_volume, Volume::ZERO);
}

#[tokio::test]
async fn test_date_correction_does_not_reapply() {
    let service = service();
    let tank = create_tank(&service, "T-1", 50.0, vec![]).await;

    let cmd = CreateMovementCommand::new(MovementType::Ship, 20.0)
        .from_tank(tank.id.clone())
        .completed_at(day(2));
    let movement = service.create_movement(cmd).await.unwrap();

    let mut update = UpdateMovementCommand::new(movement.id.clone());
    update.date = Some(day(4));
    let corrected = service.update_movement(update).await.unwrap();

    assert_eq!(corrected.date(), Some(day(4)));
    assert_eq!(
        service.get_tank(&tank.id).await.unwrap().current_volume,
        Volume::new(30.0)
    );
}

#[tokio::test]
async fn test_all_violations_reported_together() {
    let service = service();
    let tank = create_tank(&service, "T-1", 10.0, vec![]).await;

    let cmd = CreateMovementCommand::new(MovementType::Transfer, 0.0).from_tank(tank.id.clone());
    let err = service.create_movement(cmd).await.unwrap_err();

    let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["expectedVolume", "destinationTankId"]);
}

#[tokio::test]
async fn test_transfer_to_same_tank_rejected_on_update() {
    let service = service();
    let a = create_tank(&service, "T-A", 10.0, vec![]).await;
    let b = create_tank(&service, "T-B", 10.0, vec![]).await;

    let cmd = CreateMovementCommand::new(MovementType::Transfer, 5.0)
        .from_tank(a.id.clone())
        .to_tank(b.id.clone())
        .scheduled_for(day(5));
    let movement = service.create_movement(cmd).await.unwrap();

    let mut update = UpdateMovementCommand::new(movement.id.clone());
    update.destination_tank_id = Some(a.id.clone());
    let err = service.update_movement(update).await.unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert_eq!(
        err.field_errors()[0].message,
        "Source and destination tanks must be different"
    );
    let stored = service.get_movement(&movement.id).await.unwrap();
    assert_eq!(stored.destination_tank_id, Some(b.id));
}

#[tokio::test]
async fn test_transfer_moves_source_composition() {
    let service = service();
    let a = create_tank(&service, "T-A", 100.0, vec![PropertyValue::known("sulfur", 2.0)]).await;
    let b = create_tank(&service, "T-B", 100.0, vec![PropertyValue::known("sulfur", 1.0)]).await;

    let cmd = CreateMovementCommand::new(MovementType::Transfer, 100.0)
        .from_tank(a.id.clone())
        .to_tank(b.id.clone())
        .completed_at(day(1));
    service.create_movement(cmd).await.unwrap();

    let a = service.get_tank(&a.id).await.unwrap();
    let b = service.get_tank(&b.id).await.unwrap();
    assert_eq!(a.current_volume, Volume::ZERO);
    assert_eq!(a.properties, vec![PropertyValue::known("sulfur", 2.0)]);
    assert_eq!(b.current_volume, Volume::new(200.0));
    assert_eq!(b.properties, vec![PropertyValue::known("sulfur", 1.5)]);
}

#[tokio::test]
async fn test_deleting_movement_keeps_tank_effects() {
    let service = service();
    let tank = create_tank(&service, "T-1", 0.0, vec![]).await;

    let cmd = CreateMovementCommand::new(MovementType::Receive, 40.0)
        .to_tank(tank.id.clone())
        .completed_at(day(1));
    let movement = service.create_movement(cmd).await.unwrap();

    service
        .delete_movement(DeleteMovementCommand {
            movement_id: movement.id.clone(),
            user_id: Default::default(),
        })
        .await
        .unwrap();

    assert_eq!(service.get_movement(&movement.id).await.unwrap_err().status_code(), 404);
    assert_eq!(
        service.get_tank(&tank.id).await.unwrap().current_volume,
        Volume::new(40.0)
    );
}

#[tokio::test]
async fn test_completion_tolerates_deleted_tank() {
    let service = service();
    let a = create_tank(&service, "T-A", 100.0, vec![]).await;
    let b = create_tank(&service, "T-B", 0.0, vec![]).await;

    let cmd = CreateMovementCommand::new(MovementType::Transfer, 30.0)
        .from_tank(a.id.clone())
        .to_tank(b.id.clone())
        .scheduled_for(day(2));
    let movement = service.create_movement(cmd).await.unwrap();

    service
        .delete_tank(DeleteTankCommand {
            tank_id: a.id.clone(),
            user_id: Default::default(),
        })
        .await
        .unwrap();

    let mut update = UpdateMovementCommand::new(movement.id.clone());
    update.date = Some(day(2));
    service.update_movement(update).await.unwrap();

    assert_eq!(service.list_tanks().await.unwrap().len(), 1);
    assert_eq!(service.get_tank(&b.id).await.unwrap().current_volume, Volume::new(30.0));
}

#[tokio::test]
async fn test_list_movements_filters_by_tank_newest_first() {
    let service = service();
    let a = create_tank(&service, "T-A", 100.0, vec![]).await;
    let b = create_tank(&service, "T-B", 100.0, vec![]).await;

    for (tank, on) in [(&a, day(1)), (&b, day(2)), (&a, day(3))] {
        let cmd = CreateMovementCommand::new(MovementType::Receive, 1.0)
            .to_tank(tank.id.clone())
            .scheduled_for(on);
        service.create_movement(cmd).await.unwrap();
    }

    let for_a = service
        .list_movements(ListMovementsQuery::for_tank(a.id.clone()))
        .await
        .unwrap();
    let dates: Vec<_> = for_a.iter().map(|m| m.scheduled_date()).collect();
    assert_eq!(dates, vec![day(3), day(1)]);

    assert_eq!(service.list_movements(ListMovementsQuery::all()).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_projection_reads_without_writing() {
    let service = service();
    let tank = create_tank(&service, "T-1", 100.0, vec![PropertyValue::known("visc", 10.0)]).await;

    let mut receive = CreateMovementCommand::new(MovementType::Receive, 100.0)
        .to_tank(tank.id.clone())
        .scheduled_for(day(5));
    receive.properties = vec![PropertyValue::known("visc", 30.0)];
    service.create_movement(receive).await.unwrap();

    let ship = CreateMovementCommand::new(MovementType::Ship, 50.0)
        .from_tank(tank.id.clone())
        .scheduled_for(day(6));
    service.create_movement(ship).await.unwrap();

    let first = service.project_tank(&tank.id).await.unwrap();
    let second = service.project_tank(&tank.id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.pending_movements, 2);
    assert_eq!(first.current_volume, Volume::new(100.0));
    assert_eq!(first.projected_volume, Volume::new(150.0));
    assert_eq!(first.properties, vec![PropertyValue::known("visc", 20.0)]);
    assert_eq!(service.get_tank(&tank.id).await.unwrap(), tank);

    let all = service.project_all().await.unwrap();
    assert_eq!(all, vec![first]);
}

#[tokio::test]
async fn test_level_timeline_within_horizon() {
    let service = service();
    let tank = create_tank(&service, "T-1", 10.0, vec![]).await;

    let soon = CreateMovementCommand::new(MovementType::Receive, 5.0)
        .to_tank(tank.id.clone())
        .scheduled_for(Utc::now() + Duration::days(2));
    service.create_movement(soon).await.unwrap();

    let later = CreateMovementCommand::new(MovementType::Receive, 5.0)
        .to_tank(tank.id.clone())
        .scheduled_for(Utc::now() + Duration::days(60));
    service.create_movement(later).await.unwrap();

    let timeline = service
        .tank_level_timeline(TankTimelineQuery {
            tank_id: tank.id.clone(),
            horizon_days: Some(7),
        })
        .await
        .unwrap();

    assert_eq!(timeline.horizon_days, 7);
    let volumes: Vec<f64> = timeline.points.iter().map(|p| p.volume.value()).collect();
    assert_eq!(volumes, vec![10.0, 15.0, 15.0]);
    assert_eq!(timeline.points[1].volume_change, 5.0);
}
