//! Business logic handler

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tankfarm_domain_core::{Entity, Volume, find_entity, position_of};
use tankfarm_errors::{AppResult, FieldError};
use tankfarm_ports::{
    AuditAction, AuditEntityType, AuditLogEntry, AuditLogFilter, CollectionStore,
};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::domain::entities::{
    CompletedMovement, DEFAULT_PRODUCT, Movement, PropertyDefinition, Tank, User,
};
use crate::domain::enums::Completion;
use crate::domain::services::{AppliedEffect, MovementValidator, ProjectionEngine, TankMutator};
use crate::domain::value_objects::{MovementId, TankId};
use crate::error::InventoryError;
use crate::infrastructure::observability::metrics;

use super::audit::{AuditRecord, AuditRecorder};
use super::commands::*;
use super::queries::*;

/// 默认预测窗口（天）
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

pub struct InventoryService {
    tanks: Arc<dyn CollectionStore<Tank>>,
    movements: Arc<dyn CollectionStore<Movement>>,
    properties: Arc<dyn CollectionStore<PropertyDefinition>>,
    users: Arc<dyn CollectionStore<User>>,
    audit: AuditRecorder,
    /// 全局单写者：所有读改写在此锁下串行执行
    write_lock: Mutex<()>,
    horizon_days: u32,
}

impl InventoryService {
    pub fn new(
        tanks: Arc<dyn CollectionStore<Tank>>,
        movements: Arc<dyn CollectionStore<Movement>>,
        properties: Arc<dyn CollectionStore<PropertyDefinition>>,
        users: Arc<dyn CollectionStore<User>>,
        audit: AuditRecorder,
    ) -> Self {
        Self {
            tanks,
            movements,
            properties,
            users,
            audit,
            write_lock: Mutex::new(()),
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    pub fn with_horizon_days(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    // ========== 储罐 ==========

    /// 创建储罐
    pub async fn create_tank(&self, cmd: CreateTankCommand) -> AppResult<Tank> {
        cmd.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut tanks = self.tanks.read().await?;

        let name = cmd.name.trim();
        if tanks.iter().any(|t| t.has_name(name)) {
            return Err(InventoryError::DuplicateTankName(name.to_string()).into());
        }

        let tank = Tank::new(
            name,
            text_or(cmd.product.as_deref(), DEFAULT_PRODUCT),
            text_or(cmd.location.as_deref(), ""),
            Volume::new(cmd.current_volume.unwrap_or(0.0)),
            cmd.properties,
            Utc::now(),
        );

        tanks.push(tank.clone());
        self.tanks.write(&tanks).await?;

        info!(tank_id = %tank.id, name = %tank.name, volume = tank.current_volume.value(), "Tank created");
        self.audit
            .record(
                AuditRecord::new(
                    AuditAction::Create,
                    AuditEntityType::Tank,
                    tank.id.as_str(),
                    &cmd.user_id,
                ),
                None,
                Some(&tank),
            )
            .await;

        Ok(tank)
    }

    /// 获取储罐
    pub async fn get_tank(&self, tank_id: &TankId) -> AppResult<Tank> {
        let tanks = self.tanks.read().await?;
        find_entity(&tanks, tank_id)
            .cloned()
            .ok_or_else(|| InventoryError::TankNotFound(tank_id.clone()).into())
    }

    pub async fn list_tanks(&self) -> AppResult<Vec<Tank>> {
        self.tanks.read().await
    }

    /// 编辑储罐
    pub async fn update_tank(&self, cmd: UpdateTankCommand) -> AppResult<Tank> {
        cmd.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut tanks = self.tanks.read().await?;
        let index = locate(&tanks, &cmd.tank_id, || {
            InventoryError::TankNotFound(cmd.tank_id.clone())
        })?;

        if let Some(name) = &cmd.name {
            let name = name.trim();
            let taken = tanks
                .iter()
                .any(|t| t.id != cmd.tank_id && t.has_name(name));
            if taken {
                return Err(InventoryError::DuplicateTankName(name.to_string()).into());
            }
        }

        let old = tanks[index].clone();
        let tank = &mut tanks[index];
        if let Some(name) = &cmd.name {
            tank.name = name.trim().to_string();
        }
        if let Some(product) = &cmd.product {
            tank.product = text_or(Some(product.as_str()), DEFAULT_PRODUCT);
        }
        if let Some(location) = &cmd.location {
            tank.location = location.trim().to_string();
        }
        if let Some(volume) = cmd.current_volume {
            tank.current_volume = Volume::new(volume);
        }
        if let Some(properties) = &cmd.properties {
            tank.properties = properties.clone();
        }
        tank.touch(Utc::now());
        let updated = tank.clone();

        self.tanks.write(&tanks).await?;

        info!(tank_id = %updated.id, "Tank updated");
        self.audit
            .record(
                AuditRecord::new(
                    AuditAction::Update,
                    AuditEntityType::Tank,
                    updated.id.as_str(),
                    &cmd.user_id,
                ),
                Some(&old),
                Some(&updated),
            )
            .await;

        Ok(updated)
    }

    /// 以实测值重置储罐
    pub async fn reset_tank(&self, cmd: ResetTankCommand) -> AppResult<Tank> {
        cmd.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut tanks = self.tanks.read().await?;
        let index = locate(&tanks, &cmd.tank_id, || {
            InventoryError::TankNotFound(cmd.tank_id.clone())
        })?;

        let old = tanks[index].clone();
        tanks[index].reset(Volume::new(cmd.volume), cmd.properties, Utc::now());
        let updated = tanks[index].clone();

        self.tanks.write(&tanks).await?;

        info!(tank_id = %updated.id, volume = cmd.volume, "Tank reset from measurement");
        self.audit
            .record(
                AuditRecord::new(
                    AuditAction::Reset,
                    AuditEntityType::Tank,
                    updated.id.as_str(),
                    &cmd.user_id,
                )
                .described("Tank values reset from measurement"),
                Some(&old),
                Some(&updated),
            )
            .await;

        Ok(updated)
    }

    /// 删除储罐
    ///
    /// 引用它的移库单保留不动，之后按悬空引用处理
    pub async fn delete_tank(&self, cmd: DeleteTankCommand) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut tanks = self.tanks.read().await?;
        let index = locate(&tanks, &cmd.tank_id, || {
            InventoryError::TankNotFound(cmd.tank_id.clone())
        })?;

        let deleted = tanks.remove(index);
        self.tanks.write(&tanks).await?;

        info!(tank_id = %deleted.id, "Tank deleted");
        self.audit
            .record(
                AuditRecord::new(
                    AuditAction::Delete,
                    AuditEntityType::Tank,
                    deleted.id.as_str(),
                    &cmd.user_id,
                ),
                Some(&deleted),
                None,
            )
            .await;

        Ok(())
    }

    // ========== 属性定义 ==========

    /// 创建属性定义
    pub async fn create_property(&self, cmd: CreatePropertyCommand) -> AppResult<PropertyDefinition> {
        cmd.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut properties = self.properties.read().await?;

        let name = cmd.name.trim();
        if properties.iter().any(|p| p.has_name(name)) {
            return Err(InventoryError::DuplicatePropertyName(name.to_string()).into());
        }

        let property =
            PropertyDefinition::new(name, text_or(cmd.unit.as_deref(), ""), Utc::now());
        properties.push(property.clone());
        self.properties.write(&properties).await?;

        info!(property_id = %property.id, name = %property.name, "Property created");
        self.audit
            .record(
                AuditRecord::new(
                    AuditAction::Create,
                    AuditEntityType::Property,
                    property.id.as_str(),
                    &cmd.user_id,
                ),
                None,
                Some(&property),
            )
            .await;

        Ok(property)
    }

    pub async fn list_properties(&self) -> AppResult<Vec<PropertyDefinition>> {
        self.properties.read().await
    }

    /// 编辑属性定义
    pub async fn update_property(&self, cmd: UpdatePropertyCommand) -> AppResult<PropertyDefinition> {
        cmd.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut properties = self.properties.read().await?;
        let index = locate(&properties, &cmd.property_id, || {
            InventoryError::PropertyNotFound(cmd.property_id.clone())
        })?;

        if let Some(name) = &cmd.name {
            let name = name.trim();
            let taken = properties
                .iter()
                .any(|p| p.id != cmd.property_id && p.has_name(name));
            if taken {
                return Err(InventoryError::DuplicatePropertyName(name.to_string()).into());
            }
        }

        let old = properties[index].clone();
        let property = &mut properties[index];
        if let Some(name) = &cmd.name {
            property.name = name.trim().to_string();
        }
        if let Some(unit) = &cmd.unit {
            property.unit = unit.trim().to_string();
        }
        let updated = property.clone();

        self.properties.write(&properties).await?;

        info!(property_id = %updated.id, "Property updated");
        self.audit
            .record(
                AuditRecord::new(
                    AuditAction::Update,
                    AuditEntityType::Property,
                    updated.id.as_str(),
                    &cmd.user_id,
                ),
                Some(&old),
                Some(&updated),
            )
            .await;

        Ok(updated)
    }

    /// 删除属性定义（储罐和移库单中的属性值快照不受影响）
    pub async fn delete_property(&self, cmd: DeletePropertyCommand) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut properties = self.properties.read().await?;
        let index = locate(&properties, &cmd.property_id, || {
            InventoryError::PropertyNotFound(cmd.property_id.clone())
        })?;

        let deleted = properties.remove(index);
        self.properties.write(&properties).await?;

        info!(property_id = %deleted.id, "Property deleted");
        self.audit
            .record(
                AuditRecord::new(
                    AuditAction::Delete,
                    AuditEntityType::Property,
                    deleted.id.as_str(),
                    &cmd.user_id,
                ),
                Some(&deleted),
                None,
            )
            .await;

        Ok(())
    }

    // ========== 移库单 ==========

    /// 创建移库单
    ///
    /// 带执行日期的移库单创建即完成，储罐效果在此应用一次
    pub async fn create_movement(&self, cmd: CreateMovementCommand) -> AppResult<Movement> {
        let now = Utc::now();
        let mut violations = cmd.violations();
        let movement = cmd.into_movement(now);

        let _guard = self.write_lock.lock().await;
        let mut tanks = self.tanks.read().await?;

        violations.extend(MovementValidator::validate(&movement, &tanks));
        reject_if_any("create_movement", violations)?;

        let mut movements = self.movements.read().await?;
        movements.push(movement.clone());
        self.movements.write(&movements).await?;

        if let Some(completed) = movement.as_completed() {
            if let Err(e) = self.apply_completed(completed, &mut tanks, now).await {
                movements.pop();
                self.restore_movements(&movements, &movement.id).await;
                return Err(e);
            }
        }
        metrics::record_movement_created(movement.movement_type, movement.is_completed());

        info!(
            movement_id = %movement.id,
            movement_type = %movement.movement_type,
            completed = movement.is_completed(),
            volume = movement.effective_volume().value(),
            "Movement created"
        );
        self.audit
            .record(
                AuditRecord::new(
                    AuditAction::Create,
                    AuditEntityType::Movement,
                    movement.id.as_str(),
                    &movement.created_by,
                ),
                None,
                Some(&movement),
            )
            .await;

        Ok(movement)
    }

    /// 获取移库单
    pub async fn get_movement(&self, movement_id: &MovementId) -> AppResult<Movement> {
        let movements = self.movements.read().await?;
        find_entity(&movements, movement_id)
            .cloned()
            .ok_or_else(|| InventoryError::MovementNotFound(movement_id.clone()).into())
    }

    /// 移库单列表，按计划日期倒序
    pub async fn list_movements(&self, query: ListMovementsQuery) -> AppResult<Vec<Movement>> {
        let mut movements = self.movements.read().await?;
        if let Some(tank_id) = &query.tank_id {
            movements.retain(|m| m.involves(tank_id));
        }
        movements.sort_by(|a, b| b.scheduled_date().cmp(&a.scheduled_date()));
        Ok(movements)
    }

    /// 编辑移库单
    ///
    /// 对计划中的移库单赋予日期会触发唯一一次完成迁移并应用储罐效果；
    /// 已完成的移库单只更正日期，不会重复应用
    pub async fn update_movement(&self, cmd: UpdateMovementCommand) -> AppResult<Movement> {
        let mut violations = cmd.violations();

        let _guard = self.write_lock.lock().await;
        let mut movements = self.movements.read().await?;
        let index = locate(&movements, &cmd.movement_id, || {
            InventoryError::MovementNotFound(cmd.movement_id.clone())
        })?;

        let old = movements[index].clone();
        let mut updated = old.clone();
        cmd.merge_into(&mut updated);

        // 只复核引用关系；容量只在创建时校验
        violations.extend(MovementValidator::validate_references(&updated));
        reject_if_any("update_movement", violations)?;

        let transitioned = cmd
            .date
            .is_some_and(|date| updated.complete(date) == Completion::Transitioned);

        movements[index] = updated.clone();
        self.movements.write(&movements).await?;

        if transitioned {
            if let Some(completed) = updated.as_completed() {
                let applied = match self.tanks.read().await {
                    Ok(mut tanks) => self.apply_completed(completed, &mut tanks, Utc::now()).await,
                    Err(e) => Err(e),
                };
                if let Err(e) = applied {
                    movements[index] = old;
                    self.restore_movements(&movements, &updated.id).await;
                    return Err(e);
                }
            }
        }

        info!(movement_id = %updated.id, transitioned, "Movement updated");
        self.audit
            .record(
                AuditRecord::new(
                    AuditAction::Update,
                    AuditEntityType::Movement,
                    updated.id.as_str(),
                    &cmd.user_id,
                ),
                Some(&old),
                Some(&updated),
            )
            .await;

        Ok(updated)
    }

    /// 删除移库单
    ///
    /// 已应用的储罐效果不会回滚
    pub async fn delete_movement(&self, cmd: DeleteMovementCommand) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut movements = self.movements.read().await?;
        let index = locate(&movements, &cmd.movement_id, || {
            InventoryError::MovementNotFound(cmd.movement_id.clone())
        })?;

        let deleted = movements.remove(index);
        self.movements.write(&movements).await?;

        info!(movement_id = %deleted.id, completed = deleted.is_completed(), "Movement deleted");
        self.audit
            .record(
                AuditRecord::new(
                    AuditAction::Delete,
                    AuditEntityType::Movement,
                    deleted.id.as_str(),
                    &cmd.user_id,
                ),
                Some(&deleted),
                None,
            )
            .await;

        Ok(())
    }

    // ========== 预测 ==========

    /// 单个储罐的预测状态
    pub async fn project_tank(&self, tank_id: &TankId) -> AppResult<TankProjection> {
        let tank = self.get_tank(tank_id).await?;
        let movements = self.movements.read().await?;
        Ok(projection_of(&tank, &movements))
    }

    /// 全部储罐的预测状态
    pub async fn project_all(&self) -> AppResult<Vec<TankProjection>> {
        let tanks = self.tanks.read().await?;
        let movements = self.movements.read().await?;
        Ok(tanks.iter().map(|t| projection_of(t, &movements)).collect())
    }

    /// 液位曲线
    pub async fn tank_level_timeline(&self, query: TankTimelineQuery) -> AppResult<TankTimeline> {
        let tank = self.get_tank(&query.tank_id).await?;
        let movements = self.movements.read().await?;
        let horizon_days = query.horizon_days.unwrap_or(self.horizon_days);

        Ok(TankTimeline {
            points: ProjectionEngine::level_timeline(&tank, &movements, Utc::now(), horizon_days),
            tank_id: tank.id,
            horizon_days,
        })
    }

    // ========== 用户 ==========

    /// 用户目录（只读）
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.read().await
    }

    // ========== 审计 ==========

    pub async fn list_audit_log(&self, filter: AuditLogFilter) -> AppResult<Vec<AuditLogEntry>> {
        self.audit.query(filter).await
    }

    /// 应用已完成移库单并持久化储罐集合
    async fn apply_completed(
        &self,
        completed: CompletedMovement<'_>,
        tanks: &mut [Tank],
        now: DateTime<Utc>,
    ) -> AppResult<AppliedEffect> {
        let effect = TankMutator::apply(completed, tanks, now);

        if effect.is_empty() {
            warn!(movement_id = %completed.id, "Completed movement references no existing tank");
            return Ok(effect);
        }

        self.tanks.write(tanks).await?;
        metrics::record_movement_applied(completed.movement_type);
        info!(
            movement_id = %completed.id,
            completed_at = %completed.date(),
            drawn_from = ?effect.drawn_from,
            filled = ?effect.filled,
            "Movement applied to tanks"
        );

        Ok(effect)
    }

    /// 储罐写入失败后撤回移库单集合，使"已完成"始终意味着效果已应用
    async fn restore_movements(&self, movements: &[Movement], movement_id: &MovementId) {
        if let Err(e) = self.movements.write(movements).await {
            error!(
                movement_id = %movement_id,
                error = %e,
                "Failed to roll back movement after tank write failure"
            );
        }
    }
}

fn locate<T: Entity>(
    items: &[T],
    id: &T::Id,
    missing: impl FnOnce() -> InventoryError,
) -> AppResult<usize> {
    position_of(items, id).ok_or_else(|| missing().into())
}

fn reject_if_any(operation: &str, violations: Vec<FieldError>) -> AppResult<()> {
    if violations.is_empty() {
        return Ok(());
    }
    info!(operation, violations = violations.len(), "Request rejected by business rules");
    metrics::record_validation_rejection(operation);
    Err(InventoryError::Rejected(violations).into())
}

fn projection_of(tank: &Tank, movements: &[Movement]) -> TankProjection {
    let state = ProjectionEngine::project(tank, movements);
    TankProjection {
        tank_id: tank.id.clone(),
        tank_name: tank.name.clone(),
        current_volume: tank.current_volume,
        projected_volume: state.volume,
        properties: state.properties,
        pending_movements: ProjectionEngine::pending_for(&tank.id, movements).len(),
    }
}

/// 去掉首尾空白，空值取缺省
fn text_or(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}
