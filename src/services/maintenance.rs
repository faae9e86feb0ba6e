//! Maintenance service
//!
//! Logging services performed on a car, managing a car's custom maintenance
//! types, and asking the due calculator what comes next.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::due::{self, DueMaintenance, ScheduleEntry};
use crate::error::{MileMarkError, MileMarkResult};
use crate::models::{Car, CarId, MaintenanceKind, MaintenanceRecord, MaintenanceType};

use super::ServiceContext;

/// Service for maintenance history and maintenance types
pub struct MaintenanceService<'a> {
    ctx: ServiceContext<'a>,
}

impl<'a> MaintenanceService<'a> {
    /// Create a new maintenance service
    pub fn new(ctx: ServiceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Default catalog types followed by the car's custom types
    pub fn applicable_types(
        &self,
        car_id: CarId,
    ) -> MileMarkResult<Vec<(MaintenanceKind, MaintenanceType)>> {
        let (_, car) = self.ctx.owned_car(car_id)?;
        let defaults = self.ctx.store.default_maintenance_types()?;
        Ok(car
            .applicable_types(&defaults)
            .map(|(kind, t)| (kind, t.clone()))
            .collect())
    }

    /// Append a maintenance record to a car's history
    ///
    /// The type must be applicable to the car. Mileage defaults to the car's
    /// current odometer reading and the date to now.
    pub fn log(
        &self,
        car_id: CarId,
        type_name: &str,
        mileage: Option<u32>,
        date: Option<DateTime<Utc>>,
    ) -> MileMarkResult<MaintenanceRecord> {
        let (user, mut car) = self.ctx.owned_car(car_id)?;
        let defaults = self.ctx.store.default_maintenance_types()?;
        let type_name = type_name.trim();

        let canonical = car
            .find_type(&defaults, type_name)
            .map(|(_, t)| t.name.clone())
            .ok_or_else(|| MileMarkError::maintenance_type_not_found(type_name))?;

        let record = MaintenanceRecord::new(
            canonical,
            mileage.unwrap_or(car.mileage),
            date.unwrap_or_else(Utc::now),
        );
        car.log_maintenance(record.clone());

        self.ctx.store.put_car(car.clone())?;
        self.ctx.record(
            user,
            AuditEntry::create(
                EntityType::MaintenanceRecord,
                car.id.to_string(),
                Some(format!("{} on {}", record.maintenance_type, car.full_name())),
                &record,
            ),
        )?;
        info!(
            car = %car.id,
            maintenance = %record.maintenance_type,
            mileage = record.mileage,
            "maintenance logged"
        );

        Ok(record)
    }

    /// Define a maintenance type for one car
    pub fn add_custom_type(
        &self,
        car_id: CarId,
        name: &str,
        interval: u32,
    ) -> MileMarkResult<MaintenanceType> {
        let (user, mut car) = self.ctx.owned_car(car_id)?;
        let defaults = self.ctx.store.default_maintenance_types()?;

        let maintenance_type = MaintenanceType::new(name.trim(), interval);
        maintenance_type
            .validate()
            .map_err(|e| MileMarkError::Validation(e.to_string()))?;

        if car.find_type(&defaults, &maintenance_type.name).is_some() {
            return Err(MileMarkError::Duplicate {
                entity_type: "Maintenance type",
                identifier: maintenance_type.name,
            });
        }

        car.custom_maintenance.push(maintenance_type.clone());
        car.updated_at = Utc::now();

        self.ctx.store.put_car(car.clone())?;
        self.ctx.record(
            user,
            AuditEntry::create(
                EntityType::MaintenanceType,
                car.id.to_string(),
                Some(format!("{} on {}", maintenance_type.name, car.full_name())),
                &maintenance_type,
            ),
        )?;
        info!(car = %car.id, maintenance = %maintenance_type.name, "custom type added");

        Ok(maintenance_type)
    }

    /// Rename a custom type and/or change its interval
    ///
    /// Default catalog types cannot be edited. Past records keep the name
    /// they were logged under.
    pub fn update_custom_type(
        &self,
        car_id: CarId,
        current_name: &str,
        new_name: Option<&str>,
        interval: Option<u32>,
    ) -> MileMarkResult<MaintenanceType> {
        let (user, mut car) = self.ctx.owned_car(car_id)?;
        let defaults = self.ctx.store.default_maintenance_types()?;
        let index = self.custom_index(&car, &defaults, current_name)?;

        let before = car.custom_maintenance[index].clone();
        let mut updated = before.clone();
        if let Some(name) = new_name {
            updated.name = name.trim().to_string();
        }
        if let Some(interval) = interval {
            updated.interval = interval;
        }
        updated
            .validate()
            .map_err(|e| MileMarkError::Validation(e.to_string()))?;

        // The new name may only collide with the type being edited
        let clash = car.applicable_types(&defaults).any(|(kind, t)| {
            t.matches_name(&updated.name) && !(kind == MaintenanceKind::Custom && *t == before)
        });
        if clash {
            return Err(MileMarkError::Duplicate {
                entity_type: "Maintenance type",
                identifier: updated.name,
            });
        }

        car.custom_maintenance[index] = updated.clone();
        car.updated_at = Utc::now();

        self.ctx.store.put_car(car.clone())?;
        self.ctx.record(
            user,
            AuditEntry::update(
                EntityType::MaintenanceType,
                car.id.to_string(),
                Some(format!("{} on {}", updated.name, car.full_name())),
                &before,
                &updated,
                Some(format!(
                    "{} ({} mi) -> {} ({} mi)",
                    before.name, before.interval, updated.name, updated.interval
                )),
            ),
        )?;
        info!(car = %car.id, maintenance = %updated.name, "custom type updated");

        Ok(updated)
    }

    /// Remove a custom type; its logged records stay in the history
    pub fn remove_custom_type(&self, car_id: CarId, name: &str) -> MileMarkResult<MaintenanceType> {
        let (user, mut car) = self.ctx.owned_car(car_id)?;
        let defaults = self.ctx.store.default_maintenance_types()?;
        let index = self.custom_index(&car, &defaults, name)?;

        let removed = car.custom_maintenance.remove(index);
        car.updated_at = Utc::now();

        self.ctx.store.put_car(car.clone())?;
        self.ctx.record(
            user,
            AuditEntry::delete(
                EntityType::MaintenanceType,
                car.id.to_string(),
                Some(format!("{} on {}", removed.name, car.full_name())),
                &removed,
            ),
        )?;
        info!(car = %car.id, maintenance = %removed.name, "custom type removed");

        Ok(removed)
    }

    /// A car's maintenance history, highest mileage first
    pub fn history(&self, car_id: CarId) -> MileMarkResult<Vec<MaintenanceRecord>> {
        let (_, car) = self.ctx.owned_car(car_id)?;
        Ok(car.history_by_mileage().into_iter().cloned().collect())
    }

    /// The nearest maintenance task for a car
    pub fn next_due(&self, car_id: CarId) -> MileMarkResult<Option<DueMaintenance>> {
        let (_, car) = self.ctx.owned_car(car_id)?;
        let defaults = self.ctx.store.default_maintenance_types()?;
        Ok(due::next_due_maintenance(&car, &defaults))
    }

    /// Due status of every applicable type for a car
    pub fn schedule(&self, car_id: CarId) -> MileMarkResult<Vec<ScheduleEntry>> {
        let (_, car) = self.ctx.owned_car(car_id)?;
        let defaults = self.ctx.store.default_maintenance_types()?;
        Ok(due::maintenance_schedule(&car, &defaults))
    }

    fn custom_index(
        &self,
        car: &Car,
        defaults: &[MaintenanceType],
        name: &str,
    ) -> MileMarkResult<usize> {
        let name = name.trim();
        if let Some(index) = car.custom_type_index(name) {
            return Ok(index);
        }
        if defaults.iter().any(|t| t.matches_name(name)) {
            return Err(MileMarkError::Validation(format!(
                "'{}' is a default maintenance type and cannot be changed",
                name
            )));
        }
        Err(MileMarkError::maintenance_type_not_found(name))
    }
}
