//! Car service
//!
//! Registering, editing and deleting cars, and recording odometer readings.
//! Adding or editing a car and changing its mileage each schedule a
//! "log your mileage" reminder.

use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{MileMarkError, MileMarkResult};
use crate::models::{Car, CarId};
use crate::notify::{mileage_reminder_body, MILEAGE_REMINDER_TITLE};

use super::ServiceContext;

/// Fields to change on an existing car; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct CarEdit {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub mileage: Option<u32>,
}

/// Service for car management
pub struct CarService<'a> {
    ctx: ServiceContext<'a>,
}

impl<'a> CarService<'a> {
    /// Create a new car service
    pub fn new(ctx: ServiceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Register a new car for the signed-in user
    pub fn add(&self, make: &str, model: &str, year: &str, mileage: u32) -> MileMarkResult<Car> {
        let user = self.ctx.require_user()?;

        let car = Car::new(user, make.trim(), model.trim(), year.trim(), mileage);
        car.validate()
            .map_err(|e| MileMarkError::Validation(e.to_string()))?;

        self.ctx.store.put_car(car.clone())?;
        self.ctx.record(
            user,
            AuditEntry::create(EntityType::Car, car.id.to_string(), Some(car.full_name()), &car),
        )?;
        info!(car = %car.id, name = %car.full_name(), "car added");

        self.schedule_mileage_reminder(&car)?;
        Ok(car)
    }

    /// Change a car's descriptive fields and/or mileage
    ///
    /// History and custom maintenance types are kept.
    pub fn edit(&self, id: CarId, edit: CarEdit) -> MileMarkResult<Car> {
        let (user, mut car) = self.ctx.owned_car(id)?;
        let before = car.clone();

        if let Some(make) = edit.make {
            car.make = make.trim().to_string();
        }
        if let Some(model) = edit.model {
            car.model = model.trim().to_string();
        }
        if let Some(year) = edit.year {
            car.year = year.trim().to_string();
        }
        if let Some(mileage) = edit.mileage {
            car.mileage = mileage;
        }
        car.validate()
            .map_err(|e| MileMarkError::Validation(e.to_string()))?;
        car.updated_at = chrono::Utc::now();

        self.ctx.store.put_car(car.clone())?;
        self.ctx.record(
            user,
            AuditEntry::update(
                EntityType::Car,
                car.id.to_string(),
                Some(car.full_name()),
                &before,
                &car,
                Some(describe_changes(&before, &car)),
            ),
        )?;
        info!(car = %car.id, "car edited");

        self.schedule_mileage_reminder(&car)?;
        Ok(car)
    }

    /// Record a new odometer reading
    pub fn update_mileage(&self, id: CarId, mileage: u32) -> MileMarkResult<Car> {
        let (user, mut car) = self.ctx.owned_car(id)?;
        let before = car.clone();

        car.set_mileage(mileage);

        self.ctx.store.put_car(car.clone())?;
        self.ctx.record(
            user,
            AuditEntry::update(
                EntityType::Car,
                car.id.to_string(),
                Some(car.full_name()),
                &before,
                &car,
                Some(format!("mileage: {} -> {}", before.mileage, car.mileage)),
            ),
        )?;
        info!(car = %car.id, mileage, "mileage updated");

        self.schedule_mileage_reminder(&car)?;
        Ok(car)
    }

    /// Delete a car along with its history and reminders
    pub fn delete(&self, id: CarId) -> MileMarkResult<Car> {
        let user = self.ctx.require_user()?;
        let car = self
            .ctx
            .store
            .delete_car(user, id)?
            .ok_or_else(|| MileMarkError::car_not_found(id.to_string()))?;

        self.ctx.reminders.cancel_for_car(car.id)?;
        self.ctx.record(
            user,
            AuditEntry::delete(EntityType::Car, car.id.to_string(), Some(car.full_name()), &car),
        )?;
        info!(car = %car.id, "car deleted");

        Ok(car)
    }

    /// All cars of the signed-in user
    pub fn list(&self) -> MileMarkResult<Vec<Car>> {
        let user = self.ctx.require_user()?;
        self.ctx.store.list_cars(user)
    }

    /// A car of the signed-in user by ID
    pub fn get(&self, id: CarId) -> MileMarkResult<Option<Car>> {
        let user = self.ctx.require_user()?;
        self.ctx.store.get_car(user, id)
    }

    /// Find a car by ID (full or short form) or by "make model" label
    pub fn find(&self, identifier: &str) -> MileMarkResult<Option<Car>> {
        let cars = self.list()?;

        if let Some(car) = cars.iter().find(|c| c.id.matches(identifier)) {
            return Ok(Some(car.clone()));
        }

        let mut by_label = cars.into_iter().filter(|c| c.matches_label(identifier));
        match (by_label.next(), by_label.next()) {
            (Some(car), None) => Ok(Some(car)),
            (Some(_), Some(_)) => Err(MileMarkError::Validation(format!(
                "'{}' matches more than one car; use the car ID instead",
                identifier
            ))),
            _ => Ok(None),
        }
    }

    /// Find a car or fail with `NotFound`
    pub fn resolve(&self, identifier: &str) -> MileMarkResult<Car> {
        self.find(identifier)?
            .ok_or_else(|| MileMarkError::car_not_found(identifier))
    }

    fn schedule_mileage_reminder(&self, car: &Car) -> MileMarkResult<()> {
        self.ctx.reminders.schedule(
            car.id,
            MILEAGE_REMINDER_TITLE,
            &mileage_reminder_body(car),
            self.ctx.settings.reminder_delay(),
        )?;
        Ok(())
    }
}

fn describe_changes(before: &Car, after: &Car) -> String {
    let mut changes = Vec::new();
    if before.make != after.make {
        changes.push(format!("make: {} -> {}", before.make, after.make));
    }
    if before.model != after.model {
        changes.push(format!("model: {} -> {}", before.model, after.model));
    }
    if before.year != after.year {
        changes.push(format!("year: {} -> {}", before.year, after.year));
    }
    if before.mileage != after.mileage {
        changes.push(format!("mileage: {} -> {}", before.mileage, after.mileage));
    }
    if changes.is_empty() {
        "no changes".to_string()
    } else {
        changes.join(", ")
    }
}
