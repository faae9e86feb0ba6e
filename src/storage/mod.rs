//! Storage layer for MileMark
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. `Storage` is the local vehicle record store: cars (with their
//! history and custom types) plus the shared default catalog. Callers reach it
//! through the `VehicleStore` trait so another backend can stand in for it.

pub mod cars;
pub mod catalog;
pub mod file_io;
pub mod init;
pub mod reminders;
pub mod users;

pub use cars::CarRepository;
pub use catalog::CatalogRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{default_maintenance_types, initialize_storage};
pub use reminders::ReminderRepository;
pub use users::UserRepository;

use tracing::debug;

use crate::audit::AuditLogger;
use crate::config::paths::MileMarkPaths;
use crate::error::{MileMarkError, MileMarkResult};
use crate::models::{Car, CarId, MaintenanceType, UserId};

/// Record store for cars and the default maintenance catalog
///
/// Every query is scoped to the owning user: a car that belongs to someone
/// else is reported as absent.
pub trait VehicleStore {
    /// All cars owned by `owner`
    fn list_cars(&self, owner: UserId) -> MileMarkResult<Vec<Car>>;

    /// A single car, if it exists and belongs to `owner`
    fn get_car(&self, owner: UserId, id: CarId) -> MileMarkResult<Option<Car>>;

    /// Insert or replace a car and persist it
    fn put_car(&self, car: Car) -> MileMarkResult<()>;

    /// Delete a car owned by `owner`, returning it if it existed
    fn delete_car(&self, owner: UserId, id: CarId) -> MileMarkResult<Option<Car>>;

    /// The shared default maintenance types, in catalog order
    fn default_maintenance_types(&self) -> MileMarkResult<Vec<MaintenanceType>>;

    /// Append a type to the shared catalog and persist it
    fn add_default_maintenance_type(&self, maintenance_type: MaintenanceType) -> MileMarkResult<()>;

    /// Whether any car in the store, regardless of owner, has a custom type
    /// with this name (case-insensitive)
    ///
    /// The catalog is shared, so a new default type must not collide with a
    /// custom type anywhere.
    fn custom_type_in_use(&self, name: &str) -> MileMarkResult<bool>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: MileMarkPaths,
    pub cars: CarRepository,
    pub catalog: CatalogRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: MileMarkPaths) -> Result<Self, MileMarkError> {
        paths.ensure_directories()?;

        Ok(Self {
            cars: CarRepository::new(paths.cars_file()),
            catalog: CatalogRepository::new(paths.catalog_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// The audit log shared by all services
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), MileMarkError> {
        self.cars.load()?;
        self.catalog.load()?;
        debug!(base = %self.paths.base_dir().display(), "storage loaded");
        Ok(())
    }
}

impl VehicleStore for Storage {
    fn list_cars(&self, owner: UserId) -> MileMarkResult<Vec<Car>> {
        self.cars.get_by_owner(owner)
    }

    fn get_car(&self, owner: UserId, id: CarId) -> MileMarkResult<Option<Car>> {
        Ok(self.cars.get(id)?.filter(|car| car.owner_id == owner))
    }

    fn put_car(&self, car: Car) -> MileMarkResult<()> {
        self.cars.upsert(car)?;
        self.cars.save()
    }

    fn delete_car(&self, owner: UserId, id: CarId) -> MileMarkResult<Option<Car>> {
        if self.get_car(owner, id)?.is_none() {
            return Ok(None);
        }
        let removed = self.cars.delete(id)?;
        self.cars.save()?;
        Ok(removed)
    }

    fn default_maintenance_types(&self) -> MileMarkResult<Vec<MaintenanceType>> {
        self.catalog.get_all()
    }

    fn add_default_maintenance_type(&self, maintenance_type: MaintenanceType) -> MileMarkResult<()> {
        self.catalog.push(maintenance_type)?;
        self.catalog.save()
    }

    fn custom_type_in_use(&self, name: &str) -> MileMarkResult<bool> {
        self.cars.any_custom_type_named(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MileMarkPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.default_maintenance_types().unwrap().is_empty());
    }

    #[test]
    fn test_cars_are_scoped_to_owner() {
        let (_temp_dir, storage) = create_storage();
        let owner = UserId::new();
        let stranger = UserId::new();

        let car = Car::new(owner, "Honda", "Civic", "2020", 56_876);
        let id = car.id;
        storage.put_car(car).unwrap();

        assert!(storage.get_car(owner, id).unwrap().is_some());
        assert!(storage.get_car(stranger, id).unwrap().is_none());
        assert!(storage.list_cars(stranger).unwrap().is_empty());

        assert!(storage.delete_car(stranger, id).unwrap().is_none());
        assert!(storage.get_car(owner, id).unwrap().is_some());

        assert!(storage.delete_car(owner, id).unwrap().is_some());
        assert!(storage.list_cars(owner).unwrap().is_empty());
    }

    #[test]
    fn test_put_car_persists() {
        let (temp_dir, storage) = create_storage();
        let owner = UserId::new();
        let car = Car::new(owner, "Ford", "Focus", "2012", 140_000);
        let id = car.id;
        storage.put_car(car).unwrap();

        let paths = MileMarkPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        assert_eq!(reopened.get_car(owner, id).unwrap().unwrap().mileage, 140_000);
    }
}
