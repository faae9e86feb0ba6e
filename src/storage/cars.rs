//! Car repository for JSON storage
//!
//! Manages loading and saving cars to cars.json. Each car carries its own
//! maintenance history and custom maintenance types.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::MileMarkError;
use crate::models::{Car, CarId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable car data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CarData {
    cars: Vec<Car>,
}

/// Repository for car persistence
pub struct CarRepository {
    path: PathBuf,
    data: RwLock<HashMap<CarId, Car>>,
}

impl CarRepository {
    /// Create a new car repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load cars from disk
    pub fn load(&self) -> Result<(), MileMarkError> {
        let file_data: CarData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for car in file_data.cars {
            data.insert(car.id, car);
        }

        debug!(count = data.len(), "loaded cars");
        Ok(())
    }

    /// Save cars to disk
    pub fn save(&self) -> Result<(), MileMarkError> {
        let data = self.data.read().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut cars: Vec<_> = data.values().cloned().collect();
        cars.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &CarData { cars })
    }

    /// Get a car by ID
    pub fn get(&self, id: CarId) -> Result<Option<Car>, MileMarkError> {
        let data = self.data.read().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all cars owned by a user, sorted by year, make and model
    pub fn get_by_owner(&self, owner: UserId) -> Result<Vec<Car>, MileMarkError> {
        let data = self.data.read().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut cars: Vec<_> = data
            .values()
            .filter(|c| c.owner_id == owner)
            .cloned()
            .collect();
        cars.sort_by(|a, b| {
            a.year
                .cmp(&b.year)
                .then_with(|| a.make.to_lowercase().cmp(&b.make.to_lowercase()))
                .then_with(|| a.model.to_lowercase().cmp(&b.model.to_lowercase()))
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(cars)
    }

    /// Whether any car, whoever owns it, defines a custom type with this name
    pub fn any_custom_type_named(&self, name: &str) -> Result<bool, MileMarkError> {
        let data = self.data.read().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .values()
            .any(|car| car.custom_type_index(name).is_some()))
    }

    /// Insert or update a car
    pub fn upsert(&self, car: Car) -> Result<(), MileMarkError> {
        let mut data = self.data.write().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(car.id, car);
        Ok(())
    }

    /// Delete a car, returning it if it existed
    pub fn delete(&self, id: CarId) -> Result<Option<Car>, MileMarkError> {
        let mut data = self.data.write().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id))
    }

    /// Count all cars
    pub fn count(&self) -> Result<usize, MileMarkError> {
        let data = self.data.read().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaintenanceRecord;
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CarRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cars.json");
        let repo = CarRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_get_by_owner_filters_and_sorts() {
        let (_temp_dir, repo) = create_test_repo();
        let alice = UserId::new();
        let bob = UserId::new();

        repo.upsert(Car::new(alice, "Toyota", "Camry", "2018", 90_000))
            .unwrap();
        repo.upsert(Car::new(alice, "Honda", "Civic", "2015", 120_000))
            .unwrap();
        repo.upsert(Car::new(bob, "Ford", "F-150", "2021", 30_000))
            .unwrap();

        let cars = repo.get_by_owner(alice).unwrap();
        let names: Vec<_> = cars.iter().map(|c| c.full_name()).collect();
        assert_eq!(names, vec!["2015 Honda Civic", "2018 Toyota Camry"]);
        assert_eq!(repo.get_by_owner(bob).unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_reload_keeps_history() {
        let (temp_dir, repo) = create_test_repo();

        let mut car = Car::new(UserId::new(), "Mazda", "3", "2019", 40_000);
        car.log_maintenance(MaintenanceRecord::new("Oil Change", 39_500, Utc::now()));
        let id = car.id;

        repo.upsert(car.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = CarRepository::new(temp_dir.path().join("cars.json"));
        repo2.load().unwrap();

        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded, car);
    }

    #[test]
    fn test_custom_type_lookup_spans_owners() {
        let (_temp_dir, repo) = create_test_repo();
        let mut car = Car::new(UserId::new(), "Jeep", "Wrangler", "2016", 70_000);
        car.custom_maintenance
            .push(crate::models::MaintenanceType::new("Winch Service", 10_000));
        repo.upsert(car).unwrap();
        repo.upsert(Car::new(UserId::new(), "Kia", "Rio", "2018", 1))
            .unwrap();

        assert!(repo.any_custom_type_named("winch service").unwrap());
        assert!(!repo.any_custom_type_named("Detailing").unwrap());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let car = Car::new(UserId::new(), "Subaru", "Outback", "2017", 80_000);
        let id = car.id;

        repo.upsert(car).unwrap();
        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
