//! Car model
//!
//! A car owns its append-only maintenance history and its custom maintenance
//! types. Default types live in the shared catalog and are always passed in
//! from outside.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CarId, UserId};
use super::maintenance::{MaintenanceKind, MaintenanceRecord, MaintenanceType};

/// A registered car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    /// Unique identifier
    pub id: CarId,

    /// The user account that registered the car
    pub owner_id: UserId,

    pub make: String,
    pub model: String,

    /// Model year, kept as entered
    pub year: String,

    /// Current odometer reading
    pub mileage: u32,

    /// Services performed, in the order they were logged
    #[serde(default)]
    pub maintenance_history: Vec<MaintenanceRecord>,

    /// Maintenance types defined for this car only
    #[serde(default)]
    pub custom_maintenance: Vec<MaintenanceType>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Car {
    /// Create a new car with an empty history
    pub fn new(
        owner_id: UserId,
        make: impl Into<String>,
        model: impl Into<String>,
        year: impl Into<String>,
        mileage: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: CarId::new(),
            owner_id,
            make: make.into(),
            model: model.into(),
            year: year.into(),
            mileage,
            maintenance_history: Vec::new(),
            custom_maintenance: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// "Make Model", as used in reminders
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    /// "Year Make Model"
    pub fn full_name(&self) -> String {
        if self.year.trim().is_empty() {
            self.display_name()
        } else {
            format!("{} {} {}", self.year, self.make, self.model)
        }
    }

    /// Check whether a user-typed label names this car
    pub fn matches_label(&self, label: &str) -> bool {
        let label = label.trim().to_lowercase();
        label == self.display_name().to_lowercase() || label == self.full_name().to_lowercase()
    }

    /// Set the odometer reading
    pub fn set_mileage(&mut self, mileage: u32) {
        self.mileage = mileage;
        self.updated_at = Utc::now();
    }

    /// Append a maintenance record
    pub fn log_maintenance(&mut self, record: MaintenanceRecord) {
        self.maintenance_history.push(record);
        self.updated_at = Utc::now();
    }

    /// Default types followed by this car's custom types
    pub fn applicable_types<'a>(
        &'a self,
        defaults: &'a [MaintenanceType],
    ) -> impl Iterator<Item = (MaintenanceKind, &'a MaintenanceType)> + 'a {
        defaults
            .iter()
            .map(|t| (MaintenanceKind::Default, t))
            .chain(
                self.custom_maintenance
                    .iter()
                    .map(|t| (MaintenanceKind::Custom, t)),
            )
    }

    /// Find an applicable type by name (case-insensitive)
    pub fn find_type<'a>(
        &'a self,
        defaults: &'a [MaintenanceType],
        name: &str,
    ) -> Option<(MaintenanceKind, &'a MaintenanceType)> {
        self.applicable_types(defaults)
            .find(|(_, t)| t.matches_name(name))
    }

    /// Index of a custom type by name (case-insensitive)
    pub fn custom_type_index(&self, name: &str) -> Option<usize> {
        self.custom_maintenance
            .iter()
            .position(|t| t.matches_name(name))
    }

    /// The record of this type with the highest odometer reading
    pub fn last_service(&self, maintenance_type: &MaintenanceType) -> Option<&MaintenanceRecord> {
        self.maintenance_history
            .iter()
            .filter(|r| r.is_for(maintenance_type))
            .max_by_key(|r| r.mileage)
    }

    /// History sorted by odometer reading, highest first
    pub fn history_by_mileage(&self) -> Vec<&MaintenanceRecord> {
        let mut records: Vec<_> = self.maintenance_history.iter().collect();
        records.sort_by(|a, b| b.mileage.cmp(&a.mileage));
        records
    }

    /// Validate the car
    pub fn validate(&self) -> Result<(), CarValidationError> {
        if self.make.trim().is_empty() {
            return Err(CarValidationError::EmptyMake);
        }

        if self.model.trim().is_empty() {
            return Err(CarValidationError::EmptyModel);
        }

        Ok(())
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

/// Validation errors for cars
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarValidationError {
    EmptyMake,
    EmptyModel,
}

impl fmt::Display for CarValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMake => write!(f, "Car make cannot be empty"),
            Self::EmptyModel => write!(f, "Car model cannot be empty"),
        }
    }
}

impl std::error::Error for CarValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn civic() -> Car {
        Car::new(UserId::new(), "Honda", "Civic", "2020", 56_876)
    }

    #[test]
    fn test_names() {
        let car = civic();
        assert_eq!(car.display_name(), "Honda Civic");
        assert_eq!(car.full_name(), "2020 Honda Civic");
        assert!(car.matches_label("honda civic"));
        assert!(car.matches_label("2020 HONDA CIVIC"));
        assert!(!car.matches_label("Civic"));
    }

    #[test]
    fn test_last_service_uses_highest_mileage_not_latest_date() {
        let mut car = civic();
        let oil = MaintenanceType::new("Oil Change", 3000);
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        car.log_maintenance(MaintenanceRecord::new("Oil Change", 50_000, early));
        car.log_maintenance(MaintenanceRecord::new("oil change", 45_000, late));

        assert_eq!(car.last_service(&oil).unwrap().mileage, 50_000);
    }

    #[test]
    fn test_applicable_types_defaults_then_custom() {
        let mut car = civic();
        car.custom_maintenance
            .push(MaintenanceType::new("Wiper Blades", 12_000));
        let defaults = vec![MaintenanceType::new("Oil Change", 3000)];

        let kinds: Vec<_> = car
            .applicable_types(&defaults)
            .map(|(kind, t)| (kind, t.name.clone()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (MaintenanceKind::Default, "Oil Change".to_string()),
                (MaintenanceKind::Custom, "Wiper Blades".to_string()),
            ]
        );

        assert!(car.find_type(&defaults, "wiper blades").is_some());
        assert_eq!(car.custom_type_index("WIPER BLADES"), Some(0));
        assert_eq!(car.custom_type_index("Oil Change"), None);
    }

    #[test]
    fn test_validation() {
        let mut car = civic();
        assert!(car.validate().is_ok());
        car.make = " ".into();
        assert_eq!(car.validate(), Err(CarValidationError::EmptyMake));
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let car = civic();
        let value = serde_json::to_value(&car).unwrap();
        assert!(value.get("maintenanceHistory").is_some());
        assert!(value.get("customMaintenance").is_some());
        assert!(value.get("ownerId").is_some());

        let back: Car = serde_json::from_value(value).unwrap();
        assert_eq!(back, car);
    }
}
