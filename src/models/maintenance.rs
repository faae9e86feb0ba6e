//! Maintenance types and maintenance records
//!
//! A maintenance type is a named recurring service with a mileage interval. A
//! maintenance record notes that a service was done at some odometer reading.
//! Records refer to their type by name, compared case-insensitively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a maintenance type comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceKind {
    /// Shared catalog entry, applies to every car
    Default,
    /// Defined by the user for a single car
    Custom,
}

impl fmt::Display for MaintenanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// A recurring service and the distance between services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceType {
    pub name: String,
    /// Miles between services
    pub interval: u32,
}

impl MaintenanceType {
    pub fn new(name: impl Into<String>, interval: u32) -> Self {
        Self {
            name: name.into(),
            interval,
        }
    }

    /// Normalize a maintenance name for matching
    ///
    /// Only case is folded. Callers trim user input before matching.
    pub fn normalize_name(name: &str) -> String {
        name.to_lowercase()
    }

    /// Check if this type has the given name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }

    /// Validate the maintenance type
    pub fn validate(&self) -> Result<(), MaintenanceValidationError> {
        if self.name.trim().is_empty() {
            return Err(MaintenanceValidationError::EmptyName);
        }

        if self.name.len() > 60 {
            return Err(MaintenanceValidationError::NameTooLong(self.name.len()));
        }

        if self.interval == 0 {
            return Err(MaintenanceValidationError::ZeroInterval);
        }

        Ok(())
    }
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (every {} mi)", self.name, self.interval)
    }
}

/// A service that was performed. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    /// Name of the maintenance type that was performed
    #[serde(rename = "type")]
    pub maintenance_type: String,

    /// Odometer reading at the time of service
    pub mileage: u32,

    /// When the service was performed
    pub date: DateTime<Utc>,
}

impl MaintenanceRecord {
    pub fn new(maintenance_type: impl Into<String>, mileage: u32, date: DateTime<Utc>) -> Self {
        Self {
            maintenance_type: maintenance_type.into(),
            mileage,
            date,
        }
    }

    /// Whether this record is a service of the given type (case-insensitive)
    pub fn is_for(&self, maintenance_type: &MaintenanceType) -> bool {
        maintenance_type.matches_name(&self.maintenance_type)
    }
}

/// Validation errors for maintenance types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaintenanceValidationError {
    EmptyName,
    NameTooLong(usize),
    ZeroInterval,
}

impl fmt::Display for MaintenanceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Maintenance name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Maintenance name too long ({} chars, max 60)", len)
            }
            Self::ZeroInterval => write!(f, "Maintenance interval must be a positive number of miles"),
        }
    }
}

impl std::error::Error for MaintenanceValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matching() {
        let oil = MaintenanceType::new("Oil Change", 3000);
        assert!(oil.matches_name("oil change"));
        assert!(oil.matches_name("OIL CHANGE"));
        assert!(!oil.matches_name("Oil"));
        assert!(!oil.matches_name(" Oil Change"));
    }

    #[test]
    fn test_record_matches_type_case_insensitively() {
        let oil = MaintenanceType::new("Oil Change", 3000);
        let record = MaintenanceRecord::new("oil change", 10_000, Utc::now());
        assert!(record.is_for(&oil));
        assert!(!record.is_for(&MaintenanceType::new("Tire Rotation", 6000)));

        let padded = MaintenanceRecord::new(" Oil Change", 10_000, Utc::now());
        assert!(!padded.is_for(&oil));
    }

    #[test]
    fn test_validation() {
        assert!(MaintenanceType::new("Wipers", 12_000).validate().is_ok());
        assert_eq!(
            MaintenanceType::new("  ", 1000).validate(),
            Err(MaintenanceValidationError::EmptyName)
        );
        assert_eq!(
            MaintenanceType::new("Wipers", 0).validate(),
            Err(MaintenanceValidationError::ZeroInterval)
        );
        assert!(matches!(
            MaintenanceType::new("x".repeat(61), 10).validate(),
            Err(MaintenanceValidationError::NameTooLong(61))
        ));
    }

    #[test]
    fn test_record_wire_format_uses_type_key() {
        let record = MaintenanceRecord::new("Oil Change", 10_000, Utc::now());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "Oil Change");
        assert_eq!(value["mileage"], 10_000);
        assert!(value.get("maintenance_type").is_none());
    }
}
