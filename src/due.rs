//! Maintenance due calculation
//!
//! Works out, from a car's service history, when each maintenance type is due
//! again and which task is closest. Everything here is a pure function over
//! borrowed data: the caller fetches the car and the default catalog first and
//! passes them in.
//!
//! A type only gets a due mileage once it has been logged at least once. A
//! never-logged type is reported as "not yet logged" and is not a candidate for
//! the next due task; no zero-mile baseline is assumed.

use chrono::{DateTime, Utc};

use crate::models::{Car, MaintenanceKind, MaintenanceRecord, MaintenanceType};

/// The nearest maintenance task for a car
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueMaintenance {
    /// Name of the maintenance type
    pub name: String,
    /// Miles until the task is due; negative when overdue
    pub miles_left: i64,
}

impl DueMaintenance {
    /// Whether the task is already past its due mileage
    pub fn is_overdue(&self) -> bool {
        self.miles_left < 0
    }
}

/// Service status of a type that has been logged at least once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    /// Odometer reading of the highest-mileage matching record
    pub last_done: u32,
    /// Date of that record
    pub last_date: DateTime<Utc>,
    /// Mileage at which the service is due again
    pub next_due: i64,
    /// `next_due` minus the current odometer reading
    pub miles_left: i64,
}

/// One row of a car's maintenance schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub maintenance_type: MaintenanceType,
    pub kind: MaintenanceKind,
    /// `None` until the type has been logged
    pub status: Option<ServiceStatus>,
}

/// Pick the nearest due task for the given odometer reading and history
///
/// Candidates are the types with at least one matching record. The smallest
/// `miles_left` wins; equal values go to the alphabetically first name.
pub fn next_due<'a, I>(
    current_mileage: u32,
    history: &[MaintenanceRecord],
    types: I,
) -> Option<DueMaintenance>
where
    I: IntoIterator<Item = &'a MaintenanceType>,
{
    types
        .into_iter()
        .filter_map(|maintenance_type| {
            service_status(current_mileage, history, maintenance_type).map(|status| {
                DueMaintenance {
                    name: maintenance_type.name.clone(),
                    miles_left: status.miles_left,
                }
            })
        })
        .min_by(|a, b| {
            a.miles_left
                .cmp(&b.miles_left)
                .then_with(|| a.name.cmp(&b.name))
        })
}

/// Nearest due task for a car, over the default catalog plus its custom types
pub fn next_due_maintenance(car: &Car, default_types: &[MaintenanceType]) -> Option<DueMaintenance> {
    next_due(
        car.mileage,
        &car.maintenance_history,
        car.applicable_types(default_types).map(|(_, t)| t),
    )
}

/// Status of every applicable type for a car, defaults first
pub fn maintenance_schedule(car: &Car, default_types: &[MaintenanceType]) -> Vec<ScheduleEntry> {
    car.applicable_types(default_types)
        .map(|(kind, maintenance_type)| ScheduleEntry {
            maintenance_type: maintenance_type.clone(),
            kind,
            status: service_status(car.mileage, &car.maintenance_history, maintenance_type),
        })
        .collect()
}

/// Due status of a single type, or `None` if it was never logged
pub fn service_status(
    current_mileage: u32,
    history: &[MaintenanceRecord],
    maintenance_type: &MaintenanceType,
) -> Option<ServiceStatus> {
    let last = history
        .iter()
        .filter(|record| record.is_for(maintenance_type))
        .max_by_key(|record| record.mileage)?;

    let next_due = i64::from(last.mileage) + i64::from(maintenance_type.interval);
    Some(ServiceStatus {
        last_done: last.mileage,
        last_date: last.date,
        next_due,
        miles_left: next_due - i64::from(current_mileage),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use chrono::TimeZone;

    fn record(name: &str, mileage: u32) -> MaintenanceRecord {
        MaintenanceRecord::new(name, mileage, Utc::now())
    }

    fn oil() -> MaintenanceType {
        MaintenanceType::new("Oil Change", 3000)
    }

    fn car_at(mileage: u32) -> Car {
        Car::new(UserId::new(), "Honda", "Civic", "2020", mileage)
    }

    #[test]
    fn test_empty_history_has_nothing_due() {
        let types = vec![oil(), MaintenanceType::new("Tire Rotation", 6000)];
        assert_eq!(next_due(12_000, &[], &types), None);
        assert_eq!(next_due_maintenance(&car_at(12_000), &types), None);
    }

    #[test]
    fn test_miles_left_from_last_service() {
        let history = vec![record("Oil Change", 10_000)];
        let due = next_due(12_000, &history, &[oil()]).unwrap();
        assert_eq!(
            due,
            DueMaintenance {
                name: "Oil Change".into(),
                miles_left: 1000,
            }
        );
        assert!(!due.is_overdue());
    }

    #[test]
    fn test_overdue_is_negative() {
        let history = vec![record("Oil Change", 10_000)];
        let due = next_due(14_000, &history, &[oil()]).unwrap();
        assert_eq!(due.miles_left, -1000);
        assert!(due.is_overdue());
    }

    #[test]
    fn test_highest_mileage_record_wins_regardless_of_date() {
        let newer = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let older = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let history = vec![
            MaintenanceRecord::new("Oil Change", 9_000, newer),
            MaintenanceRecord::new("Oil Change", 11_000, older),
            MaintenanceRecord::new("Oil Change", 10_000, newer),
        ];

        let due = next_due(12_000, &history, &[oil()]).unwrap();
        assert_eq!(due.miles_left, 2000);

        let status = service_status(12_000, &history, &oil()).unwrap();
        assert_eq!(status.last_done, 11_000);
        assert_eq!(status.last_date, older);
        assert_eq!(status.next_due, 14_000);
    }

    #[test]
    fn test_ties_go_to_smaller_name() {
        let types = vec![
            MaintenanceType::new("Tire Rotation", 3000),
            MaintenanceType::new("Air Filter", 3000),
        ];
        let history = vec![record("Tire Rotation", 10_000), record("Air Filter", 10_000)];

        let due = next_due(11_000, &history, &types).unwrap();
        assert_eq!(due.name, "Air Filter");
        assert_eq!(due.miles_left, 2000);
    }

    #[test]
    fn test_smallest_miles_left_wins() {
        let types = vec![oil(), MaintenanceType::new("Brake Inspection", 20_000)];
        let history = vec![record("Oil Change", 10_000), record("Brake Inspection", 0)];

        // Oil: 13000 - 12000 = 1000, brakes: 20000 - 12000 = 8000
        let due = next_due(12_000, &history, &types).unwrap();
        assert_eq!(due.name, "Oil Change");
    }

    #[test]
    fn test_type_names_match_case_insensitively() {
        let history = vec![record("oil change", 10_000)];
        let due = next_due(12_000, &history, &[oil()]).unwrap();
        assert_eq!(due.name, "Oil Change");
        assert_eq!(due.miles_left, 1000);
    }

    #[test]
    fn test_never_logged_type_is_not_a_candidate() {
        let types = vec![oil(), MaintenanceType::new("Wiper Check", 1)];
        let history = vec![record("Oil Change", 10_000)];

        let due = next_due(50_000, &history, &types).unwrap();
        assert_eq!(due.name, "Oil Change");
        assert_eq!(due.miles_left, -37_000);
    }

    #[test]
    fn test_records_for_unknown_types_are_ignored() {
        let history = vec![record("Detailing", 1_000)];
        assert_eq!(next_due(12_000, &history, &[oil()]), None);
    }

    #[test]
    fn test_custom_types_take_part() {
        let mut car = car_at(20_000);
        car.custom_maintenance
            .push(MaintenanceType::new("Wiper Blades", 5_000));
        car.log_maintenance(record("Oil Change", 18_000));
        car.log_maintenance(record("wiper blades", 15_500));

        // Oil: 21000 - 20000 = 1000, wipers: 20500 - 20000 = 500
        let due = next_due_maintenance(&car, &[oil()]).unwrap();
        assert_eq!(due.name, "Wiper Blades");
        assert_eq!(due.miles_left, 500);
    }

    #[test]
    fn test_schedule_lists_every_type_without_fabricated_baseline() {
        let mut car = car_at(12_000);
        car.custom_maintenance
            .push(MaintenanceType::new("Wiper Blades", 5_000));
        car.log_maintenance(record("Oil Change", 10_000));

        let defaults = vec![oil(), MaintenanceType::new("Tire Rotation", 6000)];
        let schedule = maintenance_schedule(&car, &defaults);

        let names: Vec<_> = schedule
            .iter()
            .map(|e| e.maintenance_type.name.as_str())
            .collect();
        assert_eq!(names, vec!["Oil Change", "Tire Rotation", "Wiper Blades"]);

        assert_eq!(schedule[0].kind, MaintenanceKind::Default);
        assert_eq!(schedule[0].status.as_ref().unwrap().miles_left, 1000);
        assert!(schedule[1].status.is_none());
        assert_eq!(schedule[2].kind, MaintenanceKind::Custom);
        assert!(schedule[2].status.is_none());
    }

    #[test]
    fn test_large_mileage_does_not_overflow() {
        let types = vec![MaintenanceType::new("Oil Change", u32::MAX)];
        let history = vec![record("Oil Change", u32::MAX)];
        let due = next_due(0, &history, &types).unwrap();
        assert_eq!(due.miles_left, 2 * i64::from(u32::MAX));
    }
}
