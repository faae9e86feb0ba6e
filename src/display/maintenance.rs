//! Maintenance display formatting

use crate::config::Settings;
use crate::due::ScheduleEntry;
use crate::models::{MaintenanceKind, MaintenanceRecord, MaintenanceType};

use super::format_distance;

/// Format a car's maintenance schedule as a table
///
/// Never-logged types show as "not yet logged" with no due mileage.
pub fn format_schedule(schedule: &[ScheduleEntry], settings: &Settings) -> String {
    if schedule.is_empty() {
        return "No maintenance types configured.".to_string();
    }

    let unit = &settings.distance_unit;
    let name_width = schedule
        .iter()
        .map(|e| e.maintenance_type.name.len())
        .max()
        .unwrap_or(11)
        .max(11);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<7}  {:>12}  {:>12}  {:>12}  {}\n",
        "Maintenance",
        "Kind",
        "Interval",
        "Last Done",
        "Next Due",
        "Status",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<7}  {:->12}  {:->12}  {:->12}  {:-<20}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for entry in schedule {
        let interval = format_distance(i64::from(entry.maintenance_type.interval), unit);
        let (last_done, next_due, status) = match &entry.status {
            Some(status) => {
                let state = if status.miles_left < 0 {
                    format!("OVERDUE by {}", format_distance(-status.miles_left, unit))
                } else {
                    format!("{} left", format_distance(status.miles_left, unit))
                };
                (
                    format_distance(i64::from(status.last_done), unit),
                    format_distance(status.next_due, unit),
                    state,
                )
            }
            None => ("-".to_string(), "-".to_string(), "not yet logged".to_string()),
        };

        output.push_str(&format!(
            "{:<name_width$}  {:<7}  {:>12}  {:>12}  {:>12}  {}\n",
            entry.maintenance_type.name,
            entry.kind.to_string(),
            interval,
            last_done,
            next_due,
            status,
            name_width = name_width,
        ));
    }

    output
}

/// Format a car's maintenance history, as returned highest mileage first
pub fn format_history(records: &[MaintenanceRecord], settings: &Settings) -> String {
    if records.is_empty() {
        return "No maintenance logged yet.".to_string();
    }

    let name_width = records
        .iter()
        .map(|r| r.maintenance_type.len())
        .max()
        .unwrap_or(11)
        .max(11);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:>14}\n",
        "Date",
        "Maintenance",
        "Mileage",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:->14}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for record in records {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:>14}\n",
            record.date.format(&settings.date_format).to_string(),
            record.maintenance_type,
            format_distance(i64::from(record.mileage), &settings.distance_unit),
            name_width = name_width,
        ));
    }

    output
}

/// Format a list of maintenance types with their kinds
pub fn format_type_list(types: &[(MaintenanceKind, MaintenanceType)], settings: &Settings) -> String {
    if types.is_empty() {
        return "No maintenance types found.".to_string();
    }

    let name_width = types
        .iter()
        .map(|(_, t)| t.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<7}  {:>12}\n",
        "Name",
        "Kind",
        "Interval",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<7}  {:->12}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for (kind, maintenance_type) in types {
        output.push_str(&format!(
            "{:<name_width$}  {:<7}  {:>12}\n",
            maintenance_type.name,
            kind.to_string(),
            format_distance(i64::from(maintenance_type.interval), &settings.distance_unit),
            name_width = name_width,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::due::ServiceStatus;
    use chrono::{TimeZone, Utc};

    fn entry(name: &str, status: Option<ServiceStatus>) -> ScheduleEntry {
        ScheduleEntry {
            maintenance_type: MaintenanceType::new(name, 3_000),
            kind: MaintenanceKind::Default,
            status,
        }
    }

    #[test]
    fn test_schedule_marks_overdue_and_untracked() {
        let overdue = ServiceStatus {
            last_done: 10_000,
            last_date: Utc::now(),
            next_due: 13_000,
            miles_left: -1_000,
        };
        let schedule = vec![entry("Oil Change", Some(overdue)), entry("Air Filter", None)];

        let output = format_schedule(&schedule, &Settings::default());
        assert!(output.contains("OVERDUE by 1,000 mi"));
        assert!(output.contains("13,000 mi"));
        assert!(output.contains("not yet logged"));
    }

    #[test]
    fn test_history_uses_date_format() {
        let date = Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap();
        let records = vec![MaintenanceRecord::new("Oil Change", 10_000, date)];

        let mut settings = Settings::default();
        settings.date_format = "%d/%m/%Y".into();
        let output = format_history(&records, &settings);
        assert!(output.contains("17/05/2024"));
        assert!(output.contains("10,000 mi"));
    }

    #[test]
    fn test_type_list() {
        let types = vec![(MaintenanceKind::Custom, MaintenanceType::new("Wiper Blades", 12_000))];
        let output = format_type_list(&types, &Settings::default());
        assert!(output.contains("Wiper Blades"));
        assert!(output.contains("custom"));
        assert!(output.contains("12,000 mi"));
    }
}
