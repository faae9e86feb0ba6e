//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for cars, maintenance schedules,
//! history, the dashboard and reminders.

pub mod car;
pub mod dashboard;
pub mod maintenance;

pub use car::{format_car_details, format_car_list};
pub use dashboard::{format_dashboard, format_reminders};
pub use maintenance::{format_history, format_schedule, format_type_list};

use crate::due::DueMaintenance;

/// Format a distance with thousands separators, e.g. `12,500 mi`
pub fn format_distance(miles: i64, unit: &str) -> String {
    let digits = miles.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if miles < 0 { "-" } else { "" };
    format!("{}{} {}", sign, grouped, unit)
}

/// Format the nearest due task, or the untracked state
pub fn format_due(due: Option<&DueMaintenance>, unit: &str) -> String {
    match due {
        None => "No maintenance logged yet".to_string(),
        Some(due) if due.is_overdue() => format!(
            "{}: OVERDUE by {}",
            due.name,
            format_distance(-due.miles_left, unit)
        ),
        Some(due) => format!(
            "{}: due in {}",
            due.name,
            format_distance(due.miles_left, unit)
        ),
    }
}
