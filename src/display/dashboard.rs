//! Dashboard and reminder display formatting

use crate::config::Settings;
use crate::services::{Dashboard, UpcomingReminder};

use super::{format_distance, format_due};

/// Format the dashboard: greeting, then one line per car
pub fn format_dashboard(dashboard: &Dashboard, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!("Welcome, {}\n\n", dashboard.profile.full_name));

    if dashboard.cars.is_empty() {
        output.push_str("No cars yet. Add one with 'milemark car add'.\n");
        return output;
    }

    let name_width = dashboard
        .cars
        .iter()
        .map(|s| s.car.full_name().len())
        .max()
        .unwrap_or(3)
        .max(3);

    output.push_str(&format!(
        "{:<name_width$}  {:>14}  {}\n",
        "Car",
        "Mileage",
        "Next Maintenance",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->14}  {:-<30}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for summary in &dashboard.cars {
        output.push_str(&format!(
            "{:<name_width$}  {:>14}  {}\n",
            summary.car.full_name(),
            format_distance(i64::from(summary.car.mileage), &settings.distance_unit),
            format_due(summary.next_due.as_ref(), &settings.distance_unit),
            name_width = name_width,
        ));
    }

    let overdue = dashboard.overdue_count();
    if overdue > 0 {
        output.push_str(&format!(
            "\n{} car{} with overdue maintenance\n",
            overdue,
            if overdue == 1 { "" } else { "s" }
        ));
    }

    output
}

/// Format reminders as a list
pub fn format_reminders(reminders: &[UpcomingReminder], settings: &Settings) -> String {
    if reminders.is_empty() {
        return "No reminders.".to_string();
    }

    let mut output = String::new();
    for upcoming in reminders {
        let reminder = &upcoming.reminder;
        output.push_str(&format!(
            "{}  {}  {}\n    {}\n",
            reminder.fire_at.format(&settings.date_format),
            upcoming.car_name,
            reminder.title,
            reminder.body,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::due::DueMaintenance;
    use crate::models::{Car, UserId, UserProfile};
    use crate::services::CarSummary;
    use chrono::Utc;

    fn profile() -> UserProfile {
        UserProfile {
            full_name: "Alex Driver".into(),
            phone_number: String::new(),
            email: "alex@example.com".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_dashboard_rows() {
        let owner = UserId::new();
        let dashboard = Dashboard {
            profile: profile(),
            cars: vec![
                CarSummary {
                    car: Car::new(owner, "Honda", "Civic", "2020", 14_000),
                    next_due: Some(DueMaintenance {
                        name: "Oil Change".into(),
                        miles_left: -1_000,
                    }),
                },
                CarSummary {
                    car: Car::new(owner, "Kia", "Soul", "2014", 100),
                    next_due: None,
                },
            ],
        };

        let output = format_dashboard(&dashboard, &Settings::default());
        assert!(output.starts_with("Welcome, Alex Driver"));
        assert!(output.contains("Oil Change: OVERDUE by 1,000 mi"));
        assert!(output.contains("No maintenance logged yet"));
        assert!(output.contains("1 car with overdue maintenance"));
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = Dashboard {
            profile: profile(),
            cars: Vec::new(),
        };
        assert!(format_dashboard(&dashboard, &Settings::default()).contains("No cars yet"));
    }
}
