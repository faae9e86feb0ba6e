//! Car display formatting
//!
//! Formats cars for terminal output in table and detail views.

use crate::config::Settings;
use crate::due::{DueMaintenance, ScheduleEntry};
use crate::models::Car;

use super::{format_distance, format_due};
use super::maintenance::format_schedule;

/// Format a list of cars as a table
pub fn format_car_list(cars: &[Car], settings: &Settings) -> String {
    if cars.is_empty() {
        return "No cars found. Add one with 'milemark car add'.".to_string();
    }

    let name_width = cars
        .iter()
        .map(|c| c.display_name().len())
        .max()
        .unwrap_or(3)
        .max(3);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<4}  {:<name_width$}  {:>14}\n",
        "ID",
        "Year",
        "Car",
        "Mileage",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<4}  {:-<name_width$}  {:->14}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for car in cars {
        output.push_str(&format!(
            "{:<12}  {:<4}  {:<name_width$}  {:>14}\n",
            car.id.to_string(),
            car.year,
            car.display_name(),
            format_distance(i64::from(car.mileage), &settings.distance_unit),
            name_width = name_width,
        ));
    }

    output
}

/// Format a single car with its maintenance schedule
pub fn format_car_details(
    car: &Car,
    next_due: Option<&DueMaintenance>,
    schedule: &[ScheduleEntry],
    settings: &Settings,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Car: {}\n", car.full_name()));
    output.push_str(&format!("  ID:        {}\n", car.id));
    output.push_str(&format!("  Make:      {}\n", car.make));
    output.push_str(&format!("  Model:     {}\n", car.model));
    output.push_str(&format!("  Year:      {}\n", car.year));
    output.push_str(&format!(
        "  Mileage:   {}\n",
        format_distance(i64::from(car.mileage), &settings.distance_unit)
    ));
    output.push_str(&format!(
        "  Services:  {} logged\n",
        car.maintenance_history.len()
    ));
    output.push_str(&format!(
        "  Next due:  {}\n",
        format_due(next_due, &settings.distance_unit)
    ));

    output.push('\n');
    output.push_str(&format_schedule(schedule, settings));

    output
}
