//! Maintenance CLI commands
//!
//! Logging services, viewing history and what is due, and managing a car's
//! custom maintenance types.

use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;

use crate::display::format_due;
use crate::display::maintenance::{format_history, format_schedule, format_type_list};
use crate::error::{MileMarkError, MileMarkResult};
use crate::services::{CarService, MaintenanceService, ServiceContext};

/// Maintenance subcommands
#[derive(Subcommand)]
pub enum MaintenanceCommands {
    /// Log a service performed on a car
    Log {
        /// Car ID or "make model"
        car: String,
        /// Maintenance type name, e.g. "Oil Change"
        maintenance_type: String,
        /// Odometer reading at the service (defaults to the car's mileage)
        #[arg(short, long)]
        mileage: Option<u32>,
        /// Service date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show a car's maintenance history
    History {
        /// Car ID or "make model"
        car: String,
    },
    /// Show the nearest maintenance task for a car
    Next {
        /// Car ID or "make model"
        car: String,
    },
    /// Show when every maintenance type is due for a car
    Schedule {
        /// Car ID or "make model"
        car: String,
    },
    /// Manage a car's maintenance types
    #[command(subcommand)]
    Type(TypeCommands),
}

/// Maintenance type subcommands
#[derive(Subcommand)]
pub enum TypeCommands {
    /// Add a custom maintenance type to a car
    Add {
        /// Car ID or "make model"
        car: String,
        /// Type name
        name: String,
        /// Miles between services
        interval: u32,
    },
    /// Rename a custom type or change its interval
    Edit {
        /// Car ID or "make model"
        car: String,
        /// Current type name
        name: String,
        /// New name
        #[arg(short, long)]
        rename: Option<String>,
        /// New interval in miles
        #[arg(short, long)]
        interval: Option<u32>,
    },
    /// Remove a custom type from a car
    Remove {
        /// Car ID or "make model"
        car: String,
        /// Type name
        name: String,
    },
    /// List the maintenance types that apply to a car
    List {
        /// Car ID or "make model"
        car: String,
    },
}

/// Handle a maintenance command
pub fn handle_maintenance_command(
    ctx: ServiceContext<'_>,
    cmd: MaintenanceCommands,
) -> MileMarkResult<()> {
    let cars = CarService::new(ctx);
    let service = MaintenanceService::new(ctx);

    match cmd {
        MaintenanceCommands::Log {
            car,
            maintenance_type,
            mileage,
            date,
        } => {
            let found = cars.resolve(&car)?;
            let date = date.as_deref().map(parse_date).transpose()?;
            let record = service.log(found.id, &maintenance_type, mileage, date)?;
            println!(
                "Logged {} for {} at {} {}",
                record.maintenance_type,
                found.display_name(),
                record.mileage,
                ctx.settings.distance_unit
            );
        }

        MaintenanceCommands::History { car } => {
            let found = cars.resolve(&car)?;
            let history = service.history(found.id)?;
            println!("Maintenance history for {}", found.full_name());
            println!();
            print!("{}", format_history(&history, ctx.settings));
            if history.is_empty() {
                println!();
            }
        }

        MaintenanceCommands::Next { car } => {
            let found = cars.resolve(&car)?;
            let due = service.next_due(found.id)?;
            println!(
                "{}: {}",
                found.display_name(),
                format_due(due.as_ref(), &ctx.settings.distance_unit)
            );
        }

        MaintenanceCommands::Schedule { car } => {
            let found = cars.resolve(&car)?;
            let schedule = service.schedule(found.id)?;
            println!("Maintenance schedule for {}", found.full_name());
            println!();
            print!("{}", format_schedule(&schedule, ctx.settings));
        }

        MaintenanceCommands::Type(cmd) => handle_type_command(ctx, cmd)?,
    }

    Ok(())
}

fn handle_type_command(ctx: ServiceContext<'_>, cmd: TypeCommands) -> MileMarkResult<()> {
    let cars = CarService::new(ctx);
    let service = MaintenanceService::new(ctx);

    match cmd {
        TypeCommands::Add {
            car,
            name,
            interval,
        } => {
            let found = cars.resolve(&car)?;
            let added = service.add_custom_type(found.id, &name, interval)?;
            println!("Added maintenance type to {}: {}", found.display_name(), added);
        }

        TypeCommands::Edit {
            car,
            name,
            rename,
            interval,
        } => {
            if rename.is_none() && interval.is_none() {
                return Err(MileMarkError::Validation(
                    "Nothing to change; pass --rename and/or --interval".into(),
                ));
            }
            let found = cars.resolve(&car)?;
            let updated =
                service.update_custom_type(found.id, &name, rename.as_deref(), interval)?;
            println!("Updated maintenance type: {}", updated);
        }

        TypeCommands::Remove { car, name } => {
            let found = cars.resolve(&car)?;
            let removed = service.remove_custom_type(found.id, &name)?;
            println!(
                "Removed maintenance type from {}: {}",
                found.display_name(),
                removed.name
            );
        }

        TypeCommands::List { car } => {
            let found = cars.resolve(&car)?;
            let types = service.applicable_types(found.id)?;
            print!("{}", format_type_list(&types, ctx.settings));
        }
    }

    Ok(())
}

/// Parse a YYYY-MM-DD date as midnight UTC
fn parse_date(input: &str) -> MileMarkResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        MileMarkError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD.", input))
    })?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-05-17").unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 17, 0, 0, 0).unwrap()
        );
        assert!(parse_date("05/17/2024").unwrap_err().is_validation());
    }
}
