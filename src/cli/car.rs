//! Car CLI commands
//!
//! Implements CLI commands for car management.

use clap::Subcommand;

use crate::display::car::{format_car_details, format_car_list};
use crate::error::MileMarkResult;
use crate::services::{CarEdit, CarService, MaintenanceService, ServiceContext};

/// Car subcommands
#[derive(Subcommand)]
pub enum CarCommands {
    /// Register a new car
    Add {
        /// Manufacturer, e.g. "Honda"
        make: String,
        /// Model, e.g. "Civic"
        model: String,
        /// Model year
        #[arg(short, long, default_value = "")]
        year: String,
        /// Current odometer reading
        #[arg(short, long, default_value = "0")]
        mileage: u32,
    },
    /// Change a car's details
    Edit {
        /// Car ID or "make model"
        car: String,
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
        #[arg(short, long)]
        mileage: Option<u32>,
    },
    /// List your cars
    List,
    /// Show a car and its maintenance schedule
    Show {
        /// Car ID or "make model"
        car: String,
    },
    /// Delete a car and its history
    Delete {
        /// Car ID or "make model"
        car: String,
    },
    /// Record the current odometer reading
    Mileage {
        /// Car ID or "make model"
        car: String,
        /// New odometer reading
        mileage: u32,
    },
}

/// Handle a car command
pub fn handle_car_command(ctx: ServiceContext<'_>, cmd: CarCommands) -> MileMarkResult<()> {
    let service = CarService::new(ctx);

    match cmd {
        CarCommands::Add {
            make,
            model,
            year,
            mileage,
        } => {
            let car = service.add(&make, &model, &year, mileage)?;
            println!("Added car: {}", car.full_name());
            println!("  Mileage: {}", car.mileage);
            println!("  ID: {}", car.id);
        }

        CarCommands::Edit {
            car,
            make,
            model,
            year,
            mileage,
        } => {
            let found = service.resolve(&car)?;
            let updated = service.edit(
                found.id,
                CarEdit {
                    make,
                    model,
                    year,
                    mileage,
                },
            )?;
            println!("Updated car: {}", updated.full_name());
        }

        CarCommands::List => {
            let cars = service.list()?;
            print!("{}", format_car_list(&cars, ctx.settings));
        }

        CarCommands::Show { car } => {
            let found = service.resolve(&car)?;
            let maintenance = MaintenanceService::new(ctx);
            let next_due = maintenance.next_due(found.id)?;
            let schedule = maintenance.schedule(found.id)?;
            print!(
                "{}",
                format_car_details(&found, next_due.as_ref(), &schedule, ctx.settings)
            );
        }

        CarCommands::Delete { car } => {
            let found = service.resolve(&car)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted car: {}", deleted.full_name());
        }

        CarCommands::Mileage { car, mileage } => {
            let found = service.resolve(&car)?;
            let updated = service.update_mileage(found.id, mileage)?;
            println!(
                "Mileage for {} is now {}",
                updated.display_name(),
                updated.mileage
            );
        }
    }

    Ok(())
}
