//! Catalog CLI commands

use clap::Subcommand;

use crate::display::maintenance::format_type_list;
use crate::error::MileMarkResult;
use crate::models::MaintenanceKind;
use crate::services::{CatalogService, ServiceContext};

/// Catalog subcommands
#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List the default maintenance types
    List,
    /// Add a default maintenance type for every car
    Add {
        /// Type name
        name: String,
        /// Miles between services
        interval: u32,
    },
}

/// Handle a catalog command
pub fn handle_catalog_command(ctx: ServiceContext<'_>, cmd: CatalogCommands) -> MileMarkResult<()> {
    let service = CatalogService::new(ctx);

    match cmd {
        CatalogCommands::List => {
            let types: Vec<_> = service
                .list()?
                .into_iter()
                .map(|t| (MaintenanceKind::Default, t))
                .collect();
            print!("{}", format_type_list(&types, ctx.settings));
        }

        CatalogCommands::Add { name, interval } => {
            let added = service.add(&name, interval)?;
            println!("Added to catalog: {}", added);
        }
    }

    Ok(())
}
