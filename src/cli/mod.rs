//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod car;
pub mod catalog;
pub mod config;
pub mod maintenance;
pub mod reminder;

pub use auth::{handle_auth_command, AuthCommands};
pub use car::{handle_car_command, CarCommands};
pub use catalog::{handle_catalog_command, CatalogCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use maintenance::{handle_maintenance_command, MaintenanceCommands, TypeCommands};
pub use reminder::{
    handle_audit_command, handle_dashboard_command, handle_reminder_command, ReminderCommands,
};
