//! Core data models for MileMark
//!
//! This module contains the data structures of the maintenance domain: cars,
//! maintenance types and records, users and reminders.

pub mod car;
pub mod ids;
pub mod maintenance;
pub mod reminder;
pub mod user;

pub use car::{Car, CarValidationError};
pub use ids::{CarId, ReminderId, UserId};
pub use maintenance::{
    MaintenanceKind, MaintenanceRecord, MaintenanceType, MaintenanceValidationError,
};
pub use reminder::Reminder;
pub use user::{UserAccount, UserProfile};
