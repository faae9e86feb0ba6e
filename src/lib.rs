//! MileMark - vehicle maintenance tracker
//!
//! This library provides the core functionality for the MileMark command line
//! application. Users register cars, log the services performed on them, and
//! ask which maintenance task is due next.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `due`: Pure maintenance due calculation
//! - `models`: Core data models (cars, maintenance types and records, users)
//! - `storage`: JSON file storage layer and the `VehicleStore` trait
//! - `auth`: Sign up, log in and the current session
//! - `notify`: One-shot mileage reminders
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `config`: Configuration and path management
//! - `logging`: Diagnostic logging setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use milemark::due::next_due_maintenance;
//! use milemark::models::{Car, MaintenanceRecord, MaintenanceType, UserId};
//!
//! let mut car = Car::new(UserId::new(), "Honda", "Civic", "2020", 12_000);
//! car.log_maintenance(MaintenanceRecord::new("Oil Change", 10_000, chrono::Utc::now()));
//!
//! let defaults = vec![MaintenanceType::new("Oil Change", 3000)];
//! let due = next_due_maintenance(&car, &defaults).unwrap();
//! assert_eq!(due.name, "Oil Change");
//! assert_eq!(due.miles_left, 1000);
//! ```

pub mod audit;
pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod due;
pub mod error;
pub mod logging;
pub mod models;
pub mod notify;
pub mod services;
pub mod storage;

pub use error::{MileMarkError, MileMarkResult};
