//! Configuration module for MileMark
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::MileMarkPaths;
pub use settings::Settings;
