//! Default maintenance catalog repository
//!
//! The catalog holds the maintenance types shared by every car. It is kept in
//! catalog.json in the order the entries were added.

use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::MileMarkError;
use crate::models::MaintenanceType;

use super::file_io::{read_json, write_json_atomic};

/// Serializable catalog data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CatalogData {
    pub maintenance_types: Vec<MaintenanceType>,
}

/// Repository for the shared maintenance catalog
pub struct CatalogRepository {
    path: PathBuf,
    data: RwLock<Vec<MaintenanceType>>,
}

impl CatalogRepository {
    /// Create a new catalog repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load the catalog from disk
    pub fn load(&self) -> Result<(), MileMarkError> {
        let file_data: CatalogData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data.maintenance_types;

        debug!(count = data.len(), "loaded maintenance catalog");
        Ok(())
    }

    /// Save the catalog to disk
    pub fn save(&self) -> Result<(), MileMarkError> {
        let data = self.data.read().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = CatalogData {
            maintenance_types: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All default maintenance types, in catalog order
    pub fn get_all(&self) -> Result<Vec<MaintenanceType>, MileMarkError> {
        let data = self.data.read().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    /// Add a type to the end of the catalog
    pub fn push(&self, maintenance_type: MaintenanceType) -> Result<(), MileMarkError> {
        let mut data = self.data.write().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.push(maintenance_type);
        Ok(())
    }
}
