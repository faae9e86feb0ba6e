//! Storage initialization
//!
//! Handles first-run setup and seeding of the default maintenance catalog

use tracing::info;

use crate::config::paths::MileMarkPaths;
use crate::error::MileMarkError;
use crate::models::MaintenanceType;

use super::catalog::CatalogData;
use super::file_io::write_json_atomic;

/// Default maintenance types and their intervals in miles
pub const DEFAULT_MAINTENANCE: &[(&str, u32)] = &[
    ("Oil Change", 3_000),
    ("Tire Rotation", 6_000),
    ("Air Filter", 15_000),
    ("Cabin Air Filter", 15_000),
    ("Brake Inspection", 20_000),
    ("Coolant Flush", 30_000),
    ("Spark Plugs", 30_000),
    ("Transmission Fluid", 60_000),
];

/// The built-in maintenance catalog
pub fn default_maintenance_types() -> Vec<MaintenanceType> {
    DEFAULT_MAINTENANCE
        .iter()
        .map(|(name, interval)| MaintenanceType::new(*name, *interval))
        .collect()
}

/// Initialize storage for a fresh installation
///
/// Creates the data directory and seeds the maintenance catalog if missing
pub fn initialize_storage(paths: &MileMarkPaths) -> Result<(), MileMarkError> {
    paths.ensure_directories()?;

    if !paths.catalog_file().exists() {
        let data = CatalogData {
            maintenance_types: default_maintenance_types(),
        };
        write_json_atomic(paths.catalog_file(), &data)?;
        info!(
            count = data.maintenance_types.len(),
            "seeded default maintenance catalog"
        );
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &MileMarkPaths) -> bool {
    !paths.catalog_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage_seeds_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MileMarkPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();
        assert!(!needs_initialization(&paths));

        let content = std::fs::read_to_string(paths.catalog_file()).unwrap();
        let data: CatalogData = serde_json::from_str(&content).unwrap();
        assert_eq!(data.maintenance_types.len(), DEFAULT_MAINTENANCE.len());
        assert_eq!(data.maintenance_types[0], MaintenanceType::new("Oil Change", 3000));
    }

    #[test]
    fn test_default_names_are_unique_and_valid() {
        let types = default_maintenance_types();
        for (i, t) in types.iter().enumerate() {
            assert!(t.validate().is_ok());
            assert!(types[i + 1..].iter().all(|other| !other.matches_name(&t.name)));
        }
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MileMarkPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();

        let custom = CatalogData {
            maintenance_types: vec![MaintenanceType::new("Timing Belt", 90_000)],
        };
        write_json_atomic(paths.catalog_file(), &custom).unwrap();

        initialize_storage(&paths).unwrap();

        let content = std::fs::read_to_string(paths.catalog_file()).unwrap();
        let data: CatalogData = serde_json::from_str(&content).unwrap();
        assert_eq!(data.maintenance_types.len(), 1);
        assert_eq!(data.maintenance_types[0].name, "Timing Belt");
    }
}
