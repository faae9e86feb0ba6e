//! Catalog service
//!
//! Upkeep of the shared default maintenance catalog.

use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{MileMarkError, MileMarkResult};
use crate::models::MaintenanceType;

use super::ServiceContext;

/// Service for the default maintenance catalog
pub struct CatalogService<'a> {
    ctx: ServiceContext<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service
    pub fn new(ctx: ServiceContext<'a>) -> Self {
        Self { ctx }
    }

    /// All default types, in catalog order
    pub fn list(&self) -> MileMarkResult<Vec<MaintenanceType>> {
        self.ctx.store.default_maintenance_types()
    }

    /// A default type by name (case-insensitive)
    pub fn find(&self, name: &str) -> MileMarkResult<Option<MaintenanceType>> {
        let name = name.trim();
        Ok(self.list()?.into_iter().find(|t| t.matches_name(name)))
    }

    /// Add a type to the shared catalog
    ///
    /// The name must not already be a default type, nor a custom type on any
    /// car in the store. The catalog is shared by every user, so a clash on
    /// anyone's car would give that car the same type twice.
    pub fn add(&self, name: &str, interval: u32) -> MileMarkResult<MaintenanceType> {
        let user = self.ctx.require_user()?;

        let maintenance_type = MaintenanceType::new(name.trim(), interval);
        maintenance_type
            .validate()
            .map_err(|e| MileMarkError::Validation(e.to_string()))?;

        let in_catalog = self.find(&maintenance_type.name)?.is_some();
        let on_a_car = self.ctx.store.custom_type_in_use(&maintenance_type.name)?;
        if in_catalog || on_a_car {
            return Err(MileMarkError::Duplicate {
                entity_type: "Maintenance type",
                identifier: maintenance_type.name,
            });
        }

        self.ctx
            .store
            .add_default_maintenance_type(maintenance_type.clone())?;
        self.ctx.record(
            user,
            AuditEntry::create(
                EntityType::MaintenanceType,
                "catalog",
                Some(maintenance_type.name.clone()),
                &maintenance_type,
            ),
        )?;
        info!(maintenance = %maintenance_type.name, "catalog type added");

        Ok(maintenance_type)
    }
}
