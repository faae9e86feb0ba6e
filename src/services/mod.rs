//! Service layer for MileMark
//!
//! The service layer provides business logic on top of the collaborators,
//! handling validation, ownership checks, audit logging and reminders.
//! Services reach the record store, identity provider and reminder scheduler
//! only through their traits.

pub mod car;
pub mod catalog;
pub mod dashboard;
pub mod maintenance;
pub mod reminder;

pub use car::{CarEdit, CarService};
pub use catalog::CatalogService;
pub use dashboard::{CarSummary, Dashboard, DashboardService};
pub use maintenance::MaintenanceService;
pub use reminder::{ReminderService, UpcomingReminder};

use crate::audit::{AuditEntry, AuditLogger};
use crate::auth::IdentityProvider;
use crate::config::Settings;
use crate::error::{MileMarkError, MileMarkResult};
use crate::models::{Car, CarId, UserId};
use crate::notify::ReminderScheduler;
use crate::storage::VehicleStore;

/// Collaborators shared by every service
#[derive(Clone, Copy)]
pub struct ServiceContext<'a> {
    pub store: &'a dyn VehicleStore,
    pub identity: &'a dyn IdentityProvider,
    pub reminders: &'a dyn ReminderScheduler,
    pub audit: &'a AuditLogger,
    pub settings: &'a Settings,
}

impl<'a> ServiceContext<'a> {
    /// The signed-in user, or `NotAuthenticated`
    pub fn require_user(&self) -> MileMarkResult<UserId> {
        self.identity
            .current_user()?
            .ok_or(MileMarkError::NotAuthenticated)
    }

    /// A car owned by the signed-in user, or `NotFound`
    pub fn owned_car(&self, id: CarId) -> MileMarkResult<(UserId, Car)> {
        let user = self.require_user()?;
        let car = self
            .store
            .get_car(user, id)?
            .ok_or_else(|| MileMarkError::car_not_found(id.to_string()))?;
        Ok((user, car))
    }

    /// Append an entry to the audit log on behalf of `user`
    pub fn record(&self, user: UserId, entry: AuditEntry) -> MileMarkResult<()> {
        self.audit.log(&entry.by(user))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A signed-in user over temp-dir backed collaborators

    use tempfile::TempDir;

    use super::ServiceContext;
    use crate::audit::AuditLogger;
    use crate::auth::{IdentityProvider, LocalIdentityProvider, SignUp};
    use crate::config::{MileMarkPaths, Settings};
    use crate::models::UserId;
    use crate::notify::FileReminderScheduler;
    use crate::storage::{initialize_storage, Storage};

    pub struct Harness {
        pub _temp: TempDir,
        pub storage: Storage,
        pub identity: LocalIdentityProvider,
        pub reminders: FileReminderScheduler,
        pub settings: Settings,
        pub user: UserId,
    }

    impl Harness {
        pub fn new() -> Self {
            Self::with_settings(Settings::default())
        }

        pub fn with_settings(settings: Settings) -> Self {
            let temp = TempDir::new().unwrap();
            let paths = MileMarkPaths::with_base_dir(temp.path().to_path_buf());
            initialize_storage(&paths).unwrap();

            let mut storage = Storage::new(paths.clone()).unwrap();
            storage.load_all().unwrap();
            let identity = LocalIdentityProvider::open(&paths).unwrap();
            let reminders =
                FileReminderScheduler::open(&paths, settings.notifications_enabled).unwrap();

            let user = identity
                .sign_up(SignUp {
                    email: "driver@example.com".into(),
                    password: "secret-pass".into(),
                    full_name: "Alex Driver".into(),
                    phone_number: "555-0123".into(),
                })
                .unwrap();

            Self {
                _temp: temp,
                storage,
                identity,
                reminders,
                settings,
                user,
            }
        }

        pub fn ctx(&self) -> ServiceContext<'_> {
            ServiceContext {
                store: &self.storage,
                identity: &self.identity,
                reminders: &self.reminders,
                audit: self.storage.audit(),
                settings: &self.settings,
            }
        }

        pub fn audit(&self) -> &AuditLogger {
            self.storage.audit()
        }
    }
}
