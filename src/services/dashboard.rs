//! Dashboard service
//!
//! The signed-in user's profile and, per car, the nearest maintenance task.

use crate::due::{self, DueMaintenance};
use crate::error::{MileMarkError, MileMarkResult};
use crate::models::{Car, UserProfile};

use super::ServiceContext;

/// One car on the dashboard
#[derive(Debug, Clone)]
pub struct CarSummary {
    pub car: Car,
    /// `None` until something has been logged for the car
    pub next_due: Option<DueMaintenance>,
}

/// Everything the dashboard shows
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub profile: UserProfile,
    pub cars: Vec<CarSummary>,
}

impl Dashboard {
    /// Cars whose nearest task is already overdue
    pub fn overdue_count(&self) -> usize {
        self.cars
            .iter()
            .filter(|s| s.next_due.as_ref().is_some_and(DueMaintenance::is_overdue))
            .count()
    }
}

/// Service that assembles the dashboard
pub struct DashboardService<'a> {
    ctx: ServiceContext<'a>,
}

impl<'a> DashboardService<'a> {
    /// Create a new dashboard service
    pub fn new(ctx: ServiceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Build the dashboard for the signed-in user
    pub fn build(&self) -> MileMarkResult<Dashboard> {
        let user = self.ctx.require_user()?;
        let profile = self
            .ctx
            .identity
            .profile(user)?
            .ok_or_else(|| MileMarkError::user_not_found(user.to_string()))?;

        // Fetch the catalog once and reuse it for every car
        let defaults = self.ctx.store.default_maintenance_types()?;
        let cars = self
            .ctx
            .store
            .list_cars(user)?
            .into_iter()
            .map(|car| {
                let next_due = due::next_due_maintenance(&car, &defaults);
                CarSummary { car, next_due }
            })
            .collect();

        Ok(Dashboard { profile, cars })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::Harness;
    use crate::services::{CarService, MaintenanceService};

    #[test]
    fn test_dashboard_rows() {
        let h = Harness::new();
        let cars = CarService::new(h.ctx());
        let civic = cars.add("Honda", "Civic", "2020", 14_000).unwrap();
        cars.add("Toyota", "Corolla", "2016", 80_000).unwrap();

        MaintenanceService::new(h.ctx())
            .log(civic.id, "Oil Change", Some(10_000), None)
            .unwrap();

        let dashboard = DashboardService::new(h.ctx()).build().unwrap();
        assert_eq!(dashboard.profile.full_name, "Alex Driver");
        assert_eq!(dashboard.cars.len(), 2);

        let civic_row = dashboard
            .cars
            .iter()
            .find(|s| s.car.id == civic.id)
            .unwrap();
        assert_eq!(civic_row.next_due.as_ref().unwrap().miles_left, -1_000);

        let corolla_row = dashboard
            .cars
            .iter()
            .find(|s| s.car.id != civic.id)
            .unwrap();
        assert!(corolla_row.next_due.is_none());
        assert_eq!(dashboard.overdue_count(), 1);
    }

    #[test]
    fn test_empty_dashboard() {
        let h = Harness::new();
        let dashboard = DashboardService::new(h.ctx()).build().unwrap();
        assert!(dashboard.cars.is_empty());
        assert_eq!(dashboard.overdue_count(), 0);
    }
}
