//! Reminder service
//!
//! Lists the signed-in user's queued reminders and fires the ones that are due.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::MileMarkResult;
use crate::models::{CarId, Reminder};

use super::ServiceContext;

/// A reminder together with the name of the car it is about
#[derive(Debug, Clone)]
pub struct UpcomingReminder {
    pub reminder: Reminder,
    pub car_name: String,
}

/// Service for the user's reminders
pub struct ReminderService<'a> {
    ctx: ServiceContext<'a>,
}

impl<'a> ReminderService<'a> {
    /// Create a new reminder service
    pub fn new(ctx: ServiceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Unfired reminders for the user's cars, earliest first
    pub fn pending(&self) -> MileMarkResult<Vec<UpcomingReminder>> {
        let names = self.car_names()?;
        Ok(self
            .ctx
            .reminders
            .pending()?
            .into_iter()
            .filter_map(|reminder| with_car_name(&names, reminder))
            .collect())
    }

    /// Fire every reminder due at `now` for the user's cars
    ///
    /// Reminders for other users' cars are left in the queue.
    pub fn fire_due(&self, now: DateTime<Utc>) -> MileMarkResult<Vec<UpcomingReminder>> {
        let names = self.car_names()?;
        let car_ids: Vec<CarId> = names.keys().copied().collect();

        let fired: Vec<_> = self
            .ctx
            .reminders
            .take_due_for(&car_ids, now)?
            .into_iter()
            .filter_map(|reminder| with_car_name(&names, reminder))
            .collect();

        if !fired.is_empty() {
            info!(count = fired.len(), "reminders fired");
        }
        Ok(fired)
    }

    fn car_names(&self) -> MileMarkResult<HashMap<CarId, String>> {
        let user = self.ctx.require_user()?;
        Ok(self
            .ctx
            .store
            .list_cars(user)?
            .into_iter()
            .map(|car| (car.id, car.full_name()))
            .collect())
    }
}

fn with_car_name(names: &HashMap<CarId, String>, reminder: Reminder) -> Option<UpcomingReminder> {
    let car_name = names.get(&reminder.car_id)?.clone();
    Some(UpcomingReminder { reminder, car_name })
}
