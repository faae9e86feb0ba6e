//! Reminder scheduling
//!
//! A reminder is fire-and-forget: it is scheduled once, a fixed delay ahead,
//! and fires once. `ReminderScheduler` is the surface services use;
//! `FileReminderScheduler` keeps the queue in reminders.json and fires
//! reminders when asked for the due ones.

mod scheduler;

pub use scheduler::FileReminderScheduler;

use chrono::{DateTime, Duration, Utc};

use crate::error::MileMarkResult;
use crate::models::{Car, CarId, Reminder};

/// Title of the "log your mileage" reminder
pub const MILEAGE_REMINDER_TITLE: &str = "Mileage Update Reminder";

/// Schedules one-shot reminders
pub trait ReminderScheduler {
    /// Schedule a reminder `delay` from now
    ///
    /// Returns `None` when notifications are turned off; nothing is queued.
    /// A delay that pushes the fire time out of range is a `Notification`
    /// error.
    fn schedule(
        &self,
        car_id: CarId,
        title: &str,
        body: &str,
        delay: Duration,
    ) -> MileMarkResult<Option<Reminder>>;

    /// Reminders that have not fired yet, earliest first
    fn pending(&self) -> MileMarkResult<Vec<Reminder>>;

    /// Fire every reminder for the given cars that is due at `now` and
    /// return them
    fn take_due_for(&self, car_ids: &[CarId], now: DateTime<Utc>) -> MileMarkResult<Vec<Reminder>>;

    /// Drop all reminders for a car
    fn cancel_for_car(&self, car_id: CarId) -> MileMarkResult<usize>;
}

/// Body text of the mileage reminder for a car
pub fn mileage_reminder_body(car: &Car) -> String {
    format!("Don't forget to log mileage for your {}.", car.display_name())
}
