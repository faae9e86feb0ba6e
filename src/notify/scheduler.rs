//! File-backed reminder queue

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::config::paths::MileMarkPaths;
use crate::error::{MileMarkError, MileMarkResult};
use crate::models::{CarId, Reminder};
use crate::storage::ReminderRepository;

use super::ReminderScheduler;

/// Reminder scheduler that keeps its queue in reminders.json
pub struct FileReminderScheduler {
    reminders: ReminderRepository,
    enabled: bool,
}

impl FileReminderScheduler {
    /// Open the queue; `enabled` mirrors the notifications setting
    pub fn open(paths: &MileMarkPaths, enabled: bool) -> MileMarkResult<Self> {
        let reminders = ReminderRepository::new(paths.reminders_file());
        reminders.load()?;
        Ok(Self { reminders, enabled })
    }

    /// All reminders, fired or not
    pub fn all(&self) -> MileMarkResult<Vec<Reminder>> {
        self.reminders.get_all()
    }

    fn fire_matching(
        &self,
        now: DateTime<Utc>,
        wanted: impl Fn(&Reminder) -> bool,
    ) -> MileMarkResult<Vec<Reminder>> {
        let due: Vec<_> = self
            .reminders
            .get_all()?
            .into_iter()
            .filter(|r| r.is_due(now) && wanted(r))
            .map(|mut r| {
                r.fired = true;
                r
            })
            .collect();

        if due.is_empty() {
            return Ok(due);
        }

        for reminder in &due {
            self.reminders.upsert(reminder.clone())?;
        }
        self.reminders.save()?;
        debug!(count = due.len(), "reminders fired");
        Ok(due)
    }
}

impl ReminderScheduler for FileReminderScheduler {
    fn schedule(
        &self,
        car_id: CarId,
        title: &str,
        body: &str,
        delay: Duration,
    ) -> MileMarkResult<Option<Reminder>> {
        if !self.enabled {
            debug!(car = %car_id, "notifications disabled, reminder not scheduled");
            return Ok(None);
        }

        let reminder = Reminder::new(car_id, title, body, Utc::now(), delay).ok_or_else(|| {
            MileMarkError::Notification(format!(
                "reminder delay of {} days is out of range",
                delay.num_days()
            ))
        })?;
        self.reminders.upsert(reminder.clone())?;
        self.reminders.save()?;

        info!(
            car = %car_id,
            fire_at = %reminder.fire_at,
            "reminder scheduled"
        );
        Ok(Some(reminder))
    }

    fn pending(&self) -> MileMarkResult<Vec<Reminder>> {
        Ok(self
            .reminders
            .get_all()?
            .into_iter()
            .filter(|r| !r.fired)
            .collect())
    }

    fn take_due_for(&self, car_ids: &[CarId], now: DateTime<Utc>) -> MileMarkResult<Vec<Reminder>> {
        self.fire_matching(now, |r| car_ids.contains(&r.car_id))
    }

    fn cancel_for_car(&self, car_id: CarId) -> MileMarkResult<usize> {
        let removed = self.reminders.delete_for_car(car_id)?;
        if removed > 0 {
            self.reminders.save()?;
        }
        Ok(removed)
    }
}
