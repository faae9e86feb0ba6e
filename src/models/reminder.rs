//! One-shot reminders

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CarId, ReminderId};

/// A reminder that fires once, a fixed delay after it was scheduled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub car_id: CarId,
    pub title: String,
    pub body: String,
    pub scheduled_at: DateTime<Utc>,
    pub fire_at: DateTime<Utc>,
    #[serde(default)]
    pub fired: bool,
}

impl Reminder {
    /// A reminder firing `delay` after `scheduled_at`
    ///
    /// Returns `None` when the fire time falls outside the representable range.
    pub fn new(
        car_id: CarId,
        title: impl Into<String>,
        body: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        delay: Duration,
    ) -> Option<Self> {
        let fire_at = scheduled_at.checked_add_signed(delay)?;
        Some(Self {
            id: ReminderId::new(),
            car_id,
            title: title.into(),
            body: body.into(),
            scheduled_at,
            fire_at,
            fired: false,
        })
    }

    /// Whether the reminder should fire at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.fired && self.fire_at <= now
    }
}
