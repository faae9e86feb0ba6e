//! Reminder repository for JSON storage
//!
//! Manages loading and saving scheduled reminders to reminders.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MileMarkError;
use crate::models::{CarId, Reminder, ReminderId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable reminder data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ReminderData {
    reminders: Vec<Reminder>,
}

/// Repository for reminder persistence
pub struct ReminderRepository {
    path: PathBuf,
    data: RwLock<HashMap<ReminderId, Reminder>>,
}

impl ReminderRepository {
    /// Create a new reminder repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load reminders from disk
    pub fn load(&self) -> Result<(), MileMarkError> {
        let file_data: ReminderData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for reminder in file_data.reminders {
            data.insert(reminder.id, reminder);
        }
        Ok(())
    }

    /// Save reminders to disk
    pub fn save(&self) -> Result<(), MileMarkError> {
        let data = self.data.read().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        write_json_atomic(
            &self.path,
            &ReminderData {
                reminders: sorted_by_fire_time(data.values().cloned().collect()),
            },
        )
    }

    /// All reminders, earliest fire time first
    pub fn get_all(&self) -> Result<Vec<Reminder>, MileMarkError> {
        let data = self.data.read().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(sorted_by_fire_time(data.values().cloned().collect()))
    }

    /// Insert or update a reminder
    pub fn upsert(&self, reminder: Reminder) -> Result<(), MileMarkError> {
        let mut data = self.data.write().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(reminder.id, reminder);
        Ok(())
    }

    /// Remove every reminder for a car, returning how many were removed
    pub fn delete_for_car(&self, car_id: CarId) -> Result<usize, MileMarkError> {
        let mut data = self.data.write().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let before = data.len();
        data.retain(|_, r| r.car_id != car_id);
        Ok(before - data.len())
    }
}

fn sorted_by_fire_time(mut reminders: Vec<Reminder>) -> Vec<Reminder> {
    reminders.sort_by(|a, b| a.fire_at.cmp(&b.fire_at));
    reminders
}
