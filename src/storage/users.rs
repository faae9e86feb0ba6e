//! User repository for JSON storage
//!
//! Manages loading and saving user accounts to users.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MileMarkError;
use crate::models::{UserAccount, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable user data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<UserAccount>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, UserAccount>>,
    /// Index: normalized email -> user_id
    by_email: RwLock<HashMap<String, UserId>>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_email: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), MileMarkError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_email = self.by_email.write().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_email.clear();

        for user in file_data.users {
            by_email.insert(UserAccount::normalize_email(&user.profile.email), user.id);
            data.insert(user.id, user);
        }

        Ok(())
    }

    /// Save users to disk
    pub fn save(&self) -> Result<(), MileMarkError> {
        let data = self.data.read().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.profile.created_at.cmp(&b.profile.created_at));

        write_json_atomic(&self.path, &UserData { users })
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> Result<Option<UserAccount>, MileMarkError> {
        let data = self.data.read().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(&id).cloned())
    }

    /// Get a user by email (case-insensitive)
    pub fn get_by_email(&self, email: &str) -> Result<Option<UserAccount>, MileMarkError> {
        let data = self.data.read().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_email = self.by_email.read().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(by_email
            .get(&UserAccount::normalize_email(email))
            .and_then(|id| data.get(id))
            .cloned())
    }

    /// Insert or update a user
    pub fn upsert(&self, user: UserAccount) -> Result<(), MileMarkError> {
        let mut data = self.data.write().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_email = self.by_email.write().map_err(|e| {
            MileMarkError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(old) = data.get(&user.id) {
            by_email.remove(&UserAccount::normalize_email(&old.profile.email));
        }
        by_email.insert(UserAccount::normalize_email(&user.profile.email), user.id);

        data.insert(user.id, user);
        Ok(())
    }
}
