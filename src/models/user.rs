//! User accounts and profiles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Public profile details for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A locally registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: UserId,

    /// Argon2 hash in PHC string format
    pub password_hash: String,

    pub profile: UserProfile,
}

impl UserAccount {
    pub fn new(profile: UserProfile, password_hash: String) -> Self {
        Self {
            id: UserId::new(),
            password_hash,
            profile,
        }
    }

    /// Normalize an email for lookups
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}
