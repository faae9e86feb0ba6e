//! File-backed identity provider

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::MileMarkPaths;
use crate::error::{MileMarkError, MileMarkResult};
use crate::models::{UserAccount, UserId, UserProfile};
use crate::storage::{read_json, write_json_atomic, UserRepository};

use super::password::{hash_password, verify_password, MIN_PASSWORD_LEN};
use super::{IdentityProvider, SignUp};

/// Contents of session.json
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Session {
    user_id: UserId,
    started_at: DateTime<Utc>,
}

/// Identity provider backed by users.json and session.json
pub struct LocalIdentityProvider {
    users: UserRepository,
    session_path: PathBuf,
    audit: AuditLogger,
}

impl LocalIdentityProvider {
    /// Create a provider over the given paths and load known accounts
    pub fn open(paths: &MileMarkPaths) -> MileMarkResult<Self> {
        paths.ensure_directories()?;
        let users = UserRepository::new(paths.users_file());
        users.load()?;
        Ok(Self {
            users,
            session_path: paths.session_file(),
            audit: AuditLogger::new(paths.audit_log()),
        })
    }

    fn start_session(&self, user_id: UserId) -> MileMarkResult<()> {
        let session = Session {
            user_id,
            started_at: Utc::now(),
        };
        write_json_atomic(&self.session_path, &session)
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn sign_up(&self, details: SignUp) -> MileMarkResult<UserId> {
        let email = details.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(MileMarkError::Validation(
                "A valid email address is required".into(),
            ));
        }
        if details.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(MileMarkError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        let full_name = details.full_name.trim();
        if full_name.is_empty() {
            return Err(MileMarkError::Validation("Full name cannot be empty".into()));
        }

        if self.users.get_by_email(email)?.is_some() {
            return Err(MileMarkError::Duplicate {
                entity_type: "User",
                identifier: email.to_string(),
            });
        }

        let profile = UserProfile {
            full_name: full_name.to_string(),
            phone_number: details.phone_number.trim().to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        let account = UserAccount::new(profile, hash_password(&details.password)?);
        let user_id = account.id;

        self.audit.log(
            &AuditEntry::create(
                EntityType::User,
                user_id.to_string(),
                Some(account.profile.full_name.clone()),
                &account.profile,
            )
            .by(user_id),
        )?;

        self.users.upsert(account)?;
        self.users.save()?;
        self.start_session(user_id)?;

        info!(user = %user_id, "signed up");
        Ok(user_id)
    }

    fn log_in(&self, email: &str, password: &str) -> MileMarkResult<UserId> {
        let invalid = || MileMarkError::AuthFailed("invalid email or password".into());

        let account = self.users.get_by_email(email)?.ok_or_else(invalid)?;
        if !verify_password(password, &account.password_hash)? {
            return Err(invalid());
        }

        self.start_session(account.id)?;
        info!(user = %account.id, "logged in");
        Ok(account.id)
    }

    fn log_out(&self) -> MileMarkResult<()> {
        if self.session_path.exists() {
            std::fs::remove_file(&self.session_path)
                .map_err(|e| MileMarkError::Io(format!("Failed to remove session: {}", e)))?;
            info!("logged out");
        }
        Ok(())
    }

    fn current_user(&self) -> MileMarkResult<Option<UserId>> {
        let session: Option<Session> = read_json(&self.session_path)?;
        let Some(session) = session else {
            return Ok(None);
        };

        // A session for an account that no longer exists is no session
        Ok(self
            .users
            .get(session.user_id)?
            .map(|account| account.id))
    }

    fn profile(&self, user: UserId) -> MileMarkResult<Option<UserProfile>> {
        Ok(self.users.get(user)?.map(|account| account.profile))
    }
}
