//! Session and identity
//!
//! `IdentityProvider` is the narrow surface the rest of the crate uses to find
//! out who is signed in. `LocalIdentityProvider` implements it with accounts
//! in users.json, Argon2 password hashes and a session file.

mod local;
pub mod password;

pub use local::LocalIdentityProvider;

use crate::error::MileMarkResult;
use crate::models::{UserId, UserProfile};

/// Details collected at sign-up
#[derive(Debug, Clone)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone_number: String,
}

/// Issues the user identity that scopes every store query
pub trait IdentityProvider {
    /// Register a new account and start a session for it
    fn sign_up(&self, details: SignUp) -> MileMarkResult<UserId>;

    /// Start a session for an existing account
    fn log_in(&self, email: &str, password: &str) -> MileMarkResult<UserId>;

    /// End the current session, if any
    fn log_out(&self) -> MileMarkResult<()>;

    /// The signed-in user, if any
    fn current_user(&self) -> MileMarkResult<Option<UserId>>;

    /// Profile details for a user
    fn profile(&self, user: UserId) -> MileMarkResult<Option<UserProfile>>;
}
