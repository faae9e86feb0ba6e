//! Auth CLI commands
//!
//! Sign up, log in, log out and show who is signed in.

use clap::Subcommand;

use crate::auth::{IdentityProvider, SignUp};
use crate::error::{MileMarkError, MileMarkResult};

/// Auth subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account and sign in
    Signup {
        /// Email address
        email: String,
        /// Full name
        #[arg(short, long)]
        name: String,
        /// Phone number
        #[arg(short, long, default_value = "")]
        phone: String,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign in to an existing account
    Login {
        /// Email address
        email: String,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

/// Handle an auth command
pub fn handle_auth_command(identity: &dyn IdentityProvider, cmd: AuthCommands) -> MileMarkResult<()> {
    match cmd {
        AuthCommands::Signup {
            email,
            name,
            phone,
            password,
        } => {
            let password = match password {
                Some(password) => password,
                None => {
                    let first = read_password("Choose a password: ")?;
                    let confirm = read_password("Confirm password: ")?;
                    if first != confirm {
                        return Err(MileMarkError::Validation("Passwords do not match".into()));
                    }
                    first
                }
            };

            let user = identity.sign_up(SignUp {
                email,
                password,
                full_name: name,
                phone_number: phone,
            })?;

            if let Some(profile) = identity.profile(user)? {
                println!("Welcome, {}! You are now signed in.", profile.full_name);
            }
            println!("  User ID: {}", user);
        }

        AuthCommands::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password("Password: ")?,
            };

            let user = identity.log_in(&email, &password)?;
            let name = identity
                .profile(user)?
                .map(|p| p.full_name)
                .unwrap_or_else(|| email.clone());
            println!("Signed in as {}", name);
        }

        AuthCommands::Logout => {
            identity.log_out()?;
            println!("Signed out.");
        }

        AuthCommands::Whoami => match identity.current_user()? {
            Some(user) => {
                let profile = identity
                    .profile(user)?
                    .ok_or_else(|| MileMarkError::user_not_found(user.to_string()))?;
                println!("{}", profile.full_name);
                println!("  Email: {}", profile.email);
                if !profile.phone_number.is_empty() {
                    println!("  Phone: {}", profile.phone_number);
                }
                println!("  User ID: {}", user);
            }
            None => println!("Not signed in."),
        },
    }

    Ok(())
}

fn read_password(prompt: &str) -> MileMarkResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| MileMarkError::Io(format!("Failed to read password: {}", e)))
}
