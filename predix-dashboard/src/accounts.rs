//! Operator accounts
//!
//! Passwords are stored as argon2 PHC strings. Emails are matched
//! case-insensitively after trimming.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// A registered operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub company: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Sign-up form input
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub company: String,
    pub terms_accepted: bool,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Registered accounts
#[derive(Debug, Clone, Default)]
pub struct Accounts {
    users: Vec<User>,
}

impl Accounts {
    pub fn from_users(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Create an account
    ///
    /// All checks run before hashing; a rejected form leaves the accounts
    /// untouched.
    pub fn signup(&mut self, form: &SignupForm, now: DateTime<Utc>) -> DashboardResult<&User> {
        let first_name = form.first_name.trim();
        let last_name = form.last_name.trim();
        let email = normalize_email(&form.email);

        if first_name.is_empty() || last_name.is_empty() || email.is_empty() || form.password.is_empty() {
            return Err(DashboardError::Validation("Please fill in all required fields.".into()));
        }
        if !email.contains('@') {
            return Err(DashboardError::Validation("Please enter a valid email address.".into()));
        }
        if form.password != form.confirm_password {
            return Err(DashboardError::Validation("Passwords do not match. Please try again.".into()));
        }
        if !form.terms_accepted {
            return Err(DashboardError::Validation(
                "Please agree to the Terms & Conditions to continue.".into(),
            ));
        }
        if self.find(&email).is_some() {
            return Err(DashboardError::Validation(
                "An account with this email already exists. Please use a different email or try logging in.".into(),
            ));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(form.password.as_bytes(), &salt)
            .map_err(|e| DashboardError::PasswordHash(e.to_string()))?
            .to_string();

        let id = self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        self.users.push(User {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email,
            password_hash,
            company: form.company.trim().to_string(),
            created_at: now,
        });
        log::info!("account #{} created", id);

        Ok(&self.users[self.users.len() - 1])
    }

    /// Check credentials
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub fn login(&self, email: &str, password: &str) -> DashboardResult<&User> {
        let user = self.find(&normalize_email(email)).ok_or(DashboardError::InvalidCredentials)?;

        let parsed_hash = match PasswordHash::new(&user.password_hash) {
            Ok(hash) => hash,
            Err(e) => {
                log::warn!("account #{} has an unreadable password hash: {}", user.id, e);
                return Err(DashboardError::InvalidCredentials);
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| DashboardError::InvalidCredentials)?;

        Ok(user)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    fn find(&self, normalized_email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == normalized_email)
    }
}
