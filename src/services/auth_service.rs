//! Demo-local authentication. Nothing here talks to a backend; the point is
//! a current-user record in the local store so the dashboard can greet the
//! user and gate its screens.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;

use crate::models::user::CurrentUser;
use crate::storage::KeyValueStore;

const USER_KEY: &str = "user";
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug)]
pub enum AuthError {
    Validation(String),
    InvalidCredentials,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Validation(msg) => write!(f, "{}", msg),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
        }
    }
}

impl std::error::Error for AuthError {}

pub struct AuthService {
    store: Arc<dyn KeyValueStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn signup(&self, email: &str, password: &str, name: &str) -> Result<CurrentUser, AuthError> {
        validate_credentials(email, password)?;
        if name.trim().is_empty() {
            return Err(AuthError::Validation(
                "Name is required for signup".to_string(),
            ));
        }

        Ok(self.store_user(email, password, name.trim()))
    }

    /// Local sign-in. When a record for the same email already exists the
    /// password must verify against its hash; any other email starts a
    /// fresh demo session.
    pub fn signin(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        validate_credentials(email, password)?;

        if let Some(existing) = self.current_user() {
            if existing.email == email {
                if bcrypt::verify(password, &existing.password).unwrap_or(false) {
                    return Ok(existing);
                }
                return Err(AuthError::InvalidCredentials);
            }
        }

        let name = email.split('@').next().unwrap_or(email).to_string();
        Ok(self.store_user(email, password, &name))
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.store
            .read(USER_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    pub fn logout(&self) {
        self.store.remove(USER_KEY);
    }

    fn store_user(&self, email: &str, password: &str, name: &str) -> CurrentUser {
        let user = CurrentUser {
            email: email.to_string(),
            name: name.to_string(),
            password: bcrypt::hash(password, bcrypt::DEFAULT_COST).unwrap_or("".to_string()),
            created_at: Utc::now(),
        };

        match serde_json::to_string(&user) {
            Ok(raw) => self.store.write(USER_KEY, &raw),
            Err(e) => eprintln!("Failed to serialize current user: {}", e),
        }

        user
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::Validation(
            "Please fill in all fields".to_string(),
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryStore;

    fn service() -> AuthService {
        AuthService::new(Arc::new(InMemoryStore::new()))
    }

    #[test]
    fn signup_requires_all_fields() {
        let auth = service();
        assert!(auth.signup("", "demo123", "Demo").is_err());
        assert!(auth.signup("demo@example.com", "", "Demo").is_err());
        assert!(auth.signup("demo@example.com", "demo123", "").is_err());
        assert!(auth.signup("demo@example.com", "short", "Demo").is_err());
    }

    #[test]
    fn signup_stores_a_hashed_password() {
        let auth = service();
        let user = auth
            .signup("demo@example.com", "demo123", "Demo User")
            .expect("valid signup");

        assert_eq!(user.name, "Demo User");
        assert_ne!(user.password, "demo123");
        assert!(bcrypt::verify("demo123", &user.password).unwrap());
    }

    #[test]
    fn signin_derives_display_name_from_email() {
        let auth = service();
        let user = auth
            .signin("ravi@example.com", "demo123")
            .expect("valid signin");
        assert_eq!(user.name, "ravi");
    }

    #[test]
    fn signin_verifies_against_an_existing_record() {
        let auth = service();
        auth.signup("demo@example.com", "demo123", "Demo User")
            .expect("valid signup");

        assert!(auth.signin("demo@example.com", "demo123").is_ok());
        assert!(matches!(
            auth.signin("demo@example.com", "wrong-pass"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn session_reads_back_and_logout_clears() {
        let auth = service();
        assert!(auth.current_user().is_none());

        auth.signup("demo@example.com", "demo123", "Demo User")
            .expect("valid signup");
        let session = auth.current_user().expect("session should exist");
        assert_eq!(session.email, "demo@example.com");

        auth.logout();
        assert!(auth.current_user().is_none());
    }
}
