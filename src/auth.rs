//! Mock authentication.
//!
//! The user directory is a fixed two-entry table and every account shares the
//! same password. This is a placeholder for demonstration, not a security
//! boundary. `AuthSession` holds the current identity and always starts out
//! anonymous.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{Role, UserStatus};

/// The password accepted for every directory entry.
pub const SHARED_PASSWORD: &str = "123456";
/// Minimum password length enforced by the sign-up form.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub status: UserStatus,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

/// The fixed set of known accounts.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::mock()
    }
}

impl UserDirectory {
    pub fn mock() -> Self {
        UserDirectory {
            users: vec![
                User {
                    id: "1".to_string(),
                    name: "João Silva".to_string(),
                    email: "joao@example.com".to_string(),
                    avatar: None,
                    status: UserStatus::Online,
                    role: Role::Admin,
                    created_at: day(2024, 1, 15),
                },
                User {
                    id: "2".to_string(),
                    name: "Maria Santos".to_string(),
                    email: "maria@example.com".to_string(),
                    avatar: None,
                    status: UserStatus::Online,
                    role: Role::Member,
                    created_at: day(2024, 1, 20),
                },
            ],
        }
    }

    pub fn all_users(&self) -> &[User] {
        &self.users
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Exact email match plus the shared password.
    pub fn verify(&self, email: &str, password: &str) -> Result<&User, AuthError> {
        match self.find_by_email(email) {
            Some(user) if password == SHARED_PASSWORD => Ok(user),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

/// Who is signed in, if anyone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthSession {
    user: Option<User>,
}

impl AuthSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Sign in. A failed attempt leaves the current state untouched.
    pub fn login(&mut self, directory: &UserDirectory, email: &str, password: &str) -> Result<&User, AuthError> {
        let user = match directory.verify(email, password) {
            Ok(user) => user.clone(),
            Err(e) => {
                tracing::info!(email, "login rejected");
                return Err(e);
            }
        };
        tracing::info!(email, role = ?user.role, "login");
        Ok(&*self.user.insert(user))
    }

    pub fn logout(&mut self) -> Option<User> {
        let previous = self.user.take();
        if let Some(ref user) = previous {
            tracing::info!(email = %user.email, "logout");
        }
        previous
    }
}

/// Validate the sign-up form. Registration itself is simulated.
pub fn validate_registration(password: &str, confirm: &str) -> Result<(), AuthError> {
    if password != confirm {
        return Err(AuthError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_as_admin() {
        let directory = UserDirectory::mock();
        let mut session = AuthSession::anonymous();
        let user = session.login(&directory, "joao@example.com", "123456").unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.name, "João Silva");
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_rejected_credentials_stay_anonymous() {
        let directory = UserDirectory::mock();
        let mut session = AuthSession::anonymous();
        for (email, password) in [
            ("joao@example.com", "654321"),
            ("JOAO@example.com", "123456"),
            ("nobody@example.com", "123456"),
            ("", ""),
        ] {
            assert_eq!(
                session.login(&directory, email, password),
                Err(AuthError::InvalidCredentials)
            );
            assert!(!session.is_authenticated());
        }
    }

    #[test]
    fn test_failed_login_keeps_existing_user() {
        let directory = UserDirectory::mock();
        let mut session = AuthSession::anonymous();
        session.login(&directory, "maria@example.com", "123456").unwrap();
        assert!(session.login(&directory, "joao@example.com", "bad").is_err());
        assert_eq!(session.user().map(|u| u.email.as_str()), Some("maria@example.com"));
    }

    #[test]
    fn test_logout_returns_to_anonymous() {
        let directory = UserDirectory::mock();
        let mut session = AuthSession::anonymous();
        session.login(&directory, "maria@example.com", "123456").unwrap();
        let previous = session.logout();
        assert_eq!(previous.map(|u| u.role), Some(Role::Member));
        assert!(!session.is_authenticated());
        assert_eq!(session.logout(), None);
    }

    #[test]
    fn test_registration_validation() {
        assert_eq!(validate_registration("abcdef", "abcdeg"), Err(AuthError::PasswordMismatch));
        assert_eq!(validate_registration("abc", "abc"), Err(AuthError::PasswordTooShort));
        assert_eq!(validate_registration("abcdef", "abcdef"), Ok(()));
    }

    #[test]
    fn test_directory_dates() {
        let directory = UserDirectory::mock();
        assert_eq!(directory.all_users().len(), 2);
        let maria = directory.find_by_id("2").unwrap();
        assert_eq!(maria.created_at.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
    }
}
