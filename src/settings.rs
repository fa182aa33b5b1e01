//! Account settings forms. These are validated but nothing is persisted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{User, MIN_PASSWORD_LEN};
use crate::fields::Role;
use crate::task::non_blank;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("name is required")]
    EmptyName,
    #[error("email is required")]
    EmptyEmail,
    #[error("current password is required")]
    MissingCurrentPassword,
    #[error("new passwords do not match")]
    PasswordMismatch,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    En,
    Es,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Pt, Language::En, Language::Es];

    pub fn label(self) -> &'static str {
        match self {
            Language::Pt => "Português",
            Language::En => "English",
            Language::Es => "Español",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            Language::Pt => Language::En,
            Language::En => Language::Es,
            Language::Es => Language::Pt,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::Pt => "pt",
            Language::En => "en",
            Language::Es => "es",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasswordField {
    #[default]
    Current,
    New,
    Confirm,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordForm {
    pub current: String,
    pub new: String,
    pub confirm: String,
    pub show_current: bool,
    pub show_new: bool,
    pub show_confirm: bool,
}

impl PasswordForm {
    pub fn toggle_visibility(&mut self, field: PasswordField) {
        let flag = match field {
            PasswordField::Current => &mut self.show_current,
            PasswordField::New => &mut self.show_new,
            PasswordField::Confirm => &mut self.show_confirm,
        };
        *flag = !*flag;
    }

    /// The value as it should be displayed, masked unless revealed.
    pub fn display(&self, field: PasswordField) -> String {
        let (value, shown) = match field {
            PasswordField::Current => (&self.current, self.show_current),
            PasswordField::New => (&self.new, self.show_new),
            PasswordField::Confirm => (&self.confirm, self.show_confirm),
        };
        if shown {
            value.clone()
        } else {
            "•".repeat(value.chars().count())
        }
    }

    fn clear(&mut self) {
        self.current.clear();
        self.new.clear();
        self.confirm.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub language: Language,
    pub push_notifications: bool,
    pub email_notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            language: Language::Pt,
            push_notifications: true,
            email_notifications: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPage {
    pub profile: ProfileForm,
    pub password: PasswordForm,
    pub preferences: Preferences,
    pub role: Option<Role>,
    pub member_since: Option<DateTime<Utc>>,
}

impl SettingsPage {
    /// Prefill from the signed-in user, or leave blank when anonymous.
    pub fn for_user(user: Option<&User>) -> Self {
        SettingsPage {
            profile: ProfileForm {
                name: user.map(|u| u.name.clone()).unwrap_or_default(),
                email: user.map(|u| u.email.clone()).unwrap_or_default(),
            },
            password: PasswordForm::default(),
            preferences: Preferences::default(),
            role: user.map(|u| u.role),
            member_since: user.map(|u| u.created_at),
        }
    }

    pub fn save_profile(&mut self) -> Result<(), SettingsError> {
        let name = non_blank(&self.profile.name).ok_or(SettingsError::EmptyName)?;
        let email = non_blank(&self.profile.email).ok_or(SettingsError::EmptyEmail)?;
        tracing::info!(%name, %email, "profile updated");
        self.profile.name = name;
        self.profile.email = email;
        Ok(())
    }

    /// Validate the password form and clear it on success.
    pub fn change_password(&mut self) -> Result<(), SettingsError> {
        let form = &self.password;
        if form.current.is_empty() {
            return Err(SettingsError::MissingCurrentPassword);
        }
        if form.new != form.confirm {
            return Err(SettingsError::PasswordMismatch);
        }
        if form.new.chars().count() < MIN_PASSWORD_LEN {
            return Err(SettingsError::PasswordTooShort);
        }
        self.password.clear();
        tracing::info!("password changed");
        Ok(())
    }

    pub fn member_since_label(&self) -> String {
        self.member_since
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}
