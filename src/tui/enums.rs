//! Enumerations for TUI state management.

/// Which form the landing page shows.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

/// Focusable fields on the settings screen, in tab order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SettingsField {
    #[default]
    Name,
    Email,
    CurrentPassword,
    NewPassword,
    ConfirmPassword,
    Language,
    PushNotifications,
    EmailNotifications,
}

impl SettingsField {
    pub const ALL: [SettingsField; 8] = [
        SettingsField::Name,
        SettingsField::Email,
        SettingsField::CurrentPassword,
        SettingsField::NewPassword,
        SettingsField::ConfirmPassword,
        SettingsField::Language,
        SettingsField::PushNotifications,
        SettingsField::EmailNotifications,
    ];

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Text entry mode on the boards screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BoardsInput {
    #[default]
    None,
    NewTitle,
    JoinCode,
}
