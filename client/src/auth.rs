//! Login and registration screens shown before a session exists.
//!
//! There is no credential check. A form that passes validation signs in as the
//! configured demo member.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use swingsfab_profiles::{ProfileStore, UserProfile};
use tracing::info;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("email address is required")]
    MissingEmail,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("password is required")]
    MissingPassword,
    #[error("please confirm your password")]
    MissingConfirmation,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("no demo member matches '{0}'")]
    UnknownDemoUser(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AuthScreen {
    #[default]
    Login,
    Register,
}

/// Account kinds offered on the first registration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileType {
    Woman,
    Man,
    Couple,
    TvTs,
    Club,
}

impl ProfileType {
    pub const ALL: [ProfileType; 5] = [
        ProfileType::Woman,
        ProfileType::Man,
        ProfileType::Couple,
        ProfileType::TvTs,
        ProfileType::Club,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProfileType::Woman => "Woman",
            ProfileType::Man => "Man",
            ProfileType::Couple => "Couple",
            ProfileType::TvTs => "TV/TS",
            ProfileType::Club => "Club",
        }
    }

    /// Name accepted by the `register` command.
    pub fn slug(&self) -> &'static str {
        match self {
            ProfileType::Woman => "woman",
            ProfileType::Man => "man",
            ProfileType::Couple => "couple",
            ProfileType::TvTs => "tv-ts",
            ProfileType::Club => "club",
        }
    }

    /// Heading of the details step for this kind.
    pub fn form_title(&self) -> &'static str {
        match self {
            ProfileType::Couple => "Create Couple Profile",
            ProfileType::Club => "Register Your Club",
            _ => "Create Your Profile",
        }
    }

    /// Couple and club forms have no confirmation field.
    pub fn asks_confirmation(&self) -> bool {
        !matches!(self, ProfileType::Couple | ProfileType::Club)
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProfileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "woman" => Ok(ProfileType::Woman),
            "man" => Ok(ProfileType::Man),
            "couple" => Ok(ProfileType::Couple),
            "tv-ts" | "tv/ts" | "tvts" => Ok(ProfileType::TvTs),
            "club" => Ok(ProfileType::Club),
            other => Err(format!("unknown profile type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        validate_credentials(&self.email, &self.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub profile_type: ProfileType,
    pub email: String,
    pub password: String,
    pub confirm_password: Option<String>,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        validate_credentials(&self.email, &self.password)?;
        match &self.confirm_password {
            Some(confirm) if *confirm != self.password => Err(AuthError::PasswordMismatch),
            None if self.profile_type.asks_confirmation() => Err(AuthError::MissingConfirmation),
            _ => Ok(()),
        }
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AuthError::MissingEmail);
    }
    if !email.contains('@') {
        return Err(AuthError::InvalidEmail(email.to_string()));
    }
    if password.trim().is_empty() {
        return Err(AuthError::MissingPassword);
    }
    Ok(())
}

/// Switches between the login and register screens and admits the demo member.
#[derive(Debug, Clone, Default)]
pub struct AuthShell {
    screen: AuthScreen,
}

impl AuthShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> AuthScreen {
        self.screen
    }

    pub fn switch_to_register(&mut self) {
        self.screen = AuthScreen::Register;
    }

    pub fn switch_to_login(&mut self) {
        self.screen = AuthScreen::Login;
    }

    pub fn login<'a>(
        &mut self,
        form: &LoginForm,
        profiles: &'a ProfileStore,
        demo_user: &str,
    ) -> Result<&'a UserProfile, AuthError> {
        form.validate()?;
        let user = demo_member(profiles, demo_user)?;
        info!(user = %user.id, "login accepted");
        Ok(user)
    }

    pub fn register<'a>(
        &mut self,
        form: &RegisterForm,
        profiles: &'a ProfileStore,
        demo_user: &str,
    ) -> Result<&'a UserProfile, AuthError> {
        self.screen = AuthScreen::Register;
        form.validate()?;
        let user = demo_member(profiles, demo_user)?;
        info!(user = %user.id, profile_type = %form.profile_type, "registration accepted");
        Ok(user)
    }

    /// Called on logout; the next visitor lands on the login screen.
    pub fn reset(&mut self) {
        self.screen = AuthScreen::Login;
    }
}

fn demo_member<'a>(profiles: &'a ProfileStore, name: &str) -> Result<&'a UserProfile, AuthError> {
    profiles
        .find_by_name(name)
        .or_else(|| profiles.all().first())
        .ok_or_else(|| AuthError::UnknownDemoUser(name.to_string()))
}
