use crate::auth::AuthError;
use crate::location::LocationError;
use swingsfab_messaging::MessagingError;
use swingsfab_profiles::ProfileError;

/// Errors surfaced by the session and the command interface.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClientError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Messaging(#[from] MessagingError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error("log in first")]
    NotLoggedIn,
    #[error("already logged in, log out first")]
    AlreadyLoggedIn,
    #[error("no conversation selected")]
    NoConversationSelected,
    #[error("no chat is open")]
    NoChatOpen,
    #[error("no profile is open")]
    NoProfileOpen,
    #[error("the filter modal is not open")]
    FilterModalClosed,
    #[error("{0}")]
    Command(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        match self {
            ClientError::Profile(ProfileError::NotFound(_)) => true,
            ClientError::Messaging(err) => err.is_not_found(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
