//! Member profiles shared across the Swingsfab session and its views.

pub mod filters;
pub mod seed;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub use filters::{ProfileFilter, QuickFilter};
pub use seed::FRIEND_IDS;

/// Unique identifier of a member profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Presence shown next to a member's avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnlineStatus {
    Online,
    Away,
    Offline,
}

impl fmt::Display for OnlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OnlineStatus::Online => "Online",
            OnlineStatus::Away => "Away",
            OnlineStatus::Offline => "Offline",
        };
        f.write_str(label)
    }
}

/// A member profile as shown on the dashboard and in the profile modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    /// Display name including the age suffix, e.g. `"Jessica, 28"`.
    pub name: String,
    pub age: u8,
    pub location: String,
    pub image_url: String,
    pub status: OnlineStatus,
    pub bio: String,
    pub interests: Vec<String>,
    pub gallery_images: Vec<String>,
    pub looking_for: Vec<String>,
    pub relationship_status: String,
}

impl UserProfile {
    /// Name without the trailing age suffix.
    pub fn display_name(&self) -> &str {
        self.name
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or(self.name.as_str())
    }

    /// Gallery image at `index`, wrapping around in both directions.
    pub fn gallery_image(&self, index: isize) -> &str {
        if self.gallery_images.is_empty() {
            return &self.image_url;
        }
        let len = self.gallery_images.len() as isize;
        let wrapped = index.rem_euclid(len) as usize;
        &self.gallery_images[wrapped]
    }

    /// Two-letter state code at the end of `location` ("Boston, MA" -> "MA").
    pub fn state_code(&self) -> Option<&str> {
        self.location
            .rsplit(',')
            .next()
            .map(str::trim)
            .filter(|code| !code.is_empty() && *code != self.location.trim())
    }

    pub fn is_online(&self) -> bool {
        self.status == OnlineStatus::Online
    }
}

/// Errors raised when resolving profiles.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("profile {0} not found")]
    NotFound(UserId),
}

pub type Result<T> = std::result::Result<T, ProfileError>;

/// Read-only list of member profiles, seeded once per process.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: Vec<UserProfile>,
}

impl ProfileStore {
    /// Builds a store from `profiles`, keeping the first occurrence of each id.
    pub fn new(profiles: Vec<UserProfile>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(profiles.len());
        for profile in profiles {
            if seen.insert(profile.id) {
                unique.push(profile);
            } else {
                tracing::warn!(id = %profile.id, "duplicate profile id ignored");
            }
        }
        Self { profiles: unique }
    }

    /// The prototype's twelve demo members.
    pub fn seeded() -> Self {
        Self::new(seed::profiles())
    }

    pub fn get(&self, id: UserId) -> Option<&UserProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn require(&self, id: UserId) -> Result<&UserProfile> {
        self.get(id).ok_or(ProfileError::NotFound(id))
    }

    /// Profiles in seed order.
    pub fn all(&self) -> &[UserProfile] {
        &self.profiles
    }

    pub fn find_by_name(&self, fragment: &str) -> Option<&UserProfile> {
        self.profiles.iter().find(|p| p.name.contains(fragment))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
