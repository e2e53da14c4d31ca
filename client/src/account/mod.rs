//! The "My Account" page: sidebar navigation and the panel each entry shows.

pub mod friends;
pub mod settings;
pub mod shell;

pub use friends::FriendList;
pub use settings::{SettingToggle, SettingsToggles};
pub use shell::{AccountShell, FlaggedEntry, Panel, Selection};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sidebar entries of the account page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountView {
    #[default]
    ReadMessages,
    SentMessages,
    SavedMessages,
    FriendsMessages,
    LookedAtMe,
    Winks,
    FriendUpdates,
    FriendsList,
    FriendsInvites,
    ManagePhotos,
    PhotosFabd,
    RecentlyFabdPhotos,
    ManageVerifications,
    EditProfile,
    EditPersonalDetails,
    MessageFilters,
    ChangePassword,
    ChangeEmail,
    ChangeUsername,
    BlockList,
    EmailNotifications,
    Privacy,
    TipsGettingStarted,
    RecommendUs,
    DeleteAccount,
}

/// Sidebar section headings, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Messages,
    Activity,
    Friends,
    Photos,
    Profile,
    Settings,
    More,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Messages,
        Section::Activity,
        Section::Friends,
        Section::Photos,
        Section::Profile,
        Section::Settings,
        Section::More,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Messages => "Messages",
            Section::Activity => "Activity",
            Section::Friends => "Friends",
            Section::Photos => "Photos",
            Section::Profile => "Profile",
            Section::Settings => "Settings",
            Section::More => "More",
        }
    }
}

impl AccountView {
    pub const ALL: [AccountView; 25] = [
        AccountView::ReadMessages,
        AccountView::SentMessages,
        AccountView::SavedMessages,
        AccountView::FriendsMessages,
        AccountView::LookedAtMe,
        AccountView::Winks,
        AccountView::FriendUpdates,
        AccountView::FriendsList,
        AccountView::FriendsInvites,
        AccountView::ManagePhotos,
        AccountView::PhotosFabd,
        AccountView::RecentlyFabdPhotos,
        AccountView::ManageVerifications,
        AccountView::EditProfile,
        AccountView::EditPersonalDetails,
        AccountView::MessageFilters,
        AccountView::ChangePassword,
        AccountView::ChangeEmail,
        AccountView::ChangeUsername,
        AccountView::BlockList,
        AccountView::EmailNotifications,
        AccountView::Privacy,
        AccountView::TipsGettingStarted,
        AccountView::RecommendUs,
        AccountView::DeleteAccount,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            AccountView::ReadMessages => "read-messages",
            AccountView::SentMessages => "sent-messages",
            AccountView::SavedMessages => "saved-messages",
            AccountView::FriendsMessages => "friends-messages",
            AccountView::LookedAtMe => "looked-at-me",
            AccountView::Winks => "winks",
            AccountView::FriendUpdates => "friend-updates",
            AccountView::FriendsList => "friends-list",
            AccountView::FriendsInvites => "friends-invites",
            AccountView::ManagePhotos => "manage-photos",
            AccountView::PhotosFabd => "photos-fabd",
            AccountView::RecentlyFabdPhotos => "recently-fabd-photos",
            AccountView::ManageVerifications => "manage-verifications",
            AccountView::EditProfile => "edit-profile",
            AccountView::EditPersonalDetails => "edit-personal-details",
            AccountView::MessageFilters => "message-filters",
            AccountView::ChangePassword => "change-password",
            AccountView::ChangeEmail => "change-email",
            AccountView::ChangeUsername => "change-username",
            AccountView::BlockList => "block-list",
            AccountView::EmailNotifications => "email-notifications",
            AccountView::Privacy => "privacy",
            AccountView::TipsGettingStarted => "tips-getting-started",
            AccountView::RecommendUs => "recommend-us",
            AccountView::DeleteAccount => "delete-account",
        }
    }

    /// Sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            AccountView::ReadMessages => "Read Messages",
            AccountView::SentMessages => "Sent Messages",
            AccountView::SavedMessages => "Saved Messages",
            AccountView::FriendsMessages => "Friends Messages",
            AccountView::LookedAtMe => "Looked at me",
            AccountView::Winks => "Winks",
            AccountView::FriendUpdates => "Friend Updates",
            AccountView::FriendsList => "Friends List",
            AccountView::FriendsInvites => "Friends Invites",
            AccountView::ManagePhotos => "Manage Photos",
            AccountView::PhotosFabd => "Photos you Fab'd",
            AccountView::RecentlyFabdPhotos => "Recently Fab'd Photos",
            AccountView::ManageVerifications => "Manage Verifications",
            AccountView::EditProfile => "Edit Profile",
            AccountView::EditPersonalDetails => "Edit Personal Details",
            AccountView::MessageFilters => "Message Filters",
            AccountView::ChangePassword => "Change Password",
            AccountView::ChangeEmail => "Change Email",
            AccountView::ChangeUsername => "Change Username",
            AccountView::BlockList => "Block List",
            AccountView::EmailNotifications => "Email Notifications",
            AccountView::Privacy => "Privacy",
            AccountView::TipsGettingStarted => "Tips & Getting Started",
            AccountView::RecommendUs => "Recommend Us",
            AccountView::DeleteAccount => "Delete Account",
        }
    }

    pub fn section(&self) -> Section {
        use AccountView::*;
        match self {
            ReadMessages | SentMessages | SavedMessages | FriendsMessages => Section::Messages,
            LookedAtMe | Winks | FriendUpdates => Section::Activity,
            FriendsList | FriendsInvites => Section::Friends,
            ManagePhotos | PhotosFabd | RecentlyFabdPhotos | ManageVerifications => Section::Photos,
            EditProfile | EditPersonalDetails => Section::Profile,
            MessageFilters | ChangePassword | ChangeEmail | ChangeUsername | BlockList
            | EmailNotifications | Privacy => Section::Settings,
            TipsGettingStarted | RecommendUs | DeleteAccount => Section::More,
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim();
        Self::ALL.into_iter().find(|view| view.slug() == slug)
    }

    /// Views that show a conversation list with a message pane.
    pub fn is_conversation_view(&self) -> bool {
        matches!(self, AccountView::ReadMessages | AccountView::FriendsMessages)
    }

    /// Title and description for views that have no content yet.
    pub fn placeholder(&self) -> Option<(&'static str, &'static str)> {
        let text = match self {
            AccountView::LookedAtMe => (
                "Looked At Me",
                "See a list of members who have viewed your profile.",
            ),
            AccountView::Winks => ("Winks", "Manage the winks you've sent and received."),
            AccountView::FriendUpdates => (
                "Friend Updates",
                "See the latest activity and updates from your friends.",
            ),
            AccountView::FriendsInvites => {
                ("Friends Invites", "Manage pending friend invitations.")
            }
            AccountView::ManagePhotos => (
                "Manage Photos",
                "Upload, organize, and delete your profile photos.",
            ),
            AccountView::PhotosFabd => (
                "Photos You Fab'd",
                "View a collection of photos you have 'Fab'd'.",
            ),
            AccountView::RecentlyFabdPhotos => (
                "Recently Fab'd Photos",
                "See the latest photos that have been 'Fab'd'.",
            ),
            AccountView::ManageVerifications => (
                "Manage Verifications",
                "Manage your profile verification status.",
            ),
            AccountView::MessageFilters => (
                "Message Filters",
                "Set up filters to manage your incoming messages.",
            ),
            AccountView::BlockList => ("Block List", "Manage members you have blocked."),
            AccountView::TipsGettingStarted => (
                "Tips & Getting Started",
                "Find helpful tips and guides for using the platform.",
            ),
            AccountView::RecommendUs => ("Recommend Us", "Share Swingsfab with your friends."),
            AccountView::DeleteAccount => (
                "Delete Account",
                "Permanently delete your account and all associated data.",
            ),
            _ => return None,
        };
        Some(text)
    }
}

impl fmt::Display for AccountView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for AccountView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| format!("unknown account view '{}'", s.trim()))
    }
}
