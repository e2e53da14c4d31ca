use super::{AccountView, FriendList, SettingToggle, SettingsToggles};
use crate::error::{ClientError, Result};
use crate::location::PersonalDetails;
use crate::profile_form::EditProfileForm;
use serde::Serialize;
use swingsfab_messaging::{Conversation, FlaggedMessage, Message, MessageId, MessageStore, MessagingError, Sender};
use swingsfab_profiles::{ProfileStore, UserId, UserProfile};
use tracing::{debug, info};

/// Which conversation the message pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "counterpart", rename_all = "lowercase")]
pub enum Selection {
    #[default]
    None,
    Selected(UserId),
}

impl Selection {
    pub fn id(&self) -> Option<UserId> {
        match self {
            Selection::None => None,
            Selection::Selected(id) => Some(*id),
        }
    }
}

impl From<Option<UserId>> for Selection {
    fn from(id: Option<UserId>) -> Self {
        id.map_or(Selection::None, Selection::Selected)
    }
}

/// A sent or saved message with the counterpart's name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedEntry {
    pub counterpart: UserId,
    pub counterpart_name: String,
    pub message: Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub secret: bool,
}

fn field(label: &'static str, value: impl Into<String>) -> FormField {
    FormField {
        label,
        value: value.into(),
        secret: false,
    }
}

fn secret(label: &'static str) -> FormField {
    FormField {
        label,
        value: String::new(),
        secret: true,
    }
}

/// Content of the active account view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "kebab-case")]
pub enum Panel {
    Conversations {
        title: &'static str,
        description: &'static str,
        conversations: Vec<Conversation>,
        selection: Selection,
        /// The selected conversation, when it has any messages yet.
        open: Option<Conversation>,
    },
    Sent {
        title: &'static str,
        description: &'static str,
        messages: Vec<FlaggedEntry>,
    },
    Saved {
        title: &'static str,
        description: &'static str,
        messages: Vec<FlaggedEntry>,
    },
    Friends {
        title: &'static str,
        description: &'static str,
        friends: Vec<UserProfile>,
    },
    EditProfile {
        title: &'static str,
        description: &'static str,
        form: EditProfileForm,
    },
    PersonalDetails {
        title: &'static str,
        description: &'static str,
        details: PersonalDetails,
    },
    Form {
        title: &'static str,
        description: &'static str,
        fields: Vec<FormField>,
    },
    Toggles {
        title: &'static str,
        description: &'static str,
        toggles: Vec<SettingToggle>,
    },
    Placeholder {
        title: &'static str,
        description: &'static str,
    },
}

impl Panel {
    pub fn title(&self) -> &'static str {
        match self {
            Panel::Conversations { title, .. }
            | Panel::Sent { title, .. }
            | Panel::Saved { title, .. }
            | Panel::Friends { title, .. }
            | Panel::EditProfile { title, .. }
            | Panel::PersonalDetails { title, .. }
            | Panel::Form { title, .. }
            | Panel::Toggles { title, .. }
            | Panel::Placeholder { title, .. } => title,
        }
    }
}

const CONVERSATIONS_DESCRIPTION: &str = "View and reply to your conversations.";

/// Navigation and selection state of the account page.
///
/// The message store is owned by the session and passed in, so every operation here
/// runs synchronously under whatever lock the caller holds.
#[derive(Debug, Clone)]
pub struct AccountShell {
    viewer: UserProfile,
    email: String,
    view: AccountView,
    selection: Selection,
    friends: FriendList,
    edit_profile: EditProfileForm,
    personal_details: PersonalDetails,
    settings: SettingsToggles,
}

impl AccountShell {
    /// Opens on the read-messages view with the most recent conversation selected.
    pub fn new(
        viewer: &UserProfile,
        email: impl Into<String>,
        store: &MessageStore,
        profiles: &ProfileStore,
    ) -> Self {
        let mut shell = Self {
            viewer: viewer.clone(),
            email: email.into(),
            view: AccountView::default(),
            selection: Selection::None,
            friends: FriendList::seeded(profiles),
            edit_profile: EditProfileForm::prefill(viewer),
            personal_details: PersonalDetails::default(),
            settings: SettingsToggles::default(),
        };
        shell.selection = shell
            .conversations(store, profiles)
            .first()
            .map(Conversation::counterpart_id)
            .into();
        shell
    }

    pub fn view(&self) -> AccountView {
        self.view
    }

    /// Stored selection. The friends view may show a different one; see `effective_selection`.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn friends(&self) -> &FriendList {
        &self.friends
    }

    pub fn edit_profile(&self) -> &EditProfileForm {
        &self.edit_profile
    }

    pub fn edit_profile_mut(&mut self) -> &mut EditProfileForm {
        &mut self.edit_profile
    }

    pub fn personal_details(&self) -> &PersonalDetails {
        &self.personal_details
    }

    pub fn personal_details_mut(&mut self) -> &mut PersonalDetails {
        &mut self.personal_details
    }

    pub fn settings(&self) -> &SettingsToggles {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsToggles {
        &mut self.settings
    }

    /// Conversations listed by the active view, most recent first.
    pub fn conversations(&self, store: &MessageStore, profiles: &ProfileStore) -> Vec<Conversation> {
        let filter = (self.view == AccountView::FriendsMessages).then(|| self.friends.ids());
        let mut conversations = store.list_conversations(profiles, filter);
        conversations.retain(|c| c.counterpart_id() != self.viewer.id);
        conversations
    }

    /// Selection as the message pane shows it.
    ///
    /// In the friends view an empty list means no selection, and a selection outside the
    /// list falls back to the first friend conversation.
    pub fn effective_selection(&self, store: &MessageStore, profiles: &ProfileStore) -> Selection {
        if self.view != AccountView::FriendsMessages {
            return self.selection;
        }
        let conversations = self.conversations(store, profiles);
        match self.selection.id() {
            Some(id) if conversations.iter().any(|c| c.counterpart_id() == id) => self.selection,
            _ => conversations
                .first()
                .map(Conversation::counterpart_id)
                .into(),
        }
    }

    fn reconcile(&mut self, store: &MessageStore, profiles: &ProfileStore) {
        let effective = self.effective_selection(store, profiles);
        if effective != self.selection {
            debug!(from = ?self.selection, to = ?effective, "friends view adjusted selection");
            self.selection = effective;
        }
    }

    pub fn set_view(&mut self, view: AccountView, store: &MessageStore, profiles: &ProfileStore) {
        self.view = view;
        self.reconcile(store, profiles);
        info!(view = %view, "account view changed");
    }

    /// Selects a conversation, or clears the selection with `None`.
    ///
    /// The conversation must be listed by the active view, so the friends view only accepts
    /// friend conversations. A rejected id changes nothing. Selecting marks its messages read
    /// and leaves the sent and saved lists for the read-messages view.
    pub fn select_conversation(
        &mut self,
        counterpart: Option<UserId>,
        store: &mut MessageStore,
        profiles: &ProfileStore,
    ) -> Result<Selection> {
        let Some(id) = counterpart else {
            self.selection = Selection::None;
            return Ok(self.selection);
        };
        let listed = self
            .conversations(store, profiles)
            .iter()
            .any(|c| c.counterpart_id() == id);
        if !listed {
            return Err(MessagingError::ConversationNotFound(id).into());
        }

        self.selection = Selection::Selected(id);
        let read = store.mark_read(id);
        if !self.view.is_conversation_view() {
            self.view = AccountView::ReadMessages;
        }
        self.reconcile(store, profiles);
        debug!(counterpart = %id, marked_read = read, "conversation selected");
        Ok(self.effective_selection(store, profiles))
    }

    /// "Message" on a friends-list row. Works before any message exists.
    pub fn start_chat(
        &mut self,
        counterpart: UserId,
        store: &mut MessageStore,
        profiles: &ProfileStore,
    ) -> Result<()> {
        if counterpart == self.viewer.id {
            return Err(ClientError::Command("cannot start a chat with yourself".into()));
        }
        profiles.require(counterpart)?;
        self.selection = Selection::Selected(counterpart);
        self.view = AccountView::ReadMessages;
        store.mark_read(counterpart);
        info!(counterpart = %counterpart, "chat started from account page");
        Ok(())
    }

    /// Sends to the conversation shown in the message pane.
    pub fn send_message(
        &mut self,
        text: &str,
        store: &mut MessageStore,
        profiles: &ProfileStore,
    ) -> Result<Message> {
        let counterpart = self
            .effective_selection(store, profiles)
            .id()
            .ok_or(ClientError::NoConversationSelected)?;
        let message = store.append(counterpart, text, Sender::Me)?;
        info!(counterpart = %counterpart, message_id = %message.id, "message sent");
        Ok(message)
    }

    pub fn toggle_saved(
        &mut self,
        counterpart: UserId,
        message_id: MessageId,
        store: &mut MessageStore,
    ) -> Result<Message> {
        let message = store.toggle_saved(counterpart, message_id)?;
        info!(counterpart = %counterpart, message_id = %message_id, saved = message.is_saved(), "saved toggled");
        Ok(message)
    }

    /// Drops a friend. Their conversation stays in the read, sent and saved lists.
    pub fn unfriend(&mut self, id: UserId, store: &MessageStore, profiles: &ProfileStore) -> bool {
        let removed = self.friends.unfriend(id);
        self.reconcile(store, profiles);
        removed
    }

    pub fn panel(&self, store: &MessageStore, profiles: &ProfileStore) -> Panel {
        match self.view {
            AccountView::ReadMessages | AccountView::FriendsMessages => {
                let conversations = self.conversations(store, profiles);
                let selection = self.effective_selection(store, profiles);
                let open = selection.id().and_then(|id| {
                    conversations
                        .iter()
                        .find(|c| c.counterpart_id() == id)
                        .cloned()
                });
                Panel::Conversations {
                    title: if self.view == AccountView::FriendsMessages {
                        "Friends Messages"
                    } else {
                        "Messages"
                    },
                    description: CONVERSATIONS_DESCRIPTION,
                    conversations,
                    selection,
                    open,
                }
            }
            AccountView::SentMessages => Panel::Sent {
                title: "Sent Messages",
                description: "Browse messages you have sent to others.",
                messages: self.resolve(store.list_sent(), profiles),
            },
            AccountView::SavedMessages => Panel::Saved {
                title: "Saved Messages",
                description: "Access your saved or bookmarked messages.",
                messages: self.resolve(store.list_saved(), profiles),
            },
            AccountView::FriendsList => Panel::Friends {
                title: "Friends List",
                description: "Manage your list of friends.",
                friends: self.friends.profiles(profiles).into_iter().cloned().collect(),
            },
            AccountView::EditProfile => Panel::EditProfile {
                title: "Edit Profile",
                description: "Update your profile information and photos.",
                form: self.edit_profile.clone(),
            },
            AccountView::EditPersonalDetails => Panel::PersonalDetails {
                title: "Edit Personal Details",
                description: "This information will be displayed on your public profile.",
                details: self.personal_details.clone(),
            },
            AccountView::ChangePassword => Panel::Form {
                title: "Password & Security",
                description: "Manage your password and secure your account.",
                fields: vec![
                    secret("Current Password"),
                    secret("New Password"),
                    secret("Confirm New Password"),
                ],
            },
            AccountView::ChangeEmail => Panel::Form {
                title: "Change Email Address",
                description: "Update the email address associated with your account.",
                fields: vec![
                    field("Current Email", self.email.clone()),
                    field("New Email", ""),
                    secret("Confirm with Password"),
                ],
            },
            AccountView::ChangeUsername => Panel::Form {
                title: "Change Username",
                description: "Your username is unique and will be part of your public profile URL.",
                fields: vec![
                    field("Current Username", self.viewer.display_name()),
                    field("New Username", ""),
                    secret("Confirm with Password"),
                ],
            },
            AccountView::EmailNotifications => Panel::Toggles {
                title: "Notifications",
                description: "Choose how you want to be notified.",
                toggles: self.settings.notifications.clone(),
            },
            AccountView::Privacy => Panel::Toggles {
                title: "Privacy Settings",
                description: "Control your privacy and data settings.",
                toggles: self.settings.privacy.clone(),
            },
            other => {
                let (title, description) = other
                    .placeholder()
                    .unwrap_or((other.label(), ""));
                Panel::Placeholder { title, description }
            }
        }
    }

    fn resolve(&self, flagged: Vec<FlaggedMessage>, profiles: &ProfileStore) -> Vec<FlaggedEntry> {
        flagged
            .into_iter()
            .filter(|f| f.counterpart != self.viewer.id)
            .map(|f| FlaggedEntry {
                counterpart_name: profiles
                    .get(f.counterpart)
                    .map(|p| p.display_name().to_string())
                    .unwrap_or_else(|| format!("Member {}", f.counterpart)),
                counterpart: f.counterpart,
                message: f.message,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use swingsfab_messaging::ManualClock;

    const OLIVIA: UserId = UserId(9);

    fn fixture() -> (AccountShell, MessageStore, ProfileStore) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
        ));
        let profiles = ProfileStore::seeded();
        let store = MessageStore::seeded(clock);
        let viewer = profiles.require(OLIVIA).unwrap().clone();
        let shell = AccountShell::new(&viewer, "olivia@example.com", &store, &profiles);
        (shell, store, profiles)
    }

    fn empty_fixture() -> (AccountShell, MessageStore, ProfileStore) {
        let profiles = ProfileStore::seeded();
        let store = MessageStore::default();
        let viewer = profiles.require(OLIVIA).unwrap().clone();
        let shell = AccountShell::new(&viewer, "olivia@example.com", &store, &profiles);
        (shell, store, profiles)
    }

    #[test]
    fn opens_on_most_recent_conversation() {
        let (shell, _, _) = fixture();
        assert_eq!(shell.view(), AccountView::ReadMessages);
        assert_eq!(shell.selection(), Selection::Selected(UserId(1)));

        let (shell, _, _) = empty_fixture();
        assert_eq!(shell.selection(), Selection::None);
    }

    #[test]
    fn select_switches_to_read_view_and_marks_read() {
        let (mut shell, mut store, profiles) = fixture();
        shell.set_view(AccountView::SavedMessages, &store, &profiles);
        assert_eq!(store.unread_count(UserId(1)), 1);

        let selection = shell
            .select_conversation(Some(UserId(1)), &mut store, &profiles)
            .unwrap();

        assert_eq!(selection, Selection::Selected(UserId(1)));
        assert_eq!(shell.view(), AccountView::ReadMessages);
        assert_eq!(store.unread_count(UserId(1)), 0);
    }

    #[test]
    fn selecting_unknown_conversation_leaves_state() {
        let (mut shell, mut store, profiles) = fixture();
        shell.set_view(AccountView::SentMessages, &store, &profiles);

        let err = shell
            .select_conversation(Some(UserId(12)), &mut store, &profiles)
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(shell.selection(), Selection::Selected(UserId(1)));
        assert_eq!(shell.view(), AccountView::SentMessages);
    }

    #[test]
    fn clearing_selection_blocks_send() {
        let (mut shell, mut store, profiles) = fixture();
        shell.select_conversation(None, &mut store, &profiles).unwrap();
        assert_eq!(shell.selection(), Selection::None);

        let err = shell.send_message("hello", &mut store, &profiles).unwrap_err();
        assert_eq!(err, ClientError::NoConversationSelected);
    }

    #[test]
    fn send_appends_to_selected_conversation() {
        let (mut shell, mut store, profiles) = fixture();
        shell
            .select_conversation(Some(UserId(2)), &mut store, &profiles)
            .unwrap();

        let message = shell.send_message("Still spinning it?", &mut store, &profiles).unwrap();

        assert_eq!(store.messages(UserId(2)).last(), Some(&message));
        let Panel::Conversations { conversations, open, .. } = shell.panel(&store, &profiles) else {
            panic!("expected conversation panel");
        };
        assert_eq!(conversations[0].counterpart_id(), UserId(2));
        assert_eq!(open.unwrap().last_message.text, "Still spinning it?");

        let err = shell.send_message("   ", &mut store, &profiles).unwrap_err();
        assert!(matches!(err, ClientError::Messaging(MessagingError::Validation(_))));
    }

    #[test]
    fn start_chat_selects_without_history() {
        let (mut shell, mut store, profiles) = fixture();
        shell.set_view(AccountView::FriendsList, &store, &profiles);

        shell.start_chat(UserId(5), &mut store, &profiles).unwrap();
        assert_eq!(shell.view(), AccountView::ReadMessages);
        assert_eq!(shell.selection(), Selection::Selected(UserId(5)));

        let Panel::Conversations { open, .. } = shell.panel(&store, &profiles) else {
            panic!("expected conversation panel");
        };
        assert!(open.is_none());

        shell.send_message("Hi Chloe!", &mut store, &profiles).unwrap();
        assert!(store.has_conversation(UserId(5)));
    }

    #[test]
    fn friends_view_auto_selects_first_friend_conversation() {
        let (mut shell, mut store, profiles) = fixture();
        shell
            .select_conversation(Some(UserId(2)), &mut store, &profiles)
            .unwrap();

        shell.set_view(AccountView::FriendsMessages, &store, &profiles);

        let ids: Vec<_> = shell
            .conversations(&store, &profiles)
            .iter()
            .map(Conversation::counterpart_id)
            .collect();
        assert_eq!(ids, vec![UserId(1), UserId(6)]);
        assert_eq!(shell.selection(), Selection::Selected(UserId(1)));
    }

    #[test]
    fn friends_view_rejects_non_friend_selection() {
        let (mut shell, mut store, profiles) = fixture();
        store.append(UserId(2), "you there?", Sender::Them).unwrap();
        shell.set_view(AccountView::FriendsMessages, &store, &profiles);
        assert_eq!(shell.selection(), Selection::Selected(UserId(1)));

        let err = shell
            .select_conversation(Some(UserId(2)), &mut store, &profiles)
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(shell.selection(), Selection::Selected(UserId(1)));
        assert_eq!(shell.view(), AccountView::FriendsMessages);
        assert_eq!(store.unread_count(UserId(2)), 1);

        assert_eq!(
            shell.select_conversation(Some(UserId(6)), &mut store, &profiles),
            Ok(Selection::Selected(UserId(6)))
        );
    }

    #[test]
    fn friends_view_without_friend_messages_has_no_selection() {
        let (mut shell, mut store, profiles) = empty_fixture();
        store.append(UserId(2), "hey", Sender::Me).unwrap();
        shell
            .select_conversation(Some(UserId(2)), &mut store, &profiles)
            .unwrap();

        shell.set_view(AccountView::FriendsMessages, &store, &profiles);

        assert_eq!(shell.selection(), Selection::None);
        let err = shell.send_message("hello?", &mut store, &profiles).unwrap_err();
        assert_eq!(err, ClientError::NoConversationSelected);
    }

    #[test]
    fn unfriend_keeps_conversation() {
        let (mut shell, store, profiles) = fixture();
        assert!(shell.unfriend(UserId(6), &store, &profiles));

        assert!(!shell.friends().contains(UserId(6)));
        let listed: Vec<_> = shell
            .conversations(&store, &profiles)
            .iter()
            .map(Conversation::counterpart_id)
            .collect();
        assert!(listed.contains(&UserId(6)));

        shell.set_view(AccountView::FriendsMessages, &store, &profiles);
        let friends_only: Vec<_> = shell
            .conversations(&store, &profiles)
            .iter()
            .map(Conversation::counterpart_id)
            .collect();
        assert_eq!(friends_only, vec![UserId(1)]);
    }

    #[test]
    fn unfriending_selected_friend_moves_friends_view_selection() {
        let (mut shell, mut store, profiles) = fixture();
        shell.set_view(AccountView::FriendsMessages, &store, &profiles);
        shell
            .select_conversation(Some(UserId(6)), &mut store, &profiles)
            .unwrap();
        assert_eq!(shell.selection(), Selection::Selected(UserId(6)));

        shell.unfriend(UserId(6), &store, &profiles);
        assert_eq!(shell.selection(), Selection::Selected(UserId(1)));

        shell.unfriend(UserId(1), &store, &profiles);
        assert_eq!(shell.selection(), Selection::None);
    }

    #[test]
    fn sent_and_saved_panels_resolve_names() {
        let (mut shell, mut store, profiles) = fixture();
        shell.set_view(AccountView::SavedMessages, &store, &profiles);
        let Panel::Saved { messages, .. } = shell.panel(&store, &profiles) else {
            panic!("expected saved panel");
        };
        let names: Vec<_> = messages.iter().map(|m| m.counterpart_name.as_str()).collect();
        assert_eq!(names, vec!["Jessica", "Elena"]);

        let first = messages[0].clone();
        shell
            .toggle_saved(first.counterpart, first.message.id, &mut store)
            .unwrap();
        let Panel::Saved { messages, .. } = shell.panel(&store, &profiles) else {
            panic!("expected saved panel");
        };
        assert_eq!(messages.len(), 1);

        shell.set_view(AccountView::SentMessages, &store, &profiles);
        let Panel::Sent { messages, .. } = shell.panel(&store, &profiles) else {
            panic!("expected sent panel");
        };
        assert!(messages.iter().all(|m| m.message.is_mine()));
    }

    #[test]
    fn settings_panels() {
        let (mut shell, store, profiles) = fixture();

        shell.set_view(AccountView::ChangeUsername, &store, &profiles);
        let Panel::Form { fields, .. } = shell.panel(&store, &profiles) else {
            panic!("expected form panel");
        };
        assert_eq!(fields[0].value, "Olivia");

        shell.set_view(AccountView::Privacy, &store, &profiles);
        assert_eq!(shell.panel(&store, &profiles).title(), "Privacy Settings");

        shell.set_view(AccountView::BlockList, &store, &profiles);
        assert_eq!(
            shell.panel(&store, &profiles),
            Panel::Placeholder {
                title: "Block List",
                description: "Manage members you have blocked.",
            }
        );
    }
}
