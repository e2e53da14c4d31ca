//! A logged-in session: the member, their message store and every open view.

use crate::account::{AccountShell, AccountView, Panel, Selection};
use crate::chat::{ChatView, ReplyScheduler};
use crate::config::AppConfig;
use crate::dashboard::{Dashboard, ProfileModal};
use crate::error::{ClientError, Result};
use crate::location::LocationProvider;
use crate::state::AppState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use swingsfab_messaging::{Clock, Message, MessageId, MessageStore, SystemClock};
use swingsfab_profiles::{ProfileStore, UserId, UserProfile};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Unique identifier for a logged-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Top-level pages reachable from the user menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    #[default]
    Dashboard,
    EditProfile,
    MyAccount,
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" => Ok(Screen::Dashboard),
            "edit-profile" => Ok(Screen::EditProfile),
            "my-account" | "account" => Ok(Screen::MyAccount),
            other => Err(format!("unknown screen '{other}'")),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Screen::Dashboard => "dashboard",
            Screen::EditProfile => "edit-profile",
            Screen::MyAccount => "my-account",
        })
    }
}

/// Everything that lives between login and logout.
///
/// The message store is seeded when the session starts and discarded with it. Dropping the
/// session aborts any reply that has not fired.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    user: UserProfile,
    started_at: DateTime<Utc>,
    config: AppConfig,
    profiles: Arc<ProfileStore>,
    store: Arc<RwLock<MessageStore>>,
    screen: Screen,
    account: AccountShell,
    dashboard: Dashboard,
    replies: ReplyScheduler,
    chat: Option<ChatView>,
}

impl Session {
    pub fn start(state: &AppState, user: &UserProfile, email: &str) -> Self {
        Self::with_clock(state, user, email, Arc::new(SystemClock))
    }

    pub fn with_clock(
        state: &AppState,
        user: &UserProfile,
        email: &str,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let started_at = clock.now();
        let profiles = Arc::clone(state.profiles());
        let store = MessageStore::seeded(clock);
        let account = AccountShell::new(user, email, &store, &profiles);
        let id = SessionId::new();

        info!(session = %id, user = %user.id, "session started");
        Self {
            id,
            user: user.clone(),
            started_at,
            config: state.config().clone(),
            profiles,
            store: Arc::new(RwLock::new(store)),
            screen: Screen::default(),
            account,
            dashboard: Dashboard::new(user.id),
            replies: ReplyScheduler::new(),
            chat: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn store(&self) -> &Arc<RwLock<MessageStore>> {
        &self.store
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
        info!(session = %self.id, screen = %screen, "screen changed");
    }

    pub fn account(&self) -> &AccountShell {
        &self.account
    }

    pub fn account_mut(&mut self) -> &mut AccountShell {
        &mut self.account
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub fn chat(&self) -> Option<&ChatView> {
        self.chat.as_ref()
    }

    pub fn replies(&self) -> &ReplyScheduler {
        &self.replies
    }

    pub fn open_profile(&mut self, id: UserId) -> Result<&ProfileModal> {
        self.dashboard.open_profile(&self.profiles, id)
    }

    pub fn toggle_like(&mut self, id: UserId) -> Result<bool> {
        self.dashboard.toggle_like(&self.profiles, id)
    }

    pub async fn set_view(&mut self, view: AccountView) {
        let store = self.store.read().await;
        self.account.set_view(view, &store, &self.profiles);
    }

    pub async fn select_conversation(&mut self, counterpart: Option<UserId>) -> Result<Selection> {
        let mut store = self.store.write().await;
        self.account
            .select_conversation(counterpart, &mut store, &self.profiles)
    }

    /// "Message" on a friends-list row.
    pub async fn message_friend(&mut self, counterpart: UserId) -> Result<()> {
        let mut store = self.store.write().await;
        self.account.start_chat(counterpart, &mut store, &self.profiles)
    }

    pub async fn send_message(&mut self, text: &str) -> Result<Message> {
        let mut store = self.store.write().await;
        self.account.send_message(text, &mut store, &self.profiles)
    }

    pub async fn toggle_saved(&mut self, counterpart: UserId, message_id: MessageId) -> Result<Message> {
        let mut store = self.store.write().await;
        self.account.toggle_saved(counterpart, message_id, &mut store)
    }

    pub async fn unfriend(&mut self, id: UserId) -> bool {
        let store = self.store.read().await;
        self.account.unfriend(id, &store, &self.profiles)
    }

    pub async fn panel(&self) -> Panel {
        let store = self.store.read().await;
        self.account.panel(&store, &self.profiles)
    }

    pub async fn detect_location(&mut self, provider: &dyn LocationProvider) -> Result<()> {
        let delay = self.config.location_delay;
        let town = self.config.detected_town.clone();
        self.account
            .personal_details_mut()
            .detect_location(provider, delay, &town)
            .await?;
        Ok(())
    }

    /// Opens the chat window with `counterpart`, closing the profile modal and any other chat.
    pub fn open_chat(&mut self, counterpart: UserId) -> Result<&ChatView> {
        if counterpart == self.user.id {
            return Err(ClientError::Command("cannot chat with yourself".into()));
        }
        let profile = self.profiles.require(counterpart)?.clone();
        self.dashboard.close_profile();
        if let Some(previous) = self.chat.take() {
            previous.close(&mut self.replies);
        }
        let chat = ChatView::open(profile, Arc::clone(&self.store), &self.config);
        Ok(self.chat.insert(chat))
    }

    pub async fn chat_send(&mut self, text: &str) -> Result<Message> {
        let chat = self.chat.as_ref().ok_or(ClientError::NoChatOpen)?;
        chat.send(text, &mut self.replies).await
    }

    /// Closes the chat window. Returns how many pending replies were dropped.
    pub fn close_chat(&mut self) -> Result<usize> {
        let chat = self.chat.take().ok_or(ClientError::NoChatOpen)?;
        Ok(chat.close(&mut self.replies))
    }

    /// Ends the session. Pending replies are cancelled and the store is discarded.
    pub fn logout(mut self) -> SessionId {
        if let Some(chat) = self.chat.take() {
            chat.close(&mut self.replies);
        }
        let cancelled = self.replies.cancel_all();
        info!(session = %self.id, cancelled, "session ended");
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{LocationError, MockLocationProvider};
    use std::time::Duration;
    use swingsfab_messaging::Sender;

    fn state() -> Arc<AppState> {
        let config = AppConfig {
            location_delay: Duration::ZERO,
            ..AppConfig::default()
        };
        AppState::new(config)
    }

    fn olivia_session(state: &AppState) -> Session {
        let olivia = state.profiles().require(UserId(9)).unwrap().clone();
        Session::start(state, &olivia, "olivia@example.com")
    }

    #[tokio::test]
    async fn sessions_have_distinct_ids_and_stores() {
        let state = state();
        let mut first = olivia_session(&state);
        let second = olivia_session(&state);
        assert_ne!(first.id(), second.id());

        first.send_message("only in the first session").await.unwrap();
        let first_total = first.store().read().await.total_messages();
        let second_total = second.store().read().await.total_messages();
        assert_eq!(first_total, second_total + 1);
    }

    #[tokio::test]
    async fn starts_on_dashboard() {
        let state = state();
        let mut session = olivia_session(&state);
        assert_eq!(session.screen(), Screen::Dashboard);
        session.set_screen(Screen::MyAccount);
        assert_eq!(session.screen(), Screen::MyAccount);
        assert_eq!(session.account().view(), AccountView::ReadMessages);
    }

    #[tokio::test]
    async fn open_chat_closes_profile_modal() {
        let state = state();
        let mut session = olivia_session(&state);
        session.open_profile(UserId(4)).unwrap();

        let chat = session.open_chat(UserId(4)).unwrap();
        assert_eq!(chat.counterpart().id, UserId(4));
        assert!(session.dashboard().profile_modal().is_none());
        assert!(session.open_chat(UserId(9)).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn chat_shares_store_with_account_views() {
        let state = state();
        let mut session = olivia_session(&state);
        session.open_chat(UserId(2)).unwrap();
        session.chat_send("Any new records?").await.unwrap();

        tokio::time::sleep(Duration::from_secs(2)).await;

        let store = session.store().read().await;
        let last = store.messages(UserId(2)).last().unwrap();
        assert_eq!(last.sender, Sender::Them);
    }

    #[tokio::test(start_paused = true)]
    async fn switching_chats_cancels_previous_replies() {
        let state = state();
        let mut session = olivia_session(&state);
        session.open_chat(UserId(4)).unwrap();
        session.chat_send("Hi").await.unwrap();
        session.open_chat(UserId(5)).unwrap();
        assert_eq!(session.replies().total_pending(), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(session.store().read().await.messages(UserId(4)).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn logout_cancels_pending_replies() {
        let state = state();
        let mut session = olivia_session(&state);
        session.open_chat(UserId(4)).unwrap();
        session.chat_send("Hi").await.unwrap();
        let store = Arc::clone(session.store());

        session.logout();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(store.read().await.messages(UserId(4)).len(), 1);
    }

    #[tokio::test]
    async fn close_chat_without_chat_fails() {
        let state = state();
        let mut session = olivia_session(&state);
        assert_eq!(session.close_chat(), Err(ClientError::NoChatOpen));
        assert_eq!(
            session.chat_send("hello").await.unwrap_err(),
            ClientError::NoChatOpen
        );
    }

    #[tokio::test]
    async fn detect_location_updates_panel() {
        let state = state();
        let mut session = olivia_session(&state);

        session
            .detect_location(&MockLocationProvider::succeeding())
            .await
            .unwrap();
        assert_eq!(session.account().personal_details().town, "Miami, FL");

        let err = session
            .detect_location(&MockLocationProvider::failing(LocationError::Timeout))
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::Location(LocationError::Timeout));
        assert_eq!(session.account().personal_details().town, "Miami, FL");
    }
}
