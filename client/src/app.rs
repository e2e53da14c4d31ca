//! Applies parsed commands to the auth shell or the active session.

use crate::account::{AccountView, Panel};
use crate::auth::{AuthScreen, AuthShell, LoginForm, RegisterForm};
use crate::command::{help_text, joined, Command, FiltersAction};
use crate::dashboard::ProfileModal;
use crate::error::{ClientError, Result};
use crate::location::{MockLocationProvider, PersonalDetails};
use crate::profile_form::{EditProfileForm, INTEREST_CHOICES};
use crate::session::{Screen, Session, SessionId};
use crate::state::AppState;
use serde::Serialize;
use std::sync::Arc;
use swingsfab_messaging::Message;
use swingsfab_profiles::{ProfileFilter, UserId, UserProfile};
use tracing::info;

/// A profile tile on the dashboard grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
    pub profile: UserProfile,
    pub liked: bool,
}

/// Result of one command, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Output {
    AuthScreen {
        screen: AuthScreen,
    },
    LoggedIn {
        session: SessionId,
        user: UserProfile,
        screen: Screen,
    },
    LoggedOut {
        session: SessionId,
    },
    Panel {
        view: AccountView,
        panel: Panel,
    },
    MessageSaved {
        counterpart: UserId,
        message: Message,
    },
    Unfriended {
        friend: UserId,
        removed: bool,
    },
    Profiles {
        filter: ProfileFilter,
        cards: Vec<ProfileCard>,
    },
    FilterModal {
        draft: ProfileFilter,
    },
    ProfileModal {
        modal: ProfileModal,
        image: String,
        liked: bool,
    },
    Liked {
        profile: UserId,
        liked: bool,
    },
    Chat {
        counterpart: UserProfile,
        messages: Vec<Message>,
        pending_replies: usize,
    },
    ChatClosed {
        cancelled_replies: usize,
    },
    EditProfile {
        form: EditProfileForm,
    },
    Setting {
        key: String,
        enabled: bool,
    },
    PersonalDetails {
        details: PersonalDetails,
    },
    Help {
        text: String,
    },
    JsonMode {
        enabled: bool,
    },
    Quit,
}

/// The terminal front-end's state: the auth shell while logged out, a session while logged in.
pub struct App {
    state: Arc<AppState>,
    auth: AuthShell,
    session: Option<Session>,
    json: bool,
}

impl App {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            auth: AuthShell::new(),
            session: None,
            json: false,
        }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    pub fn auth(&self) -> &AuthShell {
        &self.auth
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn json_output(&self) -> bool {
        self.json
    }

    /// Ends the current session, if any.
    pub fn logout(&mut self) -> Option<SessionId> {
        let session = self.session.take()?;
        self.auth.reset();
        Some(session.logout())
    }

    pub async fn execute(&mut self, command: Command) -> Result<Output> {
        match command {
            Command::Login { email, password } => {
                self.ensure_logged_out()?;
                let form = LoginForm::new(email, password);
                let user = self
                    .auth
                    .login(&form, self.state.profiles(), &self.state.config().demo_user)?
                    .clone();
                Ok(self.begin(&user, &form.email))
            }
            Command::Register {
                profile_type,
                email,
                password,
                confirm_password,
            } => {
                self.ensure_logged_out()?;
                let form = RegisterForm {
                    profile_type,
                    email,
                    password,
                    confirm_password,
                };
                let user = self
                    .auth
                    .register(&form, self.state.profiles(), &self.state.config().demo_user)?
                    .clone();
                Ok(self.begin(&user, &form.email))
            }
            Command::Auth { screen } => {
                self.ensure_logged_out()?;
                match screen {
                    AuthScreen::Login => self.auth.switch_to_login(),
                    AuthScreen::Register => self.auth.switch_to_register(),
                }
                Ok(Output::AuthScreen {
                    screen: self.auth.screen(),
                })
            }
            Command::Logout => {
                let session = self.logout().ok_or(ClientError::NotLoggedIn)?;
                Ok(Output::LoggedOut { session })
            }
            Command::Json => {
                self.json = !self.json;
                Ok(Output::JsonMode { enabled: self.json })
            }
            Command::Help => Ok(Output::Help { text: help_text() }),
            Command::Quit => Ok(Output::Quit),
            other => {
                let session = self.session.as_mut().ok_or(ClientError::NotLoggedIn)?;
                apply(session, other).await
            }
        }
    }

    fn ensure_logged_out(&self) -> Result<()> {
        match self.session {
            Some(_) => Err(ClientError::AlreadyLoggedIn),
            None => Ok(()),
        }
    }

    fn begin(&mut self, user: &UserProfile, email: &str) -> Output {
        let session = Session::start(&self.state, user, email.trim());
        info!(session = %session.id(), user = %user.id, "logged in");
        let output = Output::LoggedIn {
            session: session.id(),
            user: user.clone(),
            screen: session.screen(),
        };
        self.session = Some(session);
        output
    }
}

async fn apply(session: &mut Session, command: Command) -> Result<Output> {
    let output = match command {
        Command::Screen { screen } => {
            session.set_screen(screen);
            match screen {
                Screen::Dashboard => profiles_output(session),
                Screen::EditProfile => edit_profile_output(session),
                Screen::MyAccount => panel_output(session).await,
            }
        }
        Command::View { view } => show_view(session, view).await,
        Command::Friends => show_view(session, AccountView::FriendsList).await,
        Command::Conversations => show_view(session, AccountView::ReadMessages).await,
        Command::Sent => show_view(session, AccountView::SentMessages).await,
        Command::Saved => show_view(session, AccountView::SavedMessages).await,
        Command::Panel => panel_output(session).await,
        Command::Select { target } => {
            session.select_conversation(target.id()).await?;
            panel_output(session).await
        }
        Command::Send { text } => {
            session.send_message(&joined(&text)).await?;
            panel_output(session).await
        }
        Command::Save {
            counterpart,
            message,
        } => {
            let message = session.toggle_saved(counterpart, message).await?;
            Output::MessageSaved {
                counterpart,
                message,
            }
        }
        Command::Unfriend { id } => {
            let removed = session.unfriend(id).await;
            Output::Unfriended {
                friend: id,
                removed,
            }
        }
        Command::MessageFriend { id } => {
            session.set_screen(Screen::MyAccount);
            session.message_friend(id).await?;
            panel_output(session).await
        }
        Command::Profiles => {
            session.set_screen(Screen::Dashboard);
            profiles_output(session)
        }
        Command::Filter { quick } => {
            session.dashboard_mut().set_quick_filter(quick);
            profiles_output(session)
        }
        Command::Filters { action } => filters(session, action)?,
        Command::Profile { id } => {
            session.open_profile(id)?;
            profile_modal_output(session)?
        }
        Command::CloseProfile => {
            session.dashboard_mut().close_profile();
            profiles_output(session)
        }
        Command::Tab { tab } => {
            session.dashboard_mut().set_tab(tab)?;
            profile_modal_output(session)?
        }
        Command::NextPhoto => {
            session.dashboard_mut().next_photo()?;
            profile_modal_output(session)?
        }
        Command::PrevPhoto => {
            session.dashboard_mut().prev_photo()?;
            profile_modal_output(session)?
        }
        Command::Like { id } => {
            let liked = session.toggle_like(id)?;
            Output::Liked { profile: id, liked }
        }
        Command::Chat { id: Some(id) } => {
            session.open_chat(id)?;
            chat_output(session).await?
        }
        Command::Chat { id: None } => chat_output(session).await?,
        Command::Say { text } => {
            session.chat_send(&joined(&text)).await?;
            chat_output(session).await?
        }
        Command::CloseChat => Output::ChatClosed {
            cancelled_replies: session.close_chat()?,
        },
        Command::Interest { name } => {
            let name = joined(&name);
            let wanted = name.trim();
            let interest = INTEREST_CHOICES
                .iter()
                .find(|i| i.eq_ignore_ascii_case(wanted))
                .ok_or_else(|| ClientError::Command(format!("unknown interest '{wanted}'")))?;
            session.account_mut().edit_profile_mut().toggle_interest(interest);
            edit_profile_output(session)
        }
        Command::Toggle { setting } => {
            let key = setting.trim().to_lowercase();
            let enabled = session
                .account_mut()
                .settings_mut()
                .toggle(&key)
                .ok_or_else(|| ClientError::Command(format!("unknown setting '{key}'")))?;
            Output::Setting { key, enabled }
        }
        Command::Town { town } => {
            session
                .account_mut()
                .personal_details_mut()
                .set_town(joined(&town));
            personal_details_output(session)
        }
        Command::DetectLocation { outcome } => {
            let provider = match outcome {
                None => MockLocationProvider::succeeding(),
                Some(outcome) => MockLocationProvider::failing(outcome.into()),
            };
            session.detect_location(&provider).await?;
            personal_details_output(session)
        }
        other => {
            return Err(ClientError::Command(format!(
                "{other:?} cannot run inside a session"
            )))
        }
    };
    Ok(output)
}

async fn show_view(session: &mut Session, view: AccountView) -> Output {
    session.set_screen(Screen::MyAccount);
    session.set_view(view).await;
    panel_output(session).await
}

fn filters(session: &mut Session, action: FiltersAction) -> Result<Output> {
    let dashboard = session.dashboard_mut();
    match action {
        FiltersAction::Open => {
            dashboard.open_filters();
        }
        FiltersAction::Close => {
            dashboard.close_filters();
            return Ok(profiles_output(session));
        }
        FiltersAction::Apply => {
            dashboard.apply_filters()?;
            return Ok(profiles_output(session));
        }
        FiltersAction::Reset => dashboard.reset_filters()?,
        FiltersAction::MaxAge { years } => dashboard.set_max_age(years)?,
        FiltersAction::Location { text } => dashboard.set_location(&joined(&text))?,
        FiltersAction::LookingFor { category } => dashboard.toggle_looking_for(&joined(&category))?,
    }
    let draft = session
        .dashboard()
        .filter_draft()
        .cloned()
        .ok_or(ClientError::FilterModalClosed)?;
    Ok(Output::FilterModal { draft })
}

async fn panel_output(session: &Session) -> Output {
    Output::Panel {
        view: session.account().view(),
        panel: session.panel().await,
    }
}

fn profiles_output(session: &Session) -> Output {
    let dashboard = session.dashboard();
    let cards = dashboard
        .visible_profiles(session.profiles())
        .into_iter()
        .map(|profile| ProfileCard {
            liked: dashboard.is_liked(profile.id),
            profile: profile.clone(),
        })
        .collect();
    Output::Profiles {
        filter: dashboard.filter().clone(),
        cards,
    }
}

fn profile_modal_output(session: &Session) -> Result<Output> {
    let dashboard = session.dashboard();
    let modal = dashboard.profile_modal().ok_or(ClientError::NoProfileOpen)?;
    Ok(Output::ProfileModal {
        image: modal.current_image().to_string(),
        liked: dashboard.is_liked(modal.profile.id),
        modal: modal.clone(),
    })
}

async fn chat_output(session: &Session) -> Result<Output> {
    let chat = session.chat().ok_or(ClientError::NoChatOpen)?;
    let counterpart = chat.counterpart().clone();
    Ok(Output::Chat {
        messages: chat.messages().await,
        pending_replies: session.replies().pending(counterpart.id),
        counterpart,
    })
}

fn edit_profile_output(session: &Session) -> Output {
    Output::EditProfile {
        form: session.account().edit_profile().clone(),
    }
}

fn personal_details_output(session: &Session) -> Output {
    Output::PersonalDetails {
        details: session.account().personal_details().clone(),
    }
}
