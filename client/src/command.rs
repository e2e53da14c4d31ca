//! Text commands accepted by the terminal front-end.
//!
//! Each input line is split on whitespace and parsed as a clap subcommand, so the
//! command list, argument checks and `help` output all come from the derive below.

use crate::account::{AccountView, Selection};
use crate::auth::{AuthScreen, ProfileType};
use crate::dashboard::ProfileTab;
use crate::error::ClientError;
use crate::location::LocationError;
use crate::session::Screen;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::str::FromStr;
use swingsfab_messaging::MessageId;
use swingsfab_profiles::{QuickFilter, UserId};

#[derive(Debug, Parser)]
#[command(
    name = "swingsfab",
    no_binary_name = true,
    disable_help_subcommand = true,
    help_template = "Commands:\n{subcommands}"
)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Sign in as the demo member
    Login { email: String, password: String },
    /// Create an account and sign in as the demo member
    Register {
        /// woman, man, couple, tv-ts or club
        profile_type: ProfileType,
        email: String,
        password: String,
        confirm_password: Option<String>,
    },
    /// Switch between the login and register screens
    Auth { screen: AuthScreen },
    Logout,
    /// dashboard, edit-profile or my-account
    Screen { screen: Screen },
    /// Open an account view by slug
    View { view: AccountView },
    /// Show the active account view
    Panel,
    /// Select a conversation, or `none` to clear
    Select {
        #[arg(value_parser = parse_selection)]
        target: Selection,
    },
    /// Reply in the selected conversation
    Send {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Toggle the saved flag of a message
    Save {
        #[arg(value_parser = parse_user_id)]
        counterpart: UserId,
        #[arg(value_parser = parse_message_id)]
        message: MessageId,
    },
    Unfriend {
        #[arg(value_parser = parse_user_id)]
        id: UserId,
    },
    /// "Message" button on the friends list
    #[command(name = "message")]
    MessageFriend {
        #[arg(value_parser = parse_user_id)]
        id: UserId,
    },
    Friends,
    Conversations,
    Sent,
    Saved,
    /// Show the dashboard grid
    Profiles,
    /// all, online, newest or near-you
    Filter { quick: QuickFilter },
    /// Edit the "More Filters" modal
    Filters {
        #[command(subcommand)]
        action: FiltersAction,
    },
    /// Open a profile
    Profile {
        #[arg(value_parser = parse_user_id)]
        id: UserId,
    },
    CloseProfile,
    /// about or details
    Tab { tab: ProfileTab },
    NextPhoto,
    PrevPhoto,
    Like {
        #[arg(value_parser = parse_user_id)]
        id: UserId,
    },
    /// Open a chat, or show the open one when no id is given
    Chat {
        #[arg(value_parser = parse_user_id)]
        id: Option<UserId>,
    },
    /// Send in the open chat
    Say {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    CloseChat,
    /// Toggle an interest chip on the edit-profile form
    Interest {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// Flip a notification or privacy setting
    Toggle { setting: String },
    /// Set the town on the personal details panel
    Town {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        town: Vec<String>,
    },
    /// Detect the town; pass an outcome to simulate a failure
    DetectLocation { outcome: Option<LocationOutcome> },
    /// Toggle JSON output
    Json,
    #[command(alias = "?")]
    Help,
    #[command(alias = "exit")]
    Quit,
}

/// Actions inside the "More Filters" modal.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum FiltersAction {
    Open,
    Close,
    Apply,
    Reset,
    #[command(name = "age")]
    MaxAge { years: u8 },
    Location {
        #[arg(num_args = 0.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    LookingFor {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        category: Vec<String>,
    },
}

/// Simulated geolocation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LocationOutcome {
    Deny,
    Unavailable,
    Timeout,
    Unknown,
}

impl From<LocationOutcome> for LocationError {
    fn from(outcome: LocationOutcome) -> Self {
        match outcome {
            LocationOutcome::Deny => LocationError::PermissionDenied,
            LocationOutcome::Unavailable => LocationError::PositionUnavailable,
            LocationOutcome::Timeout => LocationError::Timeout,
            LocationOutcome::Unknown => LocationError::Unknown,
        }
    }
}

/// Joins the words of a free-text argument back into one string.
pub fn joined(words: &[String]) -> String {
    words.join(" ")
}

/// The command list shown by `help`.
pub fn help_text() -> String {
    CommandLine::command().render_help().to_string()
}

fn parse_user_id(raw: &str) -> Result<UserId, String> {
    raw.parse::<u32>()
        .map(UserId)
        .map_err(|_| format!("'{raw}' is not a valid member id"))
}

fn parse_message_id(raw: &str) -> Result<MessageId, String> {
    raw.parse::<u64>()
        .map(MessageId)
        .map_err(|_| format!("'{raw}' is not a valid message id"))
}

fn parse_selection(raw: &str) -> Result<Selection, String> {
    match raw {
        "none" => Ok(Selection::None),
        id => parse_user_id(id).map(Selection::Selected),
    }
}

impl FromStr for Command {
    type Err = ClientError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        CommandLine::try_parse_from(line.split_whitespace())
            .map(|cli| cli.command)
            .map_err(|err| {
                let rendered = err.render().to_string();
                ClientError::Command(rendered.trim().trim_start_matches("error: ").to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        line.parse().unwrap()
    }

    #[test]
    fn parses_auth_commands() {
        assert_eq!(
            parse("login olivia@example.com hunter2"),
            Command::Login {
                email: "olivia@example.com".into(),
                password: "hunter2".into(),
            }
        );
        assert_eq!(
            parse("register tv-ts a@b.c pw pw"),
            Command::Register {
                profile_type: ProfileType::TvTs,
                email: "a@b.c".into(),
                password: "pw".into(),
                confirm_password: Some("pw".into()),
            }
        );
        assert_eq!(
            parse("auth register"),
            Command::Auth {
                screen: AuthScreen::Register
            }
        );
        assert!("login only-email".parse::<Command>().is_err());
        assert!("register alien a@b.c pw".parse::<Command>().is_err());
    }

    #[test]
    fn free_text_is_rejoined() {
        let Command::Send { text } = parse("send   see you  at eight ") else {
            panic!("expected send");
        };
        assert_eq!(joined(&text), "see you at eight");

        let Command::Say { text } = parse("say wait, what?") else {
            panic!("expected say");
        };
        assert_eq!(joined(&text), "wait, what?");
        assert!("say".parse::<Command>().is_err());
    }

    #[test]
    fn parses_navigation() {
        assert_eq!(
            parse("view friends-messages"),
            Command::View {
                view: AccountView::FriendsMessages
            }
        );
        assert_eq!(
            parse("screen my-account"),
            Command::Screen {
                screen: Screen::MyAccount
            }
        );
        assert_eq!(
            parse("select none"),
            Command::Select {
                target: Selection::None
            }
        );
        assert_eq!(
            parse("select 6"),
            Command::Select {
                target: Selection::Selected(UserId(6))
            }
        );
        assert_eq!(
            parse("filter near-you"),
            Command::Filter {
                quick: QuickFilter::NearYou
            }
        );
        assert_eq!(parse("message 1"), Command::MessageFriend { id: UserId(1) });
        assert_eq!(parse("chat"), Command::Chat { id: None });
        assert!("view inbox".parse::<Command>().is_err());
        assert!("select someone".parse::<Command>().is_err());
    }

    #[test]
    fn parses_save_and_filters() {
        assert_eq!(
            parse("save 1 3"),
            Command::Save {
                counterpart: UserId(1),
                message: MessageId(3),
            }
        );
        assert_eq!(
            parse("filters age 40"),
            Command::Filters {
                action: FiltersAction::MaxAge { years: 40 }
            }
        );
        let Command::Filters {
            action: FiltersAction::LookingFor { category },
        } = parse("filters looking-for Couples (MF)")
        else {
            panic!("expected looking-for");
        };
        assert_eq!(joined(&category), "Couples (MF)");
        assert_eq!(
            parse("filters location"),
            Command::Filters {
                action: FiltersAction::Location { text: vec![] }
            }
        );
        assert!("filters age old".parse::<Command>().is_err());
    }

    #[test]
    fn parses_location_outcomes() {
        assert_eq!(
            parse("detect-location"),
            Command::DetectLocation { outcome: None }
        );
        let Command::DetectLocation {
            outcome: Some(outcome),
        } = parse("detect-location deny")
        else {
            panic!("expected an outcome");
        };
        assert_eq!(LocationError::from(outcome), LocationError::PermissionDenied);
    }

    #[test]
    fn aliases_and_help() {
        assert_eq!(parse("exit"), Command::Quit);
        assert_eq!(parse("?"), Command::Help);

        let help = help_text();
        for name in ["login", "select", "filters", "detect-location", "close-chat"] {
            assert!(help.contains(name), "help is missing {name}");
        }
    }

    #[test]
    fn unknown_commands_are_errors() {
        let err = "dance".parse::<Command>().unwrap_err();
        assert!(matches!(err, ClientError::Command(msg) if msg.contains("dance")));
        assert!("".parse::<Command>().is_err());
    }
}
