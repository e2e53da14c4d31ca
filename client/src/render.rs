//! Plain-text and JSON renderings of command output.

use crate::account::{FlaggedEntry, Panel, Selection};
use crate::app::Output;
use crate::auth::{AuthScreen, ProfileType};
use crate::dashboard::ProfileTab;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use swingsfab_messaging::{format_relative, Conversation, Message, Sender};
use swingsfab_profiles::{ProfileFilter, QuickFilter, UserProfile};

pub fn json(output: &Output) -> serde_json::Result<String> {
    serde_json::to_string_pretty(output)
}

/// Renders `output` for the terminal. Message ages are relative to `now`.
pub fn text(output: &Output, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_output(&mut out, output, now);
    out.trim_end().to_string()
}

fn write_output(out: &mut String, output: &Output, now: DateTime<Utc>) -> std::fmt::Result {
    match output {
        Output::AuthScreen { screen } => match screen {
            AuthScreen::Login => writeln!(out, "Log in: login <email> <password>"),
            AuthScreen::Register => {
                writeln!(out, "Join as:")?;
                for kind in ProfileType::ALL {
                    let confirm = if kind.asks_confirmation() { " <confirm>" } else { "" };
                    writeln!(
                        out,
                        "  {:<7} {}: register {} <email> <password>{confirm}",
                        kind.label(),
                        kind.form_title(),
                        kind.slug()
                    )?;
                }
                Ok(())
            }
        },
        Output::LoggedIn {
            session,
            user,
            screen,
        } => {
            writeln!(out, "Welcome back, {}! (session {session})", user.display_name())?;
            writeln!(out, "screen: {screen}")
        }
        Output::LoggedOut { session } => writeln!(out, "Logged out of session {session}."),
        Output::Panel { view, panel } => {
            writeln!(out, "[{}] {}", view.section().title(), view.label())?;
            write_panel(out, panel, now)
        }
        Output::MessageSaved {
            counterpart,
            message,
        } => {
            let state = if message.is_saved() { "saved" } else { "unsaved" };
            writeln!(out, "Message {} with {counterpart} {state}.", message.id)
        }
        Output::Unfriended { friend, removed } => {
            if *removed {
                writeln!(out, "Removed {friend} from your friends.")
            } else {
                writeln!(out, "{friend} is not on your friends list.")
            }
        }
        Output::Profiles { filter, cards } => {
            writeln!(out, "{}", filter_summary(filter))?;
            if cards.is_empty() {
                writeln!(out, "  No members match these filters.")?;
            }
            for card in cards {
                let heart = if card.liked { " <3" } else { "" };
                writeln!(
                    out,
                    "  #{:<3} {:<22} {:<20} {}{heart}",
                    card.profile.id,
                    card.profile.name,
                    card.profile.location,
                    card.profile.status
                )?;
            }
            Ok(())
        }
        Output::FilterModal { draft } => {
            writeln!(out, "More Filters")?;
            let looking = if draft.looking_for.is_empty() {
                "any".to_string()
            } else {
                draft.looking_for.join(", ")
            };
            writeln!(out, "  Looking for: {looking}")?;
            match draft.max_age {
                Some(age) => writeln!(out, "  Age: up to {age}")?,
                None => writeln!(out, "  Age: any")?,
            }
            writeln!(
                out,
                "  Location: {}",
                draft.location.as_deref().unwrap_or("anywhere")
            )
        }
        Output::ProfileModal {
            modal,
            image,
            liked,
        } => {
            let profile = &modal.profile;
            writeln!(out, "{} ({})", profile.name, profile.status)?;
            writeln!(out, "  {}", profile.location)?;
            writeln!(
                out,
                "  photo {}/{}: {image}",
                modal.image_index + 1,
                profile.gallery_images.len().max(1)
            )?;
            if *liked {
                writeln!(out, "  You liked this profile.")?;
            }
            match modal.tab {
                ProfileTab::About => {
                    writeln!(out, "  Bio: {}", profile.bio)?;
                    writeln!(out, "  Interests: {}", profile.interests.join(", "))
                }
                ProfileTab::Details => {
                    writeln!(out, "  Looking for: {}", profile.looking_for.join(", "))?;
                    writeln!(out, "  Relationship Status: {}", profile.relationship_status)
                }
            }
        }
        Output::Liked { profile, liked } => {
            let verb = if *liked { "Liked" } else { "Unliked" };
            writeln!(out, "{verb} {profile}.")
        }
        Output::Chat {
            counterpart,
            messages,
            pending_replies,
        } => {
            writeln!(out, "Chat with {} ({})", counterpart.name, counterpart.status)?;
            if messages.is_empty() {
                writeln!(out, "  Say hello to {}!", counterpart.display_name())?;
            }
            for message in messages {
                write_message(out, message, counterpart, now)?;
            }
            if *pending_replies > 0 {
                writeln!(out, "  {} is typing...", counterpart.display_name())?;
            }
            Ok(())
        }
        Output::ChatClosed { cancelled_replies } => {
            writeln!(out, "Chat closed.")?;
            match cancelled_replies {
                0 => {}
                1 => writeln!(out, "  1 pending reply discarded.")?,
                n => writeln!(out, "  {n} pending replies discarded.")?,
            }
            Ok(())
        }
        Output::EditProfile { form } => {
            writeln!(out, "Edit Profile")?;
            writeln!(out, "  Name: {}", form.name)?;
            writeln!(out, "  Age: {}", form.age)?;
            writeln!(out, "  Location: {}", form.location)?;
            writeln!(out, "  Relationship Status: {}", form.relationship_status)?;
            writeln!(out, "  Bio: {}", form.bio)?;
            writeln!(out, "  Interests: {}", form.selected_interests.join(", "))?;
            writeln!(out, "  Looking For: {}", form.looking_for)
        }
        Output::Setting { key, enabled } => {
            let state = if *enabled { "on" } else { "off" };
            writeln!(out, "{key}: {state}")
        }
        Output::PersonalDetails { details } => {
            writeln!(out, "Town: {}", details.town)?;
            if details.detecting {
                writeln!(out, "  Detecting...")?;
            }
            if let Some(error) = &details.error {
                writeln!(out, "  {error}")?;
            }
            Ok(())
        }
        Output::Help { text } => writeln!(out, "{text}"),
        Output::JsonMode { enabled } => {
            let mode = if *enabled { "JSON" } else { "text" };
            writeln!(out, "Output mode: {mode}")
        }
        Output::Quit => writeln!(out, "Goodbye."),
    }
}

fn write_panel(out: &mut String, panel: &Panel, now: DateTime<Utc>) -> std::fmt::Result {
    match panel {
        Panel::Conversations {
            title,
            description,
            conversations,
            selection,
            open,
        } => {
            writeln!(out, "{title}: {description}")?;
            if conversations.is_empty() {
                writeln!(out, "  No conversations yet.")?;
            }
            for conversation in conversations {
                write_conversation_row(out, conversation, *selection, now)?;
            }
            match (selection, open) {
                (_, Some(conversation)) => {
                    writeln!(out)?;
                    writeln!(out, "-- {} --", conversation.counterpart.name)?;
                    for message in &conversation.messages {
                        write_message(out, message, &conversation.counterpart, now)?;
                    }
                    Ok(())
                }
                (Selection::Selected(id), None) => {
                    writeln!(out)?;
                    writeln!(out, "-- new conversation with {id} --")
                }
                (Selection::None, None) => writeln!(out, "Select a conversation to start messaging."),
            }
        }
        Panel::Sent {
            title,
            description,
            messages,
        }
        | Panel::Saved {
            title,
            description,
            messages,
        } => {
            writeln!(out, "{title}: {description}")?;
            if messages.is_empty() {
                writeln!(out, "  Nothing here yet.")?;
            }
            for entry in messages {
                write_flagged(out, entry, now)?;
            }
            Ok(())
        }
        Panel::Friends {
            title,
            description,
            friends,
        } => {
            writeln!(out, "{title}: {description}")?;
            if friends.is_empty() {
                writeln!(out, "  You have no friends yet.")?;
            }
            for friend in friends {
                writeln!(out, "  #{:<3} {:<22} {}", friend.id, friend.name, friend.status)?;
            }
            Ok(())
        }
        Panel::EditProfile {
            title,
            description,
            form,
        } => {
            writeln!(out, "{title}: {description}")?;
            writeln!(out, "  Name: {}", form.name)?;
            writeln!(out, "  Age: {}", form.age)?;
            writeln!(out, "  Location: {}", form.location)?;
            writeln!(out, "  Relationship Status: {}", form.relationship_status)?;
            writeln!(out, "  Bio: {}", form.bio)?;
            writeln!(out, "  Interests (comma separated): {}", form.interests)?;
            writeln!(out, "  Looking For (comma separated): {}", form.looking_for)
        }
        Panel::PersonalDetails {
            title,
            description,
            details,
        } => {
            writeln!(out, "{title}: {description}")?;
            writeln!(out, "  Town: {}", details.town)?;
            if let Some(error) = &details.error {
                writeln!(out, "  {error}")?;
            }
            Ok(())
        }
        Panel::Form {
            title,
            description,
            fields,
        } => {
            writeln!(out, "{title}: {description}")?;
            for field in fields {
                let value = if field.secret { "********" } else { field.value.as_str() };
                writeln!(out, "  {}: {value}", field.label)?;
            }
            Ok(())
        }
        Panel::Toggles {
            title,
            description,
            toggles,
        } => {
            writeln!(out, "{title}: {description}")?;
            for toggle in toggles {
                let mark = if toggle.enabled { "x" } else { " " };
                writeln!(out, "  [{mark}] {} ({}): {}", toggle.label, toggle.key, toggle.description)?;
            }
            Ok(())
        }
        Panel::Placeholder { title, description } => {
            writeln!(out, "{title}")?;
            writeln!(out, "  {description}")?;
            writeln!(out, "  Content for this section is coming soon.")
        }
    }
}

fn write_conversation_row(
    out: &mut String,
    conversation: &Conversation,
    selection: Selection,
    now: DateTime<Utc>,
) -> std::fmt::Result {
    let marker = if selection.id() == Some(conversation.counterpart_id()) {
        '>'
    } else {
        ' '
    };
    let unread = if conversation.has_unread() { '*' } else { ' ' };
    writeln!(
        out,
        "{marker}{unread} #{:<3} {:<22} {:>10}  {}",
        conversation.counterpart.id,
        conversation.counterpart.name,
        format_relative(conversation.last_message.date, now),
        conversation.preview()
    )
}

fn write_message(
    out: &mut String,
    message: &Message,
    counterpart: &UserProfile,
    now: DateTime<Utc>,
) -> std::fmt::Result {
    let author = match message.sender {
        Sender::Me => "You",
        Sender::Them => counterpart.display_name(),
    };
    let saved = if message.is_saved() { " [saved]" } else { "" };
    writeln!(
        out,
        "  ({}) {author} [{}]: {}{saved}",
        message.id,
        format_relative(message.date, now),
        message.text
    )
}

fn write_flagged(out: &mut String, entry: &FlaggedEntry, now: DateTime<Utc>) -> std::fmt::Result {
    let direction = match entry.message.sender {
        Sender::Me => "To",
        Sender::Them => "From",
    };
    writeln!(
        out,
        "  {direction} {} (#{}) [{}] ({}): {}",
        entry.counterpart_name,
        entry.counterpart,
        format_relative(entry.message.date, now),
        entry.message.id,
        entry.message.text
    )
}

fn filter_summary(filter: &ProfileFilter) -> String {
    let tabs: Vec<String> = QuickFilter::ALL
        .iter()
        .map(|quick| {
            if *quick == filter.quick {
                format!("[{}]", quick.label())
            } else {
                quick.label().to_string()
            }
        })
        .collect();
    let mut parts = vec![format!("Filter: {}", tabs.join(" "))];
    if !filter.looking_for.is_empty() {
        parts.push(format!("looking for {}", filter.looking_for.join("/")));
    }
    if let Some(age) = filter.max_age {
        parts.push(format!("age <= {age}"));
    }
    if let Some(location) = &filter.location {
        parts.push(format!("near '{location}'"));
    }
    parts.join(", ")
}
