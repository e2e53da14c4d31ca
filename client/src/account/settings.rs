//! On/off switches on the notification and privacy panels.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingToggle {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub enabled: bool,
}

const fn toggle(
    key: &'static str,
    label: &'static str,
    description: &'static str,
    enabled: bool,
) -> SettingToggle {
    SettingToggle {
        key,
        label,
        description,
        enabled,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsToggles {
    pub notifications: Vec<SettingToggle>,
    pub privacy: Vec<SettingToggle>,
}

impl Default for SettingsToggles {
    fn default() -> Self {
        Self {
            notifications: vec![
                toggle(
                    "email-notifications",
                    "Email Notifications",
                    "Receive emails about new messages and matches.",
                    true,
                ),
                toggle(
                    "push-notifications",
                    "Push Notifications",
                    "Get push notifications on your device.",
                    true,
                ),
                toggle(
                    "profile-views",
                    "Profile Views",
                    "Notify me when someone views my profile.",
                    false,
                ),
                toggle(
                    "promotional-emails",
                    "Promotional Emails",
                    "Receive occasional updates and offers from Swingsfab.",
                    false,
                ),
            ],
            privacy: vec![
                toggle(
                    "online-status",
                    "Show my online status",
                    "Let others see when you are online.",
                    true,
                ),
                toggle(
                    "profile-visibility",
                    "Profile Visibility",
                    "Your profile is visible to all members.",
                    true,
                ),
                toggle(
                    "photo-privacy",
                    "Photo Privacy",
                    "Your photos are visible to all members.",
                    true,
                ),
            ],
        }
    }
}

impl SettingsToggles {
    /// Flips the switch with `key` and returns its new state.
    pub fn toggle(&mut self, key: &str) -> Option<bool> {
        let setting = self
            .notifications
            .iter_mut()
            .chain(self.privacy.iter_mut())
            .find(|t| t.key == key)?;
        setting.enabled = !setting.enabled;
        Some(setting.enabled)
    }

    pub fn is_enabled(&self, key: &str) -> Option<bool> {
        self.notifications
            .iter()
            .chain(self.privacy.iter())
            .find(|t| t.key == key)
            .map(|t| t.enabled)
    }
}
