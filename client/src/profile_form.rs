//! Edit-profile form state, prefilled from the member's profile.

use serde::{Deserialize, Serialize};
use swingsfab_profiles::UserProfile;

/// Interest checkboxes offered on the edit-profile page.
pub const INTEREST_CHOICES: [&str; 29] = [
    "Adult Parties",
    "Anal",
    "Blindfolds",
    "Cross-dressing",
    "Cuckolding",
    "Cybersex",
    "Dogging",
    "DP",
    "Fisting",
    "Gangbangs",
    "Group Sex",
    "Making Videos",
    "Oral",
    "Phone Sex",
    "Rimming",
    "Role Play",
    "Safe Sex",
    "Same Room Swapping",
    "Separate Room Swapping",
    "SM",
    "Soft Swing",
    "Spanking",
    "Swingers Clubs",
    "Taking Photos",
    "Threesomes",
    "Toys",
    "Voyeurism",
    "Watersports",
    "Webcams",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditProfileForm {
    pub name: String,
    pub age: String,
    pub location: String,
    pub relationship_status: String,
    pub bio: String,
    /// Comma separated, as typed in the free-text field.
    pub interests: String,
    pub looking_for: String,
    /// Checked interest chips. Changes stay local to the form.
    pub selected_interests: Vec<String>,
    pub image_url: String,
}

impl EditProfileForm {
    pub fn prefill(user: &UserProfile) -> Self {
        Self {
            name: user.display_name().to_string(),
            age: user.age.to_string(),
            location: user.location.clone(),
            relationship_status: user.relationship_status.clone(),
            bio: user.bio.clone(),
            interests: user.interests.join(", "),
            looking_for: user.looking_for.join(", "),
            selected_interests: user.interests.clone(),
            image_url: user.image_url.clone(),
        }
    }

    /// Checks or unchecks an interest chip. Returns whether it is now checked.
    pub fn toggle_interest(&mut self, interest: &str) -> bool {
        if let Some(pos) = self.selected_interests.iter().position(|i| i == interest) {
            self.selected_interests.remove(pos);
            false
        } else {
            self.selected_interests.push(interest.to_string());
            true
        }
    }

    pub fn is_selected(&self, interest: &str) -> bool {
        self.selected_interests.iter().any(|i| i == interest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingsfab_profiles::{ProfileStore, UserId};

    #[test]
    fn prefill_uses_profile_fields() {
        let profiles = ProfileStore::seeded();
        let olivia = profiles.get(UserId(9)).unwrap();
        let form = EditProfileForm::prefill(olivia);

        assert_eq!(form.name, "Olivia");
        assert_eq!(form.age, olivia.age.to_string());
        assert_eq!(form.location, olivia.location);
        assert_eq!(form.interests, olivia.interests.join(", "));
        assert_eq!(form.looking_for, olivia.looking_for.join(", "));
    }

    #[test]
    fn interest_chips_toggle_locally() {
        let profiles = ProfileStore::seeded();
        let olivia = profiles.get(UserId(9)).unwrap();
        let mut form = EditProfileForm::prefill(olivia);

        assert!(form.toggle_interest("Toys"));
        assert!(form.is_selected("Toys"));
        assert!(!form.toggle_interest("Toys"));
        assert!(!form.is_selected("Toys"));
        assert_eq!(profiles.get(UserId(9)).unwrap().interests, olivia.interests);
    }
}
