//! Dashboard filtering: the quick-filter chips and the "More Filters" modal.

use crate::{UserId, UserProfile};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 99;
pub const DEFAULT_MAX_AGE: u8 = 35;

/// Categories offered by the "More Filters" modal.
pub const LOOKING_FOR_CATEGORIES: [&str; 6] = [
    "Single Men",
    "Single Women",
    "Couples (MF)",
    "Couples (FF)",
    "Couples (MM)",
    "Groups",
];

/// Chip row above the profile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuickFilter {
    #[default]
    All,
    Online,
    Newest,
    NearYou,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 4] = [
        QuickFilter::All,
        QuickFilter::Online,
        QuickFilter::Newest,
        QuickFilter::NearYou,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QuickFilter::All => "All",
            QuickFilter::Online => "Online",
            QuickFilter::Newest => "Newest",
            QuickFilter::NearYou => "Near You",
        }
    }
}

impl FromStr for QuickFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(' ', "-").as_str() {
            "all" => Ok(QuickFilter::All),
            "online" => Ok(QuickFilter::Online),
            "newest" => Ok(QuickFilter::Newest),
            "near-you" | "nearyou" => Ok(QuickFilter::NearYou),
            other => Err(format!("unknown filter '{other}'")),
        }
    }
}

/// Criteria from the "More Filters" modal combined with the active chip.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileFilter {
    pub quick: QuickFilter,
    /// Selected categories; a profile matches if it is looking for any of them.
    pub looking_for: Vec<String>,
    pub max_age: Option<u8>,
    /// Case-insensitive substring of the profile's location.
    pub location: Option<String>,
}

impl ProfileFilter {
    /// Values the modal opens with.
    pub fn modal_defaults() -> Self {
        Self {
            max_age: Some(DEFAULT_MAX_AGE),
            ..Self::default()
        }
    }

    pub fn with_quick(mut self, quick: QuickFilter) -> Self {
        self.quick = quick;
        self
    }

    pub fn with_max_age(mut self, age: u8) -> Self {
        self.max_age = Some(age.clamp(MIN_AGE, MAX_AGE));
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        self.location = if location.trim().is_empty() {
            None
        } else {
            Some(location)
        };
        self
    }

    /// Flips a looking-for category on or off.
    pub fn toggle_looking_for(&mut self, category: &str) {
        if let Some(pos) = self.looking_for.iter().position(|c| c == category) {
            self.looking_for.remove(pos);
        } else {
            self.looking_for.push(category.to_string());
        }
    }

    /// Profiles visible to `viewer`, in display order.
    pub fn apply<'a>(&self, profiles: &'a [UserProfile], viewer: UserId) -> Vec<&'a UserProfile> {
        let viewer_state = profiles
            .iter()
            .find(|p| p.id == viewer)
            .and_then(|p| p.state_code());

        let mut visible: Vec<&UserProfile> = profiles
            .iter()
            .filter(|p| p.id != viewer)
            .filter(|p| match self.quick {
                QuickFilter::All | QuickFilter::Newest => true,
                QuickFilter::Online => p.is_online(),
                QuickFilter::NearYou => viewer_state.is_some() && p.state_code() == viewer_state,
            })
            .filter(|p| self.matches_criteria(p))
            .collect();

        if self.quick == QuickFilter::Newest {
            visible.sort_by(|a, b| b.id.cmp(&a.id));
        }
        visible
    }

    fn matches_criteria(&self, profile: &UserProfile) -> bool {
        if let Some(max_age) = self.max_age {
            if profile.age > max_age {
                return false;
            }
        }

        if let Some(location) = &self.location {
            let needle = location.trim().to_lowercase();
            if !profile.location.to_lowercase().contains(&needle) {
                return false;
            }
        }

        self.looking_for.is_empty()
            || self.looking_for.iter().any(|wanted| {
                profile
                    .looking_for
                    .iter()
                    .any(|offered| wanted.starts_with(offered.as_str()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProfileStore;

    const OLIVIA: UserId = UserId(9);

    fn ids(profiles: &[&UserProfile]) -> Vec<u32> {
        profiles.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn all_excludes_viewer() {
        let store = ProfileStore::seeded();
        let visible = ProfileFilter::default().apply(store.all(), OLIVIA);
        assert_eq!(visible.len(), 11);
        assert!(!ids(&visible).contains(&9));
    }

    #[test]
    fn online_keeps_only_online_members() {
        let store = ProfileStore::seeded();
        let filter = ProfileFilter::default().with_quick(QuickFilter::Online);
        let visible = filter.apply(store.all(), OLIVIA);
        assert!(visible.iter().all(|p| p.is_online()));
        assert_eq!(ids(&visible), vec![1, 3, 5, 6, 10, 11]);
    }

    #[test]
    fn newest_orders_by_id_descending() {
        let store = ProfileStore::seeded();
        let filter = ProfileFilter::default().with_quick(QuickFilter::Newest);
        let visible = filter.apply(store.all(), OLIVIA);
        assert_eq!(ids(&visible)[..3], [12, 11, 10]);
    }

    #[test]
    fn near_you_matches_state() {
        let store = ProfileStore::seeded();
        let filter = ProfileFilter::default().with_quick(QuickFilter::NearYou);
        // Chloe (LA) shares California with Ben and Ava & Noah.
        let visible = filter.apply(store.all(), UserId(4));
        assert_eq!(ids(&visible), vec![8, 11]);
        // Nobody else lives in Massachusetts.
        assert!(filter.apply(store.all(), OLIVIA).is_empty());
    }

    #[test]
    fn couples_category_matches_plain_couples() {
        let store = ProfileStore::seeded();
        let mut filter = ProfileFilter::default();
        filter.toggle_looking_for("Couples (MF)");
        let visible = filter.apply(store.all(), OLIVIA);
        assert_eq!(ids(&visible), vec![1, 3, 6, 7, 11]);

        filter.toggle_looking_for("Couples (MF)");
        assert!(filter.looking_for.is_empty());
    }

    #[test]
    fn age_and_location_narrow_results() {
        let store = ProfileStore::seeded();
        let filter = ProfileFilter::modal_defaults().with_location(", CA");
        let visible = filter.apply(store.all(), OLIVIA);
        // Ben (40) is over the default age limit.
        assert_eq!(ids(&visible), vec![4, 11]);
    }

    #[test]
    fn max_age_is_clamped() {
        let filter = ProfileFilter::default().with_max_age(5);
        assert_eq!(filter.max_age, Some(MIN_AGE));
        let filter = ProfileFilter::default().with_max_age(200);
        assert_eq!(filter.max_age, Some(MAX_AGE));
    }

    #[test]
    fn quick_filter_parses_labels() {
        assert_eq!("Near You".parse::<QuickFilter>(), Ok(QuickFilter::NearYou));
        assert_eq!("online".parse::<QuickFilter>(), Ok(QuickFilter::Online));
        assert!("nearby".parse::<QuickFilter>().is_err());
    }
}
