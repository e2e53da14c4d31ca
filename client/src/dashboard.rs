//! Profile grid, filters and the profile modal.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use swingsfab_profiles::filters::LOOKING_FOR_CATEGORIES;
use swingsfab_profiles::{ProfileFilter, ProfileStore, QuickFilter, UserId, UserProfile};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileTab {
    #[default]
    About,
    Details,
}

impl FromStr for ProfileTab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "about" => Ok(ProfileTab::About),
            "details" => Ok(ProfileTab::Details),
            other => Err(format!("unknown tab '{other}'")),
        }
    }
}

/// An opened profile with its photo carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileModal {
    pub profile: UserProfile,
    pub image_index: usize,
    pub tab: ProfileTab,
}

impl ProfileModal {
    fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            image_index: 0,
            tab: ProfileTab::default(),
        }
    }

    pub fn current_image(&self) -> &str {
        self.profile.gallery_image(self.image_index as isize)
    }

    fn step(&mut self, delta: isize) {
        let len = self.profile.gallery_images.len().max(1) as isize;
        self.image_index = (self.image_index as isize + delta).rem_euclid(len) as usize;
    }
}

/// Dashboard state for one session.
#[derive(Debug, Clone)]
pub struct Dashboard {
    viewer: UserId,
    filter: ProfileFilter,
    /// Working copy while the "More Filters" modal is open.
    draft: Option<ProfileFilter>,
    modal: Option<ProfileModal>,
    liked: BTreeSet<UserId>,
}

impl Dashboard {
    pub fn new(viewer: UserId) -> Self {
        Self {
            viewer,
            filter: ProfileFilter::default(),
            draft: None,
            modal: None,
            liked: BTreeSet::new(),
        }
    }

    pub fn filter(&self) -> &ProfileFilter {
        &self.filter
    }

    pub fn quick_filter(&self) -> QuickFilter {
        self.filter.quick
    }

    pub fn set_quick_filter(&mut self, quick: QuickFilter) {
        self.filter.quick = quick;
        debug!(filter = quick.label(), "quick filter changed");
    }

    /// Profiles on the grid, viewer excluded.
    pub fn visible_profiles<'a>(&self, profiles: &'a ProfileStore) -> Vec<&'a UserProfile> {
        self.filter.apply(profiles.all(), self.viewer)
    }

    pub fn filter_draft(&self) -> Option<&ProfileFilter> {
        self.draft.as_ref()
    }

    /// Opens "More Filters" on the applied criteria, or on the modal defaults the first time.
    pub fn open_filters(&mut self) -> &ProfileFilter {
        let untouched = self.filter.looking_for.is_empty()
            && self.filter.max_age.is_none()
            && self.filter.location.is_none();
        let draft = if untouched {
            ProfileFilter::modal_defaults().with_quick(self.filter.quick)
        } else {
            self.filter.clone()
        };
        self.draft.insert(draft)
    }

    fn draft_mut(&mut self) -> Result<&mut ProfileFilter> {
        self.draft.as_mut().ok_or(ClientError::FilterModalClosed)
    }

    pub fn set_max_age(&mut self, age: u8) -> Result<()> {
        let draft = self.draft_mut()?;
        *draft = std::mem::take(draft).with_max_age(age);
        Ok(())
    }

    pub fn set_location(&mut self, location: &str) -> Result<()> {
        let draft = self.draft_mut()?;
        *draft = std::mem::take(draft).with_location(location);
        Ok(())
    }

    /// Flips a looking-for category, matched case-insensitively against the modal's list.
    pub fn toggle_looking_for(&mut self, category: &str) -> Result<()> {
        let wanted = category.trim();
        let known = LOOKING_FOR_CATEGORIES
            .iter()
            .find(|c| c.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ClientError::Command(format!("unknown category '{wanted}'")))?;
        self.draft_mut()?.toggle_looking_for(known);
        Ok(())
    }

    pub fn reset_filters(&mut self) -> Result<()> {
        let quick = self.filter.quick;
        *self.draft_mut()? = ProfileFilter::modal_defaults().with_quick(quick);
        Ok(())
    }

    pub fn apply_filters(&mut self) -> Result<&ProfileFilter> {
        let draft = self.draft.take().ok_or(ClientError::FilterModalClosed)?;
        debug!(?draft, "filters applied");
        self.filter = draft;
        Ok(&self.filter)
    }

    /// Closes the modal without applying.
    pub fn close_filters(&mut self) {
        self.draft = None;
    }

    pub fn profile_modal(&self) -> Option<&ProfileModal> {
        self.modal.as_ref()
    }

    pub fn open_profile(&mut self, profiles: &ProfileStore, id: UserId) -> Result<&ProfileModal> {
        let profile = profiles.require(id)?.clone();
        Ok(self.modal.insert(ProfileModal::new(profile)))
    }

    pub fn close_profile(&mut self) {
        self.modal = None;
    }

    fn modal_mut(&mut self) -> Result<&mut ProfileModal> {
        self.modal.as_mut().ok_or(ClientError::NoProfileOpen)
    }

    pub fn next_photo(&mut self) -> Result<&ProfileModal> {
        let modal = self.modal_mut()?;
        modal.step(1);
        Ok(modal)
    }

    pub fn prev_photo(&mut self) -> Result<&ProfileModal> {
        let modal = self.modal_mut()?;
        modal.step(-1);
        Ok(modal)
    }

    pub fn set_tab(&mut self, tab: ProfileTab) -> Result<&ProfileModal> {
        let modal = self.modal_mut()?;
        modal.tab = tab;
        Ok(modal)
    }

    /// Flips the heart on a profile. Returns whether it is now liked.
    pub fn toggle_like(&mut self, profiles: &ProfileStore, id: UserId) -> Result<bool> {
        profiles.require(id)?;
        let liked = if self.liked.remove(&id) {
            false
        } else {
            self.liked.insert(id)
        };
        debug!(profile = %id, liked, "like toggled");
        Ok(liked)
    }

    pub fn is_liked(&self, id: UserId) -> bool {
        self.liked.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingsfab_profiles::filters::DEFAULT_MAX_AGE;

    const OLIVIA: UserId = UserId(9);

    fn ids(profiles: &[&UserProfile]) -> Vec<u32> {
        profiles.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn grid_excludes_viewer() {
        let profiles = ProfileStore::seeded();
        let dashboard = Dashboard::new(OLIVIA);
        let visible = dashboard.visible_profiles(&profiles);
        assert_eq!(visible.len(), 11);
        assert!(!ids(&visible).contains(&9));
    }

    #[test]
    fn quick_filter_newest_orders_by_id() {
        let profiles = ProfileStore::seeded();
        let mut dashboard = Dashboard::new(OLIVIA);
        dashboard.set_quick_filter(QuickFilter::Newest);
        let visible = ids(&dashboard.visible_profiles(&profiles));
        assert_eq!(visible.first(), Some(&12));
        assert!(visible.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn filter_modal_draft_applies_on_confirm() {
        let profiles = ProfileStore::seeded();
        let mut dashboard = Dashboard::new(OLIVIA);

        assert_eq!(dashboard.set_max_age(30), Err(ClientError::FilterModalClosed));

        assert_eq!(dashboard.open_filters().max_age, Some(DEFAULT_MAX_AGE));
        dashboard.set_location(", CA").unwrap();
        assert_eq!(dashboard.visible_profiles(&profiles).len(), 11);

        dashboard.apply_filters().unwrap();
        assert!(dashboard.filter_draft().is_none());
        let visible = dashboard.visible_profiles(&profiles);
        assert!(visible.iter().all(|p| p.location.ends_with(", CA")));
        assert!(visible.iter().all(|p| p.age <= DEFAULT_MAX_AGE));

        dashboard.open_filters();
        dashboard.reset_filters().unwrap();
        dashboard.close_filters();
        assert_eq!(dashboard.filter().location.as_deref(), Some(", CA"));
    }

    #[test]
    fn looking_for_categories_are_validated() {
        let mut dashboard = Dashboard::new(OLIVIA);
        dashboard.open_filters();
        dashboard.toggle_looking_for("couples (mf)").unwrap();
        assert_eq!(
            dashboard.filter_draft().unwrap().looking_for,
            vec!["Couples (MF)".to_string()]
        );
        assert!(matches!(
            dashboard.toggle_looking_for("Aliens"),
            Err(ClientError::Command(_))
        ));
    }

    #[test]
    fn gallery_navigation_wraps() {
        let profiles = ProfileStore::seeded();
        let mut dashboard = Dashboard::new(OLIVIA);
        assert_eq!(dashboard.next_photo().unwrap_err(), ClientError::NoProfileOpen);

        let count = dashboard
            .open_profile(&profiles, UserId(1))
            .unwrap()
            .profile
            .gallery_images
            .len();
        let last = dashboard.prev_photo().unwrap();
        assert_eq!(last.image_index, count - 1);
        assert_eq!(last.current_image(), last.profile.gallery_images[count - 1]);
        assert_eq!(dashboard.next_photo().unwrap().image_index, 0);

        let modal = dashboard.set_tab(ProfileTab::Details).unwrap();
        assert_eq!(modal.tab, ProfileTab::Details);

        dashboard.close_profile();
        assert!(dashboard.profile_modal().is_none());
    }

    #[test]
    fn likes_toggle() {
        let profiles = ProfileStore::seeded();
        let mut dashboard = Dashboard::new(OLIVIA);
        assert_eq!(dashboard.toggle_like(&profiles, UserId(3)), Ok(true));
        assert!(dashboard.is_liked(UserId(3)));
        assert_eq!(dashboard.toggle_like(&profiles, UserId(3)), Ok(false));
        assert!(dashboard.toggle_like(&profiles, UserId(99)).unwrap_err().is_not_found());
    }
}
