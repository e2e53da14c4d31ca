use swingsfab_profiles::{ProfileStore, UserId, UserProfile, FRIEND_IDS};
use tracing::info;

/// The viewer's friends, kept in profile seed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FriendList {
    ids: Vec<UserId>,
}

impl FriendList {
    /// Ids without a profile are dropped.
    pub fn new(profiles: &ProfileStore, ids: &[UserId]) -> Self {
        let ids = profiles
            .all()
            .iter()
            .map(|p| p.id)
            .filter(|id| ids.contains(id))
            .collect();
        Self { ids }
    }

    pub fn seeded(profiles: &ProfileStore) -> Self {
        Self::new(profiles, &FRIEND_IDS)
    }

    pub fn ids(&self) -> &[UserId] {
        &self.ids
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Removes a friend. Returns false when `id` was not a friend.
    pub fn unfriend(&mut self, id: UserId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|friend| *friend != id);
        let removed = self.ids.len() != before;
        if removed {
            info!(friend = %id, "unfriended");
        }
        removed
    }

    pub fn profiles<'a>(&self, profiles: &'a ProfileStore) -> Vec<&'a UserProfile> {
        self.ids.iter().filter_map(|id| profiles.get(*id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_friends_follow_profile_order() {
        let profiles = ProfileStore::seeded();
        let friends = FriendList::new(&profiles, &[UserId(6), UserId(1), UserId(404)]);
        assert_eq!(friends.ids(), &[UserId(1), UserId(6)]);
        assert_eq!(FriendList::seeded(&profiles), friends);
    }

    #[test]
    fn unfriend_is_idempotent() {
        let profiles = ProfileStore::seeded();
        let mut friends = FriendList::seeded(&profiles);
        assert!(friends.unfriend(UserId(6)));
        assert!(!friends.unfriend(UserId(6)));
        assert_eq!(friends.ids(), &[UserId(1)]);
        assert_eq!(friends.profiles(&profiles)[0].display_name(), "Jessica");
    }
}
