//! User profile directory.
//!
//! Authentication lives with the external identity collaborator; this
//! directory only tracks the profile fields the catalog displays.

use std::collections::HashMap;
use std::sync::RwLock;

use ludia_core::models::UserProfile;
use uuid::Uuid;

#[derive(Default)]
pub struct UserDirectory {
    profiles: RwLock<HashMap<Uuid, UserProfile>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile (on login/registration callbacks).
    pub fn upsert(&self, profile: UserProfile) {
        let mut profiles = self.profiles.write().unwrap_or_else(|e| e.into_inner());
        profiles.insert(profile.id, profile);
    }

    pub fn get(&self, user_id: Uuid) -> Option<UserProfile> {
        let profiles = self.profiles.read().unwrap_or_else(|e| e.into_inner());
        profiles.get(&user_id).cloned()
    }

    /// Bump the published-game counter; no-op for unknown users.
    pub fn record_published(&self, user_id: Uuid) {
        let mut profiles = self.profiles.write().unwrap_or_else(|e| e.into_inner());
        if let Some(profile) = profiles.get_mut(&user_id) {
            profile.games_published += 1;
        }
    }

    /// Display name for a user, used when stamping records.
    pub fn display_name(&self, user_id: Uuid) -> Option<String> {
        self.get(user_id).map(|p| p.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_upsert_get_and_publish_count() {
        let directory = UserDirectory::new();
        let id = Uuid::new_v4();
        directory.upsert(UserProfile::new(
            id,
            "ana".into(),
            "ana@example.test".into(),
            Utc::now(),
        ));

        assert_eq!(directory.display_name(id).as_deref(), Some("ana"));

        directory.record_published(id);
        directory.record_published(id);
        assert_eq!(directory.get(id).map(|p| p.games_published), Some(2));

        // Unknown user: silently ignored.
        directory.record_published(Uuid::new_v4());
    }
}
