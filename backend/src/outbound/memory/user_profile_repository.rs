//! In-process profile store.
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserProfileRepository, UserProfileRepositoryError};
use crate::domain::{UserId, UserProfile};

/// [`UserProfileRepository`] keyed by user id.
#[derive(Debug, Default)]
pub struct InMemoryUserProfileRepository {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
}

impl InMemoryUserProfileRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored profile for `user_id`.
    pub fn profile(&self, user_id: &UserId) -> Option<UserProfile> {
        self.profiles
            .lock()
            .ok()
            .and_then(|profiles| profiles.get(user_id).cloned())
    }
}

#[async_trait]
impl UserProfileRepository for InMemoryUserProfileRepository {
    async fn record_sign_in(
        &self,
        profile: &UserProfile,
    ) -> Result<(), UserProfileRepositoryError> {
        let mut profiles = self
            .profiles
            .lock()
            .map_err(|_| UserProfileRepositoryError::query("profile store lock poisoned"))?;
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn latest_sign_in_wins() {
        let repo = InMemoryUserProfileRepository::new();
        let user_id = UserId::random();
        let first = UserProfile {
            user_id: user_id.clone(),
            email: Some("ada@example.org".to_owned()),
            display_name: None,
            last_sign_in_at: Utc::now() - Duration::hours(1),
        };
        let second = UserProfile {
            display_name: Some("Ada".to_owned()),
            last_sign_in_at: Utc::now(),
            ..first.clone()
        };

        repo.record_sign_in(&first).await.expect("first");
        repo.record_sign_in(&second).await.expect("second");

        assert_eq!(repo.profile(&user_id), Some(second));
    }
}
