//! PostgreSQL-backed `UserProfileRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::UserProfile;
use crate::domain::ports::{UserProfileRepository, UserProfileRepositoryError};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::UserProfileRow;
use super::pool::{DbPool, PoolError};
use super::schema::user_profiles;

/// Diesel-backed implementation of the `UserProfileRepository` port.
#[derive(Clone)]
pub struct DieselUserProfileRepository {
    pool: DbPool,
}

impl DieselUserProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserProfileRepositoryError {
    UserProfileRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserProfileRepositoryError {
    match classify_diesel_error(&error) {
        DieselFailure::Connection(message) => UserProfileRepositoryError::connection(message),
        DieselFailure::UniqueViolation => {
            UserProfileRepositoryError::query("unique constraint violated")
        }
        DieselFailure::Query(message) => UserProfileRepositoryError::query(message),
    }
}

fn profile_row(profile: &UserProfile) -> UserProfileRow<'_> {
    UserProfileRow {
        user_id: *profile.user_id.as_uuid(),
        email: profile.email.as_deref(),
        display_name: profile.display_name.as_deref(),
        last_sign_in_at: profile.last_sign_in_at,
    }
}

#[async_trait]
impl UserProfileRepository for DieselUserProfileRepository {
    async fn record_sign_in(
        &self,
        profile: &UserProfile,
    ) -> Result<(), UserProfileRepositoryError> {
        let row = profile_row(profile);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(user_profiles::table)
            .values(&row)
            .on_conflict(user_profiles::user_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
