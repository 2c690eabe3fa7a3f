//! Port for the best-effort profile record kept per account.
use async_trait::async_trait;

use crate::domain::UserProfile;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by profile repository adapters.
    pub enum UserProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user profile repository query failed: {message}",
    }
}

/// Port for recording sign-in activity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Insert or update the profile with the latest sign-in details.
    async fn record_sign_in(&self, profile: &UserProfile)
    -> Result<(), UserProfileRepositoryError>;
}
