//! Port for the external identity provider.
//!
//! Authentication and session storage live outside the builder. The provider
//! reports the signed-in account and pushes changes through a watch channel.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::{Credentials, UserIdentity};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// Email and password did not match an account.
        InvalidCredentials => "invalid email or password",
        /// Registration used an email that already has an account.
        AccountExists { email: String } => "an account already exists for {email}",
        /// The provider could not be reached.
        Connection { message: String } => "identity provider unavailable: {message}",
    }
}

/// Port for signing accounts in and out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The signed-in account, if any.
    async fn current_user(&self) -> Result<Option<UserIdentity>, IdentityProviderError>;

    /// Authenticate an existing account.
    async fn sign_in(&self, credentials: &Credentials)
    -> Result<UserIdentity, IdentityProviderError>;

    /// Create an account and sign it in.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: Option<String>,
    ) -> Result<UserIdentity, IdentityProviderError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), IdentityProviderError>;

    /// Ask the provider to email a password reset link.
    async fn send_password_reset(&self, email: &str) -> Result<(), IdentityProviderError>;

    /// Receive the signed-in account whenever it changes.
    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>>;
}
