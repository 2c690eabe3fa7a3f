//! Driving port for account sign-in and registration.
//!
//! Inbound adapters keep their own notion of "who is signed in" (the HTTP
//! adapter uses a session cookie); this port only verifies credentials and
//! returns the identity to remember.

use async_trait::async_trait;

use crate::domain::{Error, UserIdentity};

/// Domain use-case port for account operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Authenticate an existing account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, Error>;

    /// Create an account and sign it in.
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<UserIdentity, Error>;

    /// End the provider-side session.
    async fn sign_out(&self) -> Result<(), Error>;

    /// Request a password reset email. Unknown addresses succeed silently.
    async fn send_password_reset(&self, email: &str) -> Result<(), Error>;
}
