//! Account use-cases on top of the identity provider.
//!
//! Owners are passed explicitly to website operations; this service is the
//! one place that turns "whoever is signed in" into a [`UserId`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::domain::ports::{
    AccountCommand, IdentityProvider, IdentityProviderError, UserProfileRepository,
};
use crate::domain::{Credentials, Error, UserId, UserIdentity, UserProfile, normalise_email};

fn map_identity_error(error: &IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::InvalidCredentials => Error::unauthorized(error.to_string()),
        IdentityProviderError::AccountExists { .. } => Error::conflict(error.to_string()),
        IdentityProviderError::Connection { .. } => Error::service_unavailable(error.to_string()),
    }
}

/// Sign-in, registration and session lookups.
#[derive(Clone)]
pub struct AccountService<I, P> {
    identity: Arc<I>,
    profiles: Arc<P>,
}

impl<I, P> AccountService<I, P>
where
    I: IdentityProvider,
    P: UserProfileRepository,
{
    /// Create the service from its two collaborators.
    pub fn new(identity: Arc<I>, profiles: Arc<P>) -> Self {
        Self { identity, profiles }
    }

    /// Authenticate an existing account.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, Error> {
        let credentials = Credentials::sign_in(email, password)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let identity = self
            .identity
            .sign_in(&credentials)
            .await
            .map_err(|err| map_identity_error(&err))?;
        self.touch_profile(&identity).await;
        info!(user_id = %identity.id, "account signed in");
        Ok(identity)
    }

    /// Create an account, sign it in and record its profile.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<UserIdentity, Error> {
        let credentials = Credentials::register(email, password)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let display_name = display_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());
        let identity = self
            .identity
            .sign_up(&credentials, display_name)
            .await
            .map_err(|err| map_identity_error(&err))?;
        self.touch_profile(&identity).await;
        info!(user_id = %identity.id, "account registered");
        Ok(identity)
    }

    /// End the current session.
    pub async fn sign_out(&self) -> Result<(), Error> {
        self.identity.sign_out().await.map_err(|err| map_identity_error(&err))
    }

    /// Request a password reset email.
    pub async fn send_password_reset(&self, email: &str) -> Result<(), Error> {
        let email = normalise_email(email).map_err(|err| Error::invalid_request(err.to_string()))?;
        self.identity
            .send_password_reset(&email)
            .await
            .map_err(|err| map_identity_error(&err))
    }

    /// The signed-in account, if any.
    pub async fn current_user(&self) -> Result<Option<UserIdentity>, Error> {
        self.identity.current_user().await.map_err(|err| map_identity_error(&err))
    }

    /// Owner id of the signed-in account, or `unauthorized`.
    pub async fn require_owner(&self) -> Result<UserId, Error> {
        self.current_user()
            .await?
            .map(|identity| identity.id)
            .ok_or_else(|| Error::unauthorized("sign in to manage websites"))
    }

    /// Follow sign-in and sign-out events.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.identity.subscribe()
    }

    async fn touch_profile(&self, identity: &UserIdentity) {
        let profile = UserProfile::signed_in(identity, Utc::now());
        if let Err(error) = self.profiles.record_sign_in(&profile).await {
            warn!(user_id = %identity.id, %error, "failed to record sign-in on profile");
        }
    }
}

#[async_trait]
impl<I, P> AccountCommand for AccountService<I, P>
where
    I: IdentityProvider,
    P: UserProfileRepository,
{
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, Error> {
        Self::sign_in(self, email, password).await
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<UserIdentity, Error> {
        Self::register(self, email, password, display_name).await
    }

    async fn sign_out(&self) -> Result<(), Error> {
        Self::sign_out(self).await
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), Error> {
        Self::send_password_reset(self, email).await
    }
}
