//! In-process identity provider for local runs and behaviour tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::watch;
use zeroize::Zeroizing;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{Credentials, UserId, UserIdentity};

struct Account {
    identity: UserIdentity,
    password: Zeroizing<String>,
}

/// [`IdentityProvider`] holding accounts in memory with a single session.
pub struct InMemoryIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    reset_requests: Mutex<Vec<String>>,
    session: watch::Sender<Option<UserIdentity>>,
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            reset_requests: Mutex::new(Vec::new()),
            session: watch::Sender::new(None),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, IdentityProviderError> {
    mutex
        .lock()
        .map_err(|_| IdentityProviderError::connection("identity store lock poisoned"))
}

impl InMemoryIdentityProvider {
    /// Create a provider with no accounts and nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emails for which a password reset was requested, oldest first.
    pub fn password_reset_requests(&self) -> Vec<String> {
        self.reset_requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn current_user(&self) -> Result<Option<UserIdentity>, IdentityProviderError> {
        Ok(self.session.borrow().clone())
    }

    async fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> Result<UserIdentity, IdentityProviderError> {
        let identity = {
            let accounts = lock(&self.accounts)?;
            accounts
                .get(credentials.email())
                .filter(|account| account.password.as_str() == credentials.password())
                .map(|account| account.identity.clone())
                .ok_or_else(IdentityProviderError::invalid_credentials)?
        };
        self.session.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: Option<String>,
    ) -> Result<UserIdentity, IdentityProviderError> {
        let identity = {
            let mut accounts = lock(&self.accounts)?;
            if accounts.contains_key(credentials.email()) {
                return Err(IdentityProviderError::account_exists(credentials.email()));
            }
            let identity = UserIdentity {
                id: UserId::random(),
                email: Some(credentials.email().to_owned()),
                display_name,
                email_verified: false,
            };
            accounts.insert(
                credentials.email().to_owned(),
                Account {
                    identity: identity.clone(),
                    password: Zeroizing::new(credentials.password().to_owned()),
                },
            );
            identity
        };
        self.session.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), IdentityProviderError> {
        self.session.send_replace(None);
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), IdentityProviderError> {
        // Unknown addresses succeed silently so callers cannot enumerate accounts.
        let known = lock(&self.accounts)?.contains_key(email);
        if known {
            lock(&self.reset_requests)?.push(email.to_owned());
        }
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.session.subscribe()
    }
}
