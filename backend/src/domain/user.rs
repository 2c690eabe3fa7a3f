//! Account identity as seen by the site builder.
//!
//! The identity provider owns authentication; the builder only needs a
//! stable owner identifier plus the profile fields it records on sign-in.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier was not a canonical UUID string.
    InvalidId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable account identifier stored as a UUID.
///
/// Every repository call that touches a website takes the owner id
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an existing UUID, typically read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// The signed-in account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    /// Provider-assigned account id.
    pub id: UserId,
    /// Email address, when the provider exposes one.
    pub email: Option<String>,
    /// Display name chosen at registration.
    pub display_name: Option<String>,
    /// Whether the provider has verified the email address.
    pub email_verified: bool,
}

/// Profile record kept alongside the identity provider.
///
/// Written on every sign-in and registration; failures to write it never
/// block authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Owning account.
    pub user_id: UserId,
    /// Email address at last sign-in.
    pub email: Option<String>,
    /// Display name at last sign-in.
    pub display_name: Option<String>,
    /// When the account last signed in.
    pub last_sign_in_at: DateTime<Utc>,
}

impl UserProfile {
    /// Build the profile snapshot for an identity signing in at `at`.
    pub fn signed_in(identity: &UserIdentity, at: DateTime<Utc>) -> Self {
        Self {
            user_id: identity.id.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            last_sign_in_at: at,
        }
    }
}
