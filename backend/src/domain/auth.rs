//! Credentials passed to the identity provider.
//!
//! Inbound payloads are validated here before an account service talks to
//! the provider port.

use std::fmt;

use zeroize::Zeroizing;

/// Minimum password length accepted on registration.
pub const REGISTRATION_PASSWORD_MIN: usize = 6;

/// Domain error returned when credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email did not contain `@`.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
    /// Password is shorter than the registration minimum.
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated email/password credentials.
///
/// ## Invariants
/// - `email` is trimmed, non-empty and contains `@`.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use site_builder::domain::Credentials;
///
/// let creds = Credentials::sign_in(" ada@example.org ", "secret").unwrap();
/// assert_eq!(creds.email(), "ada@example.org");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Credentials for signing in to an existing account.
    pub fn sign_in(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = normalise_email(email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Credentials for a new account; enforces the minimum password length.
    pub fn register(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let creds = Self::sign_in(email, password)?;
        if password.chars().count() < REGISTRATION_PASSWORD_MIN {
            return Err(CredentialsValidationError::PasswordTooShort {
                min: REGISTRATION_PASSWORD_MIN,
            });
        }
        Ok(creds)
    }

    /// Trimmed email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password as provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Trim and sanity-check an email address.
pub fn normalise_email(email: &str) -> Result<String, CredentialsValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(CredentialsValidationError::EmptyEmail);
    }
    if !trimmed.contains('@') {
        return Err(CredentialsValidationError::InvalidEmail);
    }
    Ok(trimmed.to_owned())
}
