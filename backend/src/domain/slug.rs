//! Website slug validation and derivation.
//!
//! A slug is the public routing key of a website (`/{slug}`). Validation is
//! pure: it never consults the record store. Global uniqueness is checked
//! separately through the [`SlugAvailability`](crate::domain::ports::SlugAvailability)
//! port.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::Error;

/// Minimum slug length in characters.
pub const SLUG_MIN_LEN: usize = 3;
/// Maximum slug length in characters.
pub const SLUG_MAX_LEN: usize = 50;

/// Slugs that collide with application routes or infrastructure names.
pub const RESERVED_SLUGS: &[&str] = &[
    "home",
    "dashboard",
    "build",
    "login",
    "signup",
    "register",
    "auth",
    "admin",
    "api",
    "www",
    "mail",
    "email",
    "support",
    "help",
    "docs",
    "blog",
    "news",
    "about",
    "contact",
    "terms",
    "privacy",
    "legal",
    "app",
    "mobile",
    "web",
    "site",
    "website",
    "domain",
    "server",
    "root",
    "public",
    "private",
    "secure",
    "ssl",
    "http",
    "https",
    "ftp",
    "sftp",
    "ssh",
    "telnet",
    "smtp",
    "pop",
    "imap",
    "settings",
    "config",
    "configuration",
    "setup",
    "install",
    "assets",
    "static",
    "images",
    "img",
    "css",
    "js",
    "fonts",
    "uploads",
    "downloads",
    "files",
    "media",
    "content",
    "test",
    "testing",
    "dev",
    "development",
    "staging",
    "production",
    "preview",
    "demo",
    "sample",
    "template",
];

/// Reasons a candidate slug fails syntactic validation.
///
/// Variants are ordered by the sequence in which [`validate_slug`] checks
/// them; the first failing rule is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugValidationError {
    /// Empty once trimmed.
    Required,
    /// Shorter than [`SLUG_MIN_LEN`].
    TooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Longer than [`SLUG_MAX_LEN`].
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Contains characters outside `[a-z0-9-]`.
    InvalidCharacters,
    /// Starts or ends with `-`.
    LeadingOrTrailingHyphen,
    /// Contains `--`.
    ConsecutiveHyphens,
    /// Listed in [`RESERVED_SLUGS`].
    Reserved,
}

impl SlugValidationError {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::InvalidCharacters => "invalid_characters",
            Self::LeadingOrTrailingHyphen => "leading_or_trailing_hyphen",
            Self::ConsecutiveHyphens => "consecutive_hyphens",
            Self::Reserved => "reserved",
        }
    }
}

impl fmt::Display for SlugValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "URL slug is required"),
            Self::TooShort { min } => {
                write!(f, "URL slug must be at least {min} characters long")
            }
            Self::TooLong { max } => write!(f, "URL slug must be at most {max} characters long"),
            Self::InvalidCharacters => write!(
                f,
                "URL slug can only contain lowercase letters, numbers, and hyphens"
            ),
            Self::LeadingOrTrailingHyphen => {
                write!(f, "URL slug cannot start or end with a hyphen")
            }
            Self::ConsecutiveHyphens => write!(f, "URL slug cannot contain consecutive hyphens"),
            Self::Reserved => write!(
                f,
                "This URL slug cannot be used. Please choose a different one."
            ),
        }
    }
}

impl std::error::Error for SlugValidationError {}

impl From<SlugValidationError> for Error {
    fn from(value: SlugValidationError) -> Self {
        Self::invalid_request(value.to_string())
            .with_details(json!({ "field": "slug", "reason": value.code() }))
    }
}

static SLUG_CHARS_RE: OnceLock<Regex> = OnceLock::new();
static DERIVE_STRIP_RE: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RUN_RE: OnceLock<Regex> = OnceLock::new();

fn compile(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("slug regex {pattern} failed to compile: {error}"))
    })
}

fn slug_chars_regex() -> &'static Regex {
    compile(&SLUG_CHARS_RE, "^[a-z0-9-]+$")
}

fn derive_strip_regex() -> &'static Regex {
    compile(&DERIVE_STRIP_RE, r"[^a-z0-9\s-]")
}

fn whitespace_run_regex() -> &'static Regex {
    compile(&WHITESPACE_RUN_RE, r"\s+")
}

/// Return `true` when `candidate` is one of [`RESERVED_SLUGS`].
pub fn is_reserved_slug(candidate: &str) -> bool {
    RESERVED_SLUGS.contains(&candidate)
}

/// Validate a candidate slug against the syntactic rules.
///
/// # Examples
/// ```
/// use site_builder::domain::{SlugValidationError, validate_slug};
///
/// assert!(validate_slug("hope-center").is_ok());
/// assert_eq!(validate_slug("a--b"), Err(SlugValidationError::ConsecutiveHyphens));
/// ```
pub fn validate_slug(candidate: &str) -> Result<(), SlugValidationError> {
    if candidate.trim().is_empty() {
        return Err(SlugValidationError::Required);
    }

    let length = candidate.chars().count();
    if length < SLUG_MIN_LEN {
        return Err(SlugValidationError::TooShort { min: SLUG_MIN_LEN });
    }
    if length > SLUG_MAX_LEN {
        return Err(SlugValidationError::TooLong { max: SLUG_MAX_LEN });
    }

    if !slug_chars_regex().is_match(candidate) {
        return Err(SlugValidationError::InvalidCharacters);
    }
    if candidate.starts_with('-') || candidate.ends_with('-') {
        return Err(SlugValidationError::LeadingOrTrailingHyphen);
    }
    if candidate.contains("--") {
        return Err(SlugValidationError::ConsecutiveHyphens);
    }
    if is_reserved_slug(candidate) {
        return Err(SlugValidationError::Reserved);
    }
    Ok(())
}

/// Suggest a slug for a display name.
///
/// Lowercases, drops anything outside `[a-z0-9\s-]` and collapses whitespace
/// runs into single hyphens. The result is advisory and may still fail
/// [`validate_slug`].
///
/// # Examples
/// ```
/// use site_builder::domain::derive_slug;
///
/// assert_eq!(derive_slug("Hope Foundation"), "hope-foundation");
/// assert_eq!(derive_slug("  St. Mary's  Pantry "), "st-marys-pantry");
/// ```
pub fn derive_slug(display_name: &str) -> String {
    let lowered = display_name.trim().to_lowercase();
    let stripped = derive_strip_regex().replace_all(&lowered, "");
    whitespace_run_regex()
        .replace_all(&stripped, "-")
        .into_owned()
}

/// Normalise text typed directly into the slug field.
///
/// Lowercases and keeps only `[a-z0-9-]`; spaces are dropped rather than
/// converted.
pub fn sanitize_slug_input(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '-')
        .collect()
}

/// A slug that passed [`validate_slug`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate and wrap a candidate slug.
    pub fn new(candidate: impl Into<String>) -> Result<Self, SlugValidationError> {
        let candidate = candidate.into();
        validate_slug(&candidate)?;
        Ok(Self(candidate))
    }

    /// Wrap a slug read back from the store without re-validating it.
    ///
    /// The reserved list can grow after a record was saved; such records
    /// must stay loadable so their owner can pick a new slug. Save and
    /// publish validate again before anything is written.
    pub(crate) fn from_stored(stored: String) -> Self {
        Self(stored)
    }

    /// Borrow the slug text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
