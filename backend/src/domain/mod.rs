//! Domain primitives, services and ports.
//!
//! Purpose: Define the website lifecycle independently of HTTP and storage.
//! Types keep their invariants in constructors and document serialisation
//! contracts (serde) in Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport-agnostic error payload.
//! - Slug / `validate_slug` / `derive_slug` — routing key rules.
//! - WebsiteState / LifecycleAction — draft/publish state machine.
//! - WebsiteService, PublicSiteService, AccountService, EditingSession —
//!   use-cases over the ports in [`ports`].

pub mod account_service;
pub mod auth;
pub mod editing_session;
pub mod error;
pub mod lifecycle;
pub mod ports;
pub mod public_site_service;
pub mod slug;
pub mod slug_oracle;
pub mod user;
pub mod website;
pub mod website_service;

pub use self::account_service::AccountService;
pub use self::auth::{
    Credentials, CredentialsValidationError, REGISTRATION_PASSWORD_MIN, normalise_email,
};
pub use self::editing_session::{BuilderStep, EditingSession};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::lifecycle::{LifecycleAction, LifecycleError, WebsiteState};
pub use self::public_site_service::PublicSiteService;
pub use self::slug::{
    RESERVED_SLUGS, SLUG_MAX_LEN, SLUG_MIN_LEN, Slug, SlugValidationError, derive_slug,
    is_reserved_slug, sanitize_slug_input, validate_slug,
};
pub use self::slug_oracle::{DEFAULT_ORACLE_TIMEOUT, RepositorySlugOracle};
pub use self::user::{UserId, UserIdentity, UserProfile, UserValidationError};
pub use self::website::{
    AccentColor, FontFamily, LeadershipMember, NewWebsite, Program, WebsiteContent, WebsiteId,
    WebsitePatch, WebsiteRecord, WhatWeDoItem,
};
pub use self::website_service::{SLUG_TAKEN_REASON, WebsiteService, slug_taken_error};

