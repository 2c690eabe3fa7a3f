//! In-process adapters.
//!
//! Used when no database is configured and by the behaviour tests. They
//! honour the same port contracts as the PostgreSQL adapters, including
//! slug uniqueness on write.

mod identity_provider;
mod user_profile_repository;
mod website_repository;

pub use identity_provider::InMemoryIdentityProvider;
pub use user_profile_repository::InMemoryUserProfileRepository;
pub use website_repository::InMemoryWebsiteRepository;
