//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod identity_provider;
mod public_site_query;
mod slug_availability;
mod user_profile_repository;
mod website_command;
mod website_query;
mod website_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use public_site_query::MockPublicSiteQuery;
pub use public_site_query::{PublicSiteQuery, PublishedSite};
#[cfg(test)]
pub use slug_availability::MockSlugAvailability;
pub use slug_availability::{FixtureSlugAvailability, SlugAvailability};
#[cfg(test)]
pub use user_profile_repository::MockUserProfileRepository;
pub use user_profile_repository::{UserProfileRepository, UserProfileRepositoryError};
#[cfg(test)]
pub use website_command::MockWebsiteCommand;
pub use website_command::{
    PublishWebsiteRequest, SaveWebsiteRequest, WebsiteCommand, WebsiteHandle,
};
#[cfg(test)]
pub use website_query::MockWebsiteQuery;
pub use website_query::WebsiteQuery;
#[cfg(test)]
pub use website_repository::MockWebsiteRepository;
pub use website_repository::{WebsiteRepository, WebsiteRepositoryError};

#[cfg(test)]
mod tests;
