//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, PublicSiteQuery, SlugAvailability, WebsiteCommand, WebsiteQuery,
};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Resolver for published websites.
    pub public_sites: Arc<dyn PublicSiteQuery>,
    /// Uniqueness oracle consulted by the availability endpoint.
    pub slugs: Arc<dyn SlugAvailability>,
    /// Owner lifecycle transitions.
    pub websites: Arc<dyn WebsiteCommand>,
    /// Owner-scoped reads.
    pub websites_query: Arc<dyn WebsiteQuery>,
    /// Sign-in and registration.
    pub accounts: Arc<dyn AccountCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Resolver for published websites.
    pub public_sites: Arc<dyn PublicSiteQuery>,
    /// Uniqueness oracle consulted by the availability endpoint.
    pub slugs: Arc<dyn SlugAvailability>,
    /// Owner lifecycle transitions.
    pub websites: Arc<dyn WebsiteCommand>,
    /// Owner-scoped reads.
    pub websites_query: Arc<dyn WebsiteQuery>,
    /// Sign-in and registration.
    pub accounts: Arc<dyn AccountCommand>,
}

impl HttpState {
    /// Bundle the ports for handlers.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            public_sites,
            slugs,
            websites,
            websites_query,
            accounts,
        } = ports;
        Self {
            public_sites,
            slugs,
            websites,
            websites_query,
            accounts,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
