//! Builders for HTTP state from the configured store.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;

use site_builder::domain::ports::{AccountCommand, UserProfileRepository, WebsiteRepository};
use site_builder::domain::{
    AccountService, PublicSiteService, RepositorySlugOracle, WebsiteService,
};
use site_builder::inbound::http::state::{HttpState, HttpStatePorts};
use site_builder::outbound::memory::{
    InMemoryIdentityProvider, InMemoryUserProfileRepository, InMemoryWebsiteRepository,
};
use site_builder::outbound::persistence::{DieselUserProfileRepository, DieselWebsiteRepository};

use super::ServerConfig;

fn accounts_over<P>(profiles: Arc<P>) -> Arc<dyn AccountCommand>
where
    P: UserProfileRepository + 'static,
{
    Arc::new(AccountService::new(
        Arc::new(InMemoryIdentityProvider::new()),
        profiles,
    ))
}

fn ports_over<R>(
    repository: Arc<R>,
    store_timeout: Duration,
    accounts: Arc<dyn AccountCommand>,
) -> HttpStatePorts
where
    R: WebsiteRepository + 'static,
{
    let oracle = Arc::new(RepositorySlugOracle::with_timeout(
        Arc::clone(&repository),
        store_timeout,
    ));
    let websites = Arc::new(WebsiteService::new(Arc::clone(&repository), oracle.clone()));
    HttpStatePorts {
        public_sites: Arc::new(PublicSiteService::new(repository)),
        slugs: oracle,
        websites: websites.clone(),
        websites_query: websites,
        accounts,
    }
}

/// Wire handlers to PostgreSQL when a pool is configured, otherwise to the
/// in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => ports_over(
            Arc::new(DieselWebsiteRepository::new(pool.clone())),
            config.store_timeout,
            accounts_over(Arc::new(DieselUserProfileRepository::new(pool.clone()))),
        ),
        None => ports_over(
            Arc::new(InMemoryWebsiteRepository::new()),
            config.store_timeout,
            accounts_over(Arc::new(InMemoryUserProfileRepository::new())),
        ),
    };
    web::Data::new(HttpState::from(ports))
}
