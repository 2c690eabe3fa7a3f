//! Public resolution of website paths.
//!
//! A path segment is looked up only after it passes slug validation, so
//! reserved words and malformed paths never reach the store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    PublicSiteQuery, PublishedSite, WebsiteRepository, WebsiteRepositoryError,
};
use crate::domain::{Error, Slug};

fn site_not_found() -> Error {
    Error::not_found("Website not found")
}

fn map_repository_error(error: WebsiteRepositoryError) -> Error {
    match error {
        WebsiteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("website repository unavailable: {message}"))
        }
        other => Error::internal(format!("website repository error: {other}")),
    }
}

/// Resolver implementing [`PublicSiteQuery`] over the website repository.
#[derive(Clone)]
pub struct PublicSiteService<R> {
    repository: Arc<R>,
}

impl<R> PublicSiteService<R> {
    /// Create a resolver over the website repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> PublicSiteQuery for PublicSiteService<R>
where
    R: WebsiteRepository,
{
    async fn resolve(&self, segment: &str) -> Result<PublishedSite, Error> {
        let slug = match Slug::new(segment) {
            Ok(slug) => slug,
            Err(reason) => {
                debug!(segment, reason = reason.code(), "path is not a routable slug");
                return Err(site_not_found());
            }
        };

        let record = self
            .repository
            .find_published_by_slug(&slug)
            .await
            .map_err(map_repository_error)?
            .filter(|record| record.is_published)
            .ok_or_else(site_not_found)?;

        Ok(PublishedSite::from(record))
    }
}
