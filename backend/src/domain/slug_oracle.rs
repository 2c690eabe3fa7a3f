//! Slug uniqueness oracle backed by the website repository.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{SlugAvailability, WebsiteRepository};
use crate::domain::{Slug, WebsiteId};

/// Default bound on a single uniqueness lookup.
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(5);

/// [`SlugAvailability`] implementation that asks the record store.
///
/// Store errors and timeouts are logged and reported as "not unique", so a
/// flaky store can never let a duplicate slug through.
#[derive(Clone)]
pub struct RepositorySlugOracle<R> {
    repository: Arc<R>,
    timeout: Duration,
}

impl<R> RepositorySlugOracle<R> {
    /// Create an oracle with [`DEFAULT_ORACLE_TIMEOUT`].
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_timeout(repository, DEFAULT_ORACLE_TIMEOUT)
    }

    /// Create an oracle with an explicit lookup timeout.
    pub fn with_timeout(repository: Arc<R>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }
}

#[async_trait]
impl<R> SlugAvailability for RepositorySlugOracle<R>
where
    R: WebsiteRepository,
{
    async fn is_unique(&self, slug: &Slug, exclude: Option<WebsiteId>) -> bool {
        let lookup = self.repository.slug_in_use(slug, exclude);
        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(in_use)) => !in_use,
            Ok(Err(error)) => {
                warn!(%slug, %error, "slug uniqueness lookup failed; treating slug as taken");
                false
            }
            Err(_) => {
                warn!(
                    %slug,
                    timeout = ?self.timeout,
                    "slug uniqueness lookup timed out; treating slug as taken"
                );
                false
            }
        }
    }
}
