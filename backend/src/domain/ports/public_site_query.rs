//! Driving port for resolving public website paths.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Error, Slug, WebsiteContent, WebsiteRecord};

/// A published website as served to anonymous visitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedSite {
    /// Routing key the site was resolved by.
    pub slug: Slug,
    /// Public content.
    pub content: WebsiteContent,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<WebsiteRecord> for PublishedSite {
    fn from(value: WebsiteRecord) -> Self {
        Self {
            slug: value.slug,
            content: value.content,
            updated_at: value.updated_at,
        }
    }
}

/// Domain use-case port mapping a path segment to published content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicSiteQuery: Send + Sync {
    /// Resolve `segment` to a published site or `not_found`.
    async fn resolve(&self, segment: &str) -> Result<PublishedSite, Error>;
}
