//! Driving port for reading an owner's websites.

use async_trait::async_trait;

use crate::domain::{Error, UserId, WebsiteRecord};

use super::WebsiteHandle;

/// Domain use-case port for owner-scoped reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebsiteQuery: Send + Sync {
    /// Load one website, or `not_found` when it is missing or not owned by
    /// the caller.
    async fn get(&self, handle: WebsiteHandle) -> Result<WebsiteRecord, Error>;

    /// The owner's websites, most recently updated first.
    async fn list(&self, owner_id: &UserId) -> Result<Vec<WebsiteRecord>, Error>;
}
