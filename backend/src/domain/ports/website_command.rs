//! Driving port for website lifecycle transitions.
//!
//! Editing sessions and inbound adapters call this port to save, publish,
//! unpublish and delete websites without knowing how validation or storage
//! are wired.

use async_trait::async_trait;

use crate::domain::{Error, UserId, WebsiteContent, WebsiteId, WebsiteRecord};

/// Identifies one website as seen by its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteHandle {
    /// Account that owns the website.
    pub owner_id: UserId,
    /// The website itself.
    pub website_id: WebsiteId,
}

impl WebsiteHandle {
    /// Pair an owner with one of their websites.
    pub fn new(owner_id: UserId, website_id: WebsiteId) -> Self {
        Self {
            owner_id,
            website_id,
        }
    }
}

/// Request to persist builder content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveWebsiteRequest {
    /// Account saving the content.
    pub owner_id: UserId,
    /// Existing record to update, or `None` to create one.
    pub website_id: Option<WebsiteId>,
    /// Content to persist; its `slug` field is the candidate slug.
    pub content: WebsiteContent,
}

/// Request to make a website public.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishWebsiteRequest {
    /// Target website.
    pub handle: WebsiteHandle,
    /// Content to save as part of publishing. `None` publishes the stored
    /// content as-is, still re-validating it.
    pub content: Option<WebsiteContent>,
}

/// Domain use-case port for lifecycle transitions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebsiteCommand: Send + Sync {
    /// Validate and persist content; creates the record when `website_id`
    /// is absent. A published record stays published.
    async fn save(&self, request: SaveWebsiteRequest) -> Result<WebsiteRecord, Error>;

    /// Re-validate, persist and flip the visibility flag in one step.
    async fn publish(&self, request: PublishWebsiteRequest) -> Result<WebsiteRecord, Error>;

    /// Hide a website. A draft is returned unchanged.
    async fn unpublish(&self, handle: WebsiteHandle) -> Result<WebsiteRecord, Error>;

    /// Permanently remove a website.
    async fn delete(&self, handle: WebsiteHandle) -> Result<(), Error>;
}
