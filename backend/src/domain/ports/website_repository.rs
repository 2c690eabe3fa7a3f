//! Port for website persistence.
//!
//! Every owner-scoped call takes the owner id explicitly; a record that
//! exists but belongs to someone else is indistinguishable from a missing
//! one.

use async_trait::async_trait;

use crate::domain::{NewWebsite, Slug, UserId, WebsiteId, WebsitePatch, WebsiteRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by website repository adapters.
    pub enum WebsiteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "website repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "website repository query failed: {message}",
        /// The store's uniqueness constraint rejected the slug.
        SlugTaken { slug: String } =>
            "slug {slug} is already in use",
    }
}

/// Port for reading and writing website records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebsiteRepository: Send + Sync {
    /// Insert a new draft owned by `owner_id`.
    ///
    /// Fails with [`WebsiteRepositoryError::SlugTaken`] when another record
    /// already holds the slug.
    async fn create(
        &self,
        owner_id: &UserId,
        website: &NewWebsite,
    ) -> Result<WebsiteRecord, WebsiteRepositoryError>;

    /// Apply `patch` to the owner's record, returning `None` when no such
    /// record exists for that owner.
    async fn update(
        &self,
        id: WebsiteId,
        owner_id: &UserId,
        patch: &WebsitePatch,
    ) -> Result<Option<WebsiteRecord>, WebsiteRepositoryError>;

    /// Fetch one of the owner's records.
    async fn find_by_id(
        &self,
        id: WebsiteId,
        owner_id: &UserId,
    ) -> Result<Option<WebsiteRecord>, WebsiteRepositoryError>;

    /// Fetch the published record carrying `slug`.
    async fn find_published_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<WebsiteRecord>, WebsiteRepositoryError>;

    /// Report whether any record other than `exclude` holds `slug`,
    /// regardless of its visibility.
    async fn slug_in_use(
        &self,
        slug: &Slug,
        exclude: Option<WebsiteId>,
    ) -> Result<bool, WebsiteRepositoryError>;

    /// Delete one of the owner's records. Returns `false` when nothing
    /// matched.
    async fn delete(
        &self,
        id: WebsiteId,
        owner_id: &UserId,
    ) -> Result<bool, WebsiteRepositoryError>;

    /// All of the owner's records, most recently updated first.
    async fn list_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<WebsiteRecord>, WebsiteRepositoryError>;
}
