//! Website lifecycle services.
//!
//! [`WebsiteService`] drives the draft/publish state machine: every save
//! re-runs slug validation and the uniqueness oracle before touching the
//! store, and publishing folds that save and the visibility flip into one
//! repository update so a failed check never changes visibility.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    PublishWebsiteRequest, SaveWebsiteRequest, SlugAvailability, WebsiteCommand, WebsiteHandle,
    WebsiteQuery, WebsiteRepository, WebsiteRepositoryError,
};
use crate::domain::{
    Error, LifecycleAction, NewWebsite, Slug, UserId, WebsiteContent, WebsiteId, WebsitePatch,
    WebsiteRecord, WebsiteState,
};

/// Reason code attached to slug conflicts.
pub const SLUG_TAKEN_REASON: &str = "slug_taken";

/// Conflict reported when another website already holds the slug.
pub fn slug_taken_error() -> Error {
    Error::conflict("This URL slug is already taken. Please choose a different one.")
        .with_details(json!({ "field": "slug", "reason": SLUG_TAKEN_REASON }))
}

fn map_repository_error(error: WebsiteRepositoryError) -> Error {
    match error {
        WebsiteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("website repository unavailable: {message}"))
        }
        WebsiteRepositoryError::Query { message } => {
            Error::internal(format!("website repository error: {message}"))
        }
        WebsiteRepositoryError::SlugTaken { slug } => {
            debug!(%slug, "store rejected duplicate slug");
            slug_taken_error()
        }
    }
}

fn website_not_found(id: WebsiteId) -> Error {
    Error::not_found(format!("website {id} not found"))
}

fn missing_publish_fields() -> Error {
    Error::invalid_request("Organization name and URL slug are required to publish")
        .with_details(json!({ "reason": "missing_required_fields" }))
}

/// Website service implementing the command and query driving ports.
#[derive(Clone)]
pub struct WebsiteService<R, O> {
    repository: Arc<R>,
    oracle: Arc<O>,
}

impl<R, O> WebsiteService<R, O> {
    /// Create a service over a repository and a uniqueness oracle.
    pub fn new(repository: Arc<R>, oracle: Arc<O>) -> Self {
        Self { repository, oracle }
    }
}

impl<R, O> WebsiteService<R, O>
where
    R: WebsiteRepository,
    O: SlugAvailability,
{
    async fn load(&self, id: WebsiteId, owner_id: &UserId) -> Result<WebsiteRecord, Error> {
        self.repository
            .find_by_id(id, owner_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| website_not_found(id))
    }

    /// Syntactic validation followed by the uniqueness oracle.
    async fn checked_slug(
        &self,
        content: &WebsiteContent,
        exclude: Option<WebsiteId>,
    ) -> Result<Slug, Error> {
        let slug = Slug::new(content.slug.as_str())?;
        if !self.oracle.is_unique(&slug, exclude).await {
            return Err(slug_taken_error());
        }
        Ok(slug)
    }

    async fn apply_patch(
        &self,
        id: WebsiteId,
        owner_id: &UserId,
        patch: &WebsitePatch,
    ) -> Result<WebsiteRecord, Error> {
        self.repository
            .update(id, owner_id, patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| website_not_found(id))
    }
}

#[async_trait]
impl<R, O> WebsiteCommand for WebsiteService<R, O>
where
    R: WebsiteRepository,
    O: SlugAvailability,
{
    async fn save(&self, request: SaveWebsiteRequest) -> Result<WebsiteRecord, Error> {
        let SaveWebsiteRequest {
            owner_id,
            website_id,
            content,
        } = request;

        let state = match website_id {
            Some(id) => self.load(id, &owner_id).await?.state(),
            None => WebsiteState::Unsaved,
        };
        let next = state.apply(LifecycleAction::Save)?;
        let slug = self.checked_slug(&content, website_id).await?;

        let record = match website_id {
            None => self
                .repository
                .create(&owner_id, &NewWebsite { slug, content })
                .await
                .map_err(map_repository_error)?,
            Some(id) => {
                let patch = WebsitePatch {
                    slug: Some(slug),
                    content: Some(content),
                    is_published: None,
                };
                self.apply_patch(id, &owner_id, &patch).await?
            }
        };

        info!(
            website_id = %record.id,
            owner_id = %owner_id,
            slug = %record.slug,
            from = %state,
            to = %next,
            "website saved"
        );
        Ok(record)
    }

    async fn publish(&self, request: PublishWebsiteRequest) -> Result<WebsiteRecord, Error> {
        let PublishWebsiteRequest { handle, content } = request;
        let WebsiteHandle {
            owner_id,
            website_id,
        } = handle;

        let existing = self.load(website_id, &owner_id).await?;
        let state = existing.state();
        state.apply(LifecycleAction::Publish)?;

        let content = content.unwrap_or(existing.content);
        if !content.has_publish_essentials() {
            return Err(missing_publish_fields());
        }
        let slug = self.checked_slug(&content, Some(website_id)).await?;

        let patch = WebsitePatch {
            slug: Some(slug),
            content: Some(content),
            is_published: Some(true),
        };
        let record = self.apply_patch(website_id, &owner_id, &patch).await?;

        info!(
            website_id = %record.id,
            owner_id = %owner_id,
            slug = %record.slug,
            from = %state,
            "website published"
        );
        Ok(record)
    }

    async fn unpublish(&self, handle: WebsiteHandle) -> Result<WebsiteRecord, Error> {
        let existing = self.load(handle.website_id, &handle.owner_id).await?;
        let state = existing.state();
        if state.apply(LifecycleAction::Unpublish)? == state {
            return Ok(existing);
        }

        let record = self
            .apply_patch(
                handle.website_id,
                &handle.owner_id,
                &WebsitePatch::visibility(false),
            )
            .await?;
        info!(
            website_id = %record.id,
            owner_id = %handle.owner_id,
            slug = %record.slug,
            "website unpublished"
        );
        Ok(record)
    }

    async fn delete(&self, handle: WebsiteHandle) -> Result<(), Error> {
        let deleted = self
            .repository
            .delete(handle.website_id, &handle.owner_id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(website_not_found(handle.website_id));
        }
        info!(
            website_id = %handle.website_id,
            owner_id = %handle.owner_id,
            "website deleted"
        );
        Ok(())
    }
}

#[async_trait]
impl<R, O> WebsiteQuery for WebsiteService<R, O>
where
    R: WebsiteRepository,
    O: SlugAvailability,
{
    async fn get(&self, handle: WebsiteHandle) -> Result<WebsiteRecord, Error> {
        self.load(handle.website_id, &handle.owner_id).await
    }

    async fn list(&self, owner_id: &UserId) -> Result<Vec<WebsiteRecord>, Error> {
        self.repository
            .list_by_owner(owner_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "website_service_tests.rs"]
mod tests;
