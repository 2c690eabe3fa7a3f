//! In-process website store.
//!
//! Enforces the same uniqueness constraint as the `websites.slug` column:
//! the check and the write happen under one lock, so concurrent sessions
//! racing for a slug see exactly one winner.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{WebsiteRepository, WebsiteRepositoryError};
use crate::domain::{NewWebsite, Slug, UserId, WebsiteId, WebsitePatch, WebsiteRecord};

/// [`WebsiteRepository`] backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryWebsiteRepository {
    records: Mutex<HashMap<WebsiteId, WebsiteRecord>>,
}

type Records = HashMap<WebsiteId, WebsiteRecord>;

fn slug_held_by_other(records: &Records, slug: &Slug, exclude: Option<WebsiteId>) -> bool {
    records
        .values()
        .any(|record| record.slug == *slug && Some(record.id) != exclude)
}

impl InMemoryWebsiteRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>, WebsiteRepositoryError> {
        self.records
            .lock()
            .map_err(|_| WebsiteRepositoryError::query("website store lock poisoned"))
    }
}

#[async_trait]
impl WebsiteRepository for InMemoryWebsiteRepository {
    async fn create(
        &self,
        owner_id: &UserId,
        website: &NewWebsite,
    ) -> Result<WebsiteRecord, WebsiteRepositoryError> {
        let mut records = self.lock()?;
        if slug_held_by_other(&records, &website.slug, None) {
            return Err(WebsiteRepositoryError::slug_taken(website.slug.as_str()));
        }

        let now = Utc::now();
        let record = WebsiteRecord {
            id: WebsiteId::random(),
            owner_id: owner_id.clone(),
            slug: website.slug.clone(),
            content: website.content.clone(),
            is_published: false,
            created_at: now,
            updated_at: now,
        };
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: WebsiteId,
        owner_id: &UserId,
        patch: &WebsitePatch,
    ) -> Result<Option<WebsiteRecord>, WebsiteRepositoryError> {
        let mut records = self.lock()?;
        let owned = records
            .get(&id)
            .is_some_and(|record| record.owner_id == *owner_id);
        if !owned {
            return Ok(None);
        }
        if let Some(slug) = &patch.slug {
            if slug_held_by_other(&records, slug, Some(id)) {
                return Err(WebsiteRepositoryError::slug_taken(slug.as_str()));
            }
        }

        let Some(record) = records.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(slug) = &patch.slug {
            record.slug = slug.clone();
        }
        if let Some(content) = &patch.content {
            record.content = content.clone();
        }
        if let Some(is_published) = patch.is_published {
            record.is_published = is_published;
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn find_by_id(
        &self,
        id: WebsiteId,
        owner_id: &UserId,
    ) -> Result<Option<WebsiteRecord>, WebsiteRepositoryError> {
        let records = self.lock()?;
        Ok(records
            .get(&id)
            .filter(|record| record.owner_id == *owner_id)
            .cloned())
    }

    async fn find_published_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<WebsiteRecord>, WebsiteRepositoryError> {
        let records = self.lock()?;
        Ok(records
            .values()
            .find(|record| record.is_published && record.slug == *slug)
            .cloned())
    }

    async fn slug_in_use(
        &self,
        slug: &Slug,
        exclude: Option<WebsiteId>,
    ) -> Result<bool, WebsiteRepositoryError> {
        let records = self.lock()?;
        Ok(slug_held_by_other(&records, slug, exclude))
    }

    async fn delete(
        &self,
        id: WebsiteId,
        owner_id: &UserId,
    ) -> Result<bool, WebsiteRepositoryError> {
        let mut records = self.lock()?;
        let owned = records
            .get(&id)
            .is_some_and(|record| record.owner_id == *owner_id);
        if owned {
            records.remove(&id);
        }
        Ok(owned)
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<WebsiteRecord>, WebsiteRepositoryError> {
        let records = self.lock()?;
        let mut owned: Vec<WebsiteRecord> = records
            .values()
            .filter(|record| record.owner_id == *owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(owned)
    }
}
