//! PostgreSQL-backed `WebsiteRepository` implementation using Diesel ORM.
//!
//! Owner scoping is part of every filter. Slug uniqueness is enforced by
//! the `websites_slug_key` constraint; a violation surfaces as
//! [`WebsiteRepositoryError::SlugTaken`].

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{WebsiteRepository, WebsiteRepositoryError};
use crate::domain::{
    NewWebsite, Slug, UserId, WebsiteContent, WebsiteId, WebsitePatch, WebsiteRecord,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewWebsiteRow, WebsiteChangeset, WebsiteRow};
use super::pool::{DbPool, PoolError};
use super::schema::websites;

/// Diesel-backed implementation of the `WebsiteRepository` port.
#[derive(Clone)]
pub struct DieselWebsiteRepository {
    pool: DbPool,
}

impl DieselWebsiteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> WebsiteRepositoryError {
    WebsiteRepositoryError::connection(error.into_message())
}

/// Map Diesel errors; `slug` is reported when a uniqueness check fires.
fn map_diesel_error(error: &diesel::result::Error, slug: Option<&Slug>) -> WebsiteRepositoryError {
    match (classify_diesel_error(error), slug) {
        (DieselFailure::UniqueViolation, Some(slug)) => {
            WebsiteRepositoryError::slug_taken(slug.as_str())
        }
        (DieselFailure::UniqueViolation, None) => {
            WebsiteRepositoryError::query("unique constraint violated")
        }
        (DieselFailure::Connection(message), _) => WebsiteRepositoryError::connection(message),
        (DieselFailure::Query(message), _) => WebsiteRepositoryError::query(message),
    }
}

fn map_read_error(error: diesel::result::Error) -> WebsiteRepositoryError {
    map_diesel_error(&error, None)
}

fn content_to_json(content: &WebsiteContent) -> Result<serde_json::Value, WebsiteRepositoryError> {
    serde_json::to_value(content)
        .map_err(|err| WebsiteRepositoryError::query(format!("encode content: {err}")))
}

/// Convert a database row to a domain record.
///
/// The stored slug is taken as-is; the save path re-validates it.
fn row_to_record(row: WebsiteRow) -> Result<WebsiteRecord, WebsiteRepositoryError> {
    let slug = Slug::from_stored(row.slug);
    let content: WebsiteContent = serde_json::from_value(row.content)
        .map_err(|err| WebsiteRepositoryError::query(format!("decode content: {err}")))?;
    Ok(WebsiteRecord {
        id: WebsiteId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.owner_id),
        slug,
        content,
        is_published: row.is_published,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl WebsiteRepository for DieselWebsiteRepository {
    async fn create(
        &self,
        owner_id: &UserId,
        website: &NewWebsite,
    ) -> Result<WebsiteRecord, WebsiteRepositoryError> {
        let new_row = NewWebsiteRow {
            id: Uuid::new_v4(),
            owner_id: *owner_id.as_uuid(),
            slug: website.slug.as_str(),
            org_name: website.content.org_name.as_str(),
            content: content_to_json(&website.content)?,
            is_published: false,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: WebsiteRow = diesel::insert_into(websites::table)
            .values(&new_row)
            .returning(WebsiteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, Some(&website.slug)))?;

        row_to_record(row)
    }

    async fn update(
        &self,
        id: WebsiteId,
        owner_id: &UserId,
        patch: &WebsitePatch,
    ) -> Result<Option<WebsiteRecord>, WebsiteRepositoryError> {
        let changeset = WebsiteChangeset {
            slug: patch.slug.as_ref().map(Slug::as_str),
            org_name: patch.content.as_ref().map(|content| content.org_name.as_str()),
            content: patch.content.as_ref().map(content_to_json).transpose()?,
            is_published: patch.is_published,
            updated_at: Utc::now(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<WebsiteRow> = diesel::update(websites::table)
            .filter(
                websites::id
                    .eq(id.as_uuid())
                    .and(websites::owner_id.eq(owner_id.as_uuid())),
            )
            .set(&changeset)
            .returning(WebsiteRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, patch.slug.as_ref()))?;

        row.map(row_to_record).transpose()
    }

    async fn find_by_id(
        &self,
        id: WebsiteId,
        owner_id: &UserId,
    ) -> Result<Option<WebsiteRecord>, WebsiteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<WebsiteRow> = websites::table
            .filter(websites::id.eq(id.as_uuid()))
            .filter(websites::owner_id.eq(owner_id.as_uuid()))
            .select(WebsiteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_record).transpose()
    }

    async fn find_published_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<WebsiteRecord>, WebsiteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<WebsiteRow> = websites::table
            .filter(websites::slug.eq(slug.as_str()))
            .filter(websites::is_published.eq(true))
            .select(WebsiteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_record).transpose()
    }

    async fn slug_in_use(
        &self,
        slug: &Slug,
        exclude: Option<WebsiteId>,
    ) -> Result<bool, WebsiteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = websites::table
            .filter(websites::slug.eq(slug.as_str()))
            .into_boxed();
        if let Some(exclude) = exclude {
            query = query.filter(websites::id.ne(*exclude.as_uuid()));
        }
        let holders: i64 = query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_read_error)?;

        Ok(holders > 0)
    }

    async fn delete(
        &self,
        id: WebsiteId,
        owner_id: &UserId,
    ) -> Result<bool, WebsiteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            websites::table
                .filter(websites::id.eq(id.as_uuid()))
                .filter(websites::owner_id.eq(owner_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_read_error)?;

        Ok(deleted > 0)
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<WebsiteRecord>, WebsiteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<WebsiteRow> = websites::table
            .filter(websites::owner_id.eq(owner_id.as_uuid()))
            .order_by(websites::updated_at.desc())
            .select(WebsiteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> WebsiteRow {
        let content = WebsiteContent::for_project("Hope Center");
        WebsiteRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            slug: "hope-center".to_owned(),
            org_name: content.org_name.clone(),
            content: serde_json::to_value(&content).expect("encode content"),
            is_published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert_eq!(
            repo_err,
            WebsiteRepositoryError::connection("connection refused")
        );
    }

    #[rstest]
    fn unique_violation_maps_to_slug_taken() {
        let slug = Slug::new("hope-center").expect("valid slug");
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );

        assert_eq!(
            map_diesel_error(&error, Some(&slug)),
            WebsiteRepositoryError::slug_taken("hope-center")
        );
        assert!(matches!(
            map_diesel_error(&error, None),
            WebsiteRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn row_converts_to_record(row: WebsiteRow) {
        let id = row.id;
        let record = row_to_record(row).expect("valid row");

        assert_eq!(record.id, WebsiteId::from_uuid(id));
        assert_eq!(record.slug.as_str(), "hope-center");
        assert_eq!(record.content.org_name, "Hope Center");
        assert!(record.is_published);
    }

    #[rstest]
    fn row_with_newly_reserved_slug_still_loads(mut row: WebsiteRow) {
        row.slug = "admin".to_owned();

        let record = row_to_record(row).expect("stored draft stays readable");
        assert_eq!(record.slug.as_str(), "admin");
        assert!(crate::domain::validate_slug(record.slug.as_str()).is_err());
    }

    #[rstest]
    fn row_with_undecodable_content_is_a_query_error(mut row: WebsiteRow) {
        row.content = serde_json::json!({ "leadership": "not a list" });

        let err = row_to_record(row).expect_err("bad content");
        assert!(matches!(err, WebsiteRepositoryError::Query { .. }));
    }

    #[rstest]
    fn row_with_sparse_content_uses_defaults(mut row: WebsiteRow) {
        row.content = serde_json::json!({ "orgName": "Hope Center" });

        let record = row_to_record(row).expect("defaults fill gaps");
        assert_eq!(record.content.leadership.len(), 2);
        assert_eq!(record.content.slug, "");
    }
}
