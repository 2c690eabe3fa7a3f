//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{user_profiles, websites};

/// Row struct for reading from the websites table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = websites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WebsiteRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub slug: String,
    #[expect(dead_code, reason = "denormalised copy of content.orgName")]
    pub org_name: String,
    pub content: serde_json::Value,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating website drafts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = websites)]
pub(crate) struct NewWebsiteRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub slug: &'a str,
    pub org_name: &'a str,
    pub content: serde_json::Value,
    pub is_published: bool,
}

/// Changeset for partial website updates; `None` leaves a column untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = websites)]
pub(crate) struct WebsiteChangeset<'a> {
    pub slug: Option<&'a str>,
    pub org_name: Option<&'a str>,
    pub content: Option<serde_json::Value>,
    pub is_published: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

/// Insert-or-update row for the user_profiles table.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = user_profiles)]
#[diesel(primary_key(user_id))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserProfileRow<'a> {
    pub user_id: Uuid,
    pub email: Option<&'a str>,
    pub display_name: Option<&'a str>,
    pub last_sign_in_at: DateTime<Utc>,
}
