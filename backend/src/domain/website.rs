//! Website records and their fixed content schema.
//!
//! Content is stored as one JSON document; the core treats it as a single
//! attribute and only inspects `org_name` and `slug`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Slug, UserId, WebsiteState};

/// Repository-assigned website identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebsiteId(Uuid);

impl WebsiteId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for WebsiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Theme accent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[expect(missing_docs, reason = "variant names match their serialised values")]
pub enum AccentColor {
    #[default]
    Blue,
    Green,
    Purple,
    Red,
    Orange,
}

/// Theme font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[expect(missing_docs, reason = "variant names match their serialised values")]
pub enum FontFamily {
    #[default]
    Inter,
    Serif,
    Mono,
}

/// One entry of the "what we do" section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[expect(missing_docs, reason = "fields mirror the builder form one to one")]
pub struct WhatWeDoItem {
    pub title: String,
    pub description: String,
}

/// A member of the leadership team.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[expect(missing_docs, reason = "fields mirror the builder form one to one")]
pub struct LeadershipMember {
    pub photo_url: String,
    pub name: String,
    pub title: String,
    pub bio: String,
}

/// A programme run by the organisation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[expect(missing_docs, reason = "fields mirror the builder form one to one")]
pub struct Program {
    pub title: String,
    pub description: String,
    pub impact: String,
}

/// Everything the builder collects for a website.
///
/// Missing fields deserialise to their defaults so older documents stay
/// readable. Images are referenced by URL only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[expect(missing_docs, reason = "fields mirror the builder form one to one")]
pub struct WebsiteContent {
    pub org_name: String,
    /// Slug seed as last entered in the builder.
    pub slug: String,
    pub logo_url: String,
    pub tagline: String,
    pub accent_color: AccentColor,
    pub font_family: FontFamily,
    pub hero_image_url: String,
    pub mission_statement: String,
    pub what_we_do: Vec<WhatWeDoItem>,
    pub cta_text: String,
    pub about_mission: String,
    pub leadership: Vec<LeadershipMember>,
    pub partners: String,
    pub sponsors_image_url: String,
    pub programs: Vec<Program>,
    pub volunteer_text: String,
    pub google_form_embed: String,
    pub donate_text: String,
    pub payment_info: String,
    pub venmo_link: String,
    pub paypal_link: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub office_hours: String,
    pub facebook: String,
    pub twitter: String,
    pub instagram: String,
    pub linkedin: String,
}

impl Default for WebsiteContent {
    fn default() -> Self {
        Self {
            org_name: String::new(),
            slug: String::new(),
            logo_url: String::new(),
            tagline: String::new(),
            accent_color: AccentColor::default(),
            font_family: FontFamily::default(),
            hero_image_url: String::new(),
            mission_statement: String::new(),
            what_we_do: vec![WhatWeDoItem::default(); 3],
            cta_text: String::new(),
            about_mission: String::new(),
            leadership: vec![LeadershipMember::default(); 2],
            partners: String::new(),
            sponsors_image_url: String::new(),
            programs: vec![Program::default(); 2],
            volunteer_text: String::new(),
            google_form_embed: String::new(),
            donate_text: String::new(),
            payment_info: String::new(),
            venmo_link: String::new(),
            paypal_link: String::new(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            office_hours: String::new(),
            facebook: String::new(),
            twitter: String::new(),
            instagram: String::new(),
            linkedin: String::new(),
        }
    }
}

impl WebsiteContent {
    /// Fresh content for a new project, with the slug seeded by derivation.
    pub fn for_project(project_name: &str) -> Self {
        Self {
            org_name: project_name.to_owned(),
            slug: crate::domain::derive_slug(project_name),
            ..Self::default()
        }
    }

    /// `true` when the fields required for publishing are filled in.
    pub fn has_publish_essentials(&self) -> bool {
        !self.org_name.trim().is_empty() && !self.slug.trim().is_empty()
    }
}

/// A persisted website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteRecord {
    /// Assigned on creation; immutable.
    pub id: WebsiteId,
    /// Owning account; immutable.
    pub owner_id: UserId,
    /// Public routing key.
    pub slug: Slug,
    /// Builder content.
    pub content: WebsiteContent,
    /// Whether the site is publicly visible.
    pub is_published: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl WebsiteRecord {
    /// Lifecycle state implied by the visibility flag.
    pub fn state(&self) -> WebsiteState {
        if self.is_published {
            WebsiteState::Published
        } else {
            WebsiteState::Draft
        }
    }
}

/// Values for a website about to be created. New records start as drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWebsite {
    /// Validated slug.
    pub slug: Slug,
    /// Builder content.
    pub content: WebsiteContent,
}

/// Partial update applied to an existing website.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebsitePatch {
    /// Replacement slug.
    pub slug: Option<Slug>,
    /// Replacement content.
    pub content: Option<WebsiteContent>,
    /// New visibility flag.
    pub is_published: Option<bool>,
}

impl WebsitePatch {
    /// Patch that only changes visibility.
    pub fn visibility(is_published: bool) -> Self {
        Self {
            is_published: Some(is_published),
            ..Self::default()
        }
    }
}
