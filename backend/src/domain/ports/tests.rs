use super::*;
use crate::domain::{Slug, UserId, WebsiteContent, WebsiteId, WebsiteRecord};
use chrono::Utc;
use rstest::{fixture, rstest};

#[fixture]
fn published_record() -> WebsiteRecord {
    let now = Utc::now();
    WebsiteRecord {
        id: WebsiteId::random(),
        owner_id: UserId::random(),
        slug: Slug::new("hope-center").expect("valid slug"),
        content: WebsiteContent::for_project("Hope Center"),
        is_published: true,
        created_at: now,
        updated_at: now,
    }
}

#[rstest]
fn published_site_keeps_public_fields(published_record: WebsiteRecord) {
    let updated_at = published_record.updated_at;
    let site = PublishedSite::from(published_record);
    assert_eq!(site.slug.as_str(), "hope-center");
    assert_eq!(site.content.org_name, "Hope Center");
    assert_eq!(site.updated_at, updated_at);
}

#[rstest]
fn published_site_serialises_camel_case(published_record: WebsiteRecord) {
    let value = serde_json::to_value(PublishedSite::from(published_record)).expect("json");
    assert_eq!(value["slug"], "hope-center");
    assert!(value.get("updatedAt").is_some());
    assert!(value.get("ownerId").is_none());
}

#[rstest]
#[case(IdentityProviderError::invalid_credentials(), "invalid email or password")]
#[case(
    IdentityProviderError::account_exists("ada@example.org"),
    "an account already exists for ada@example.org"
)]
#[case(
    IdentityProviderError::connection("dns"),
    "identity provider unavailable: dns"
)]
fn identity_errors_render_messages(#[case] err: IdentityProviderError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[rstest]
fn profile_errors_render_messages() {
    let err = UserProfileRepositoryError::query("constraint");
    assert_eq!(
        err.to_string(),
        "user profile repository query failed: constraint"
    );
}

#[rstest]
fn handle_pairs_owner_and_website() {
    let owner = UserId::random();
    let website = WebsiteId::random();
    let handle = WebsiteHandle::new(owner.clone(), website);
    assert_eq!(handle.owner_id, owner);
    assert_eq!(handle.website_id, website);
}
