//! Uniqueness oracle for website slugs.

use async_trait::async_trait;

use crate::domain::{Slug, WebsiteId};

/// Answers whether a slug is free for a given record.
///
/// Implementations must fail closed: when the answer cannot be determined
/// they report `false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlugAvailability: Send + Sync {
    /// `true` when no record other than `exclude` holds `slug`.
    async fn is_unique(&self, slug: &Slug, exclude: Option<WebsiteId>) -> bool;
}

/// Oracle that treats every slug as free. Handy when the store constraint
/// alone should arbitrate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSlugAvailability;

#[async_trait]
impl SlugAvailability for FixtureSlugAvailability {
    async fn is_unique(&self, _slug: &Slug, _exclude: Option<WebsiteId>) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_reports_every_slug_free() {
        let slug = Slug::new("hope-center").expect("valid slug");
        assert!(FixtureSlugAvailability.is_unique(&slug, None).await);
        assert!(
            FixtureSlugAvailability
                .is_unique(&slug, Some(WebsiteId::random()))
                .await
        );
    }
}
