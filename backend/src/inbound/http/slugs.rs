//! Slug availability checks for the builder's basic-info step.
//!
//! ```text
//! GET /api/v1/slugs/hope-center
//! {"slug":"hope-center","available":true}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

use crate::domain::{SLUG_TAKEN_REASON, Slug};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Availability verdict for a candidate slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugCheckResponse {
    /// Candidate exactly as requested.
    pub slug: String,
    /// Whether a new website could claim the slug right now.
    pub available: bool,
    /// Stable reason code when unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Validate `candidate` and ask the oracle whether it is free.
///
/// The answer is advisory; the store constraint still arbitrates on save.
#[get("/slugs/{candidate}")]
pub async fn check_slug(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SlugCheckResponse>> {
    let candidate = path.into_inner();
    let reason = match Slug::new(candidate.as_str()) {
        Err(invalid) => Some(invalid.code().to_owned()),
        Ok(slug) if !state.slugs.is_unique(&slug, None).await => {
            Some(SLUG_TAKEN_REASON.to_owned())
        }
        Ok(_) => None,
    };
    Ok(web::Json(SlugCheckResponse {
        slug: candidate,
        available: reason.is_none(),
        reason,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    use crate::domain::ports::MockSlugAvailability;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::unused_ports;

    async fn ask(oracle: MockSlugAvailability, candidate: &str) -> SlugCheckResponse {
        let state = HttpState::new(HttpStatePorts {
            slugs: Arc::new(oracle),
            ..unused_ports()
        });
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api/v1").service(check_slug)),
        )
        .await;
        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/slugs/{candidate}"))
            .to_request();
        actix_test::call_and_read_body_json(&app, request).await
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some("slug_taken"))]
    #[actix_web::test]
    async fn valid_slug_defers_to_oracle(#[case] unique: bool, #[case] reason: Option<&str>) {
        let mut oracle = MockSlugAvailability::new();
        oracle
            .expect_is_unique()
            .withf(|slug, exclude| slug.as_str() == "hope-center" && exclude.is_none())
            .times(1)
            .return_const(unique);

        let response = ask(oracle, "hope-center").await;

        assert_eq!(response.available, unique);
        assert_eq!(response.reason.as_deref(), reason);
    }

    #[rstest]
    #[case("ab", "too_short")]
    #[case("admin", "reserved")]
    #[case("a--b", "consecutive_hyphens")]
    #[case("-abc", "leading_or_trailing_hyphen")]
    #[actix_web::test]
    async fn invalid_slug_skips_oracle(#[case] candidate: &str, #[case] reason: &str) {
        let mut oracle = MockSlugAvailability::new();
        oracle.expect_is_unique().times(0);

        let response = ask(oracle, candidate).await;

        assert_eq!(response.slug, candidate);
        assert!(!response.available);
        assert_eq!(response.reason.as_deref(), Some(reason));
    }
}
