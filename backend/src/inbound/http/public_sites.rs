//! Public website resolution.
//!
//! ```text
//! GET /api/v1/sites/hope-center
//! ```

use actix_web::{get, web};

use crate::domain::ports::PublishedSite;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Serve the published website at `slug`.
///
/// Unknown, unpublished, reserved and malformed slugs all answer 404.
#[get("/sites/{slug}")]
pub async fn get_site(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PublishedSite>> {
    let site = state.public_sites.resolve(path.as_str()).await?;
    Ok(web::Json(site))
}
