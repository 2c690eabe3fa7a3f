//! Owner-scoped website handlers.
//!
//! Every route requires a signed-in owner; the owner comes from the session,
//! never from the request body.
//!
//! ```text
//! GET    /api/v1/websites
//! POST   /api/v1/websites {"content":{...}}
//! GET    /api/v1/websites/{id}
//! PUT    /api/v1/websites/{id} {"content":{...}}
//! POST   /api/v1/websites/{id}/publish {"content":{...}}
//! POST   /api/v1/websites/{id}/unpublish
//! DELETE /api/v1/websites/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{PublishWebsiteRequest, SaveWebsiteRequest, WebsiteHandle};
use crate::domain::{UserId, WebsiteContent, WebsiteId, WebsiteRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body for creating or saving a website.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWebsiteBody {
    /// Builder content; `content.slug` is the candidate slug.
    pub content: WebsiteContent,
}

/// Body for publishing. Without content the stored content is published.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishWebsiteBody {
    /// Content to save while publishing.
    #[serde(default)]
    pub content: Option<WebsiteContent>,
}

fn handle_for(owner_id: UserId, path: web::Path<Uuid>) -> WebsiteHandle {
    WebsiteHandle::new(owner_id, WebsiteId::from_uuid(path.into_inner()))
}

/// List the owner's websites, most recently updated first.
#[get("/websites")]
pub async fn list_websites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<WebsiteRecord>>> {
    let owner_id = session.require_owner()?;
    let websites = state.websites_query.list(&owner_id).await?;
    Ok(web::Json(websites))
}

/// Create a draft website.
#[post("/websites")]
pub async fn create_website(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SaveWebsiteBody>,
) -> ApiResult<HttpResponse> {
    let owner_id = session.require_owner()?;
    let record = state
        .websites
        .save(SaveWebsiteRequest {
            owner_id,
            website_id: None,
            content: payload.into_inner().content,
        })
        .await?;
    Ok(HttpResponse::Created().json(record))
}

/// Load one of the owner's websites.
#[get("/websites/{id}")]
pub async fn get_website(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<WebsiteRecord>> {
    let handle = handle_for(session.require_owner()?, path);
    let record = state.websites_query.get(handle).await?;
    Ok(web::Json(record))
}

/// Save content; a published website stays published.
#[put("/websites/{id}")]
pub async fn save_website(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<SaveWebsiteBody>,
) -> ApiResult<web::Json<WebsiteRecord>> {
    let handle = handle_for(session.require_owner()?, path);
    let record = state
        .websites
        .save(SaveWebsiteRequest {
            owner_id: handle.owner_id,
            website_id: Some(handle.website_id),
            content: payload.into_inner().content,
        })
        .await?;
    Ok(web::Json(record))
}

/// Validate, save and make the website public.
#[post("/websites/{id}/publish")]
pub async fn publish_website(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: Option<web::Json<PublishWebsiteBody>>,
) -> ApiResult<web::Json<WebsiteRecord>> {
    let handle = handle_for(session.require_owner()?, path);
    let content = payload.and_then(|body| body.into_inner().content);
    let record = state
        .websites
        .publish(PublishWebsiteRequest { handle, content })
        .await?;
    Ok(web::Json(record))
}

/// Hide the website from public view.
#[post("/websites/{id}/unpublish")]
pub async fn unpublish_website(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<WebsiteRecord>> {
    let handle = handle_for(session.require_owner()?, path);
    let record = state.websites.unpublish(handle).await?;
    Ok(web::Json(record))
}

/// Permanently delete the website.
#[delete("/websites/{id}")]
pub async fn delete_website(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let handle = handle_for(session.require_owner()?, path);
    state.websites.delete(handle).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "websites_tests.rs"]
mod tests;
