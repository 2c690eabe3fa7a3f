//! Tests for the owner-scoped website handlers.

use super::*;
use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use chrono::Utc;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::{MockWebsiteCommand, MockWebsiteQuery};
use crate::domain::{
    AccountService, Error, PublicSiteService, RepositorySlugOracle, Slug, WebsiteService,
    slug_taken_error,
};
use crate::inbound::http::accounts::{login, register};
use crate::inbound::http::public_sites::get_site;
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{test_session_middleware, unused_ports};
use crate::outbound::memory::{
    InMemoryIdentityProvider, InMemoryUserProfileRepository, InMemoryWebsiteRepository,
};

const OWNER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
const WEBSITE: &str = "9b2f3c0e-8d1a-4f6b-a3c5-0e7d2b4f6a81";

fn owner() -> UserId {
    UserId::new(OWNER).expect("fixture owner")
}

fn website_id() -> WebsiteId {
    WebsiteId::from_uuid(Uuid::parse_str(WEBSITE).expect("fixture website id"))
}

fn record(is_published: bool) -> WebsiteRecord {
    let now = Utc::now();
    WebsiteRecord {
        id: website_id(),
        owner_id: owner(),
        slug: Slug::new("hope-center").expect("valid slug"),
        content: WebsiteContent::for_project("Hope Center"),
        is_published,
        created_at: now,
        updated_at: now,
    }
}

fn app_with(
    ports: HttpStatePorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(HttpState::new(ports))).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .route(
                "/test/sign-in",
                web::post().to(|session: SessionContext| async move {
                    session.persist_owner(&owner())?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .service(register)
            .service(login)
            .service(get_site)
            .service(list_websites)
            .service(create_website)
            .service(get_website)
            .service(save_website)
            .service(publish_website)
            .service(unpublish_website)
            .service(delete_website),
    )
}

fn mocked(command: MockWebsiteCommand, query: MockWebsiteQuery) -> HttpStatePorts {
    HttpStatePorts {
        websites: Arc::new(command),
        websites_query: Arc::new(query),
        ..unused_ports()
    }
}

fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

async fn signed_in(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/test/sign-in")
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

#[rstest]
#[case(actix_test::TestRequest::get().uri("/api/v1/websites"))]
#[case(actix_test::TestRequest::post().uri("/api/v1/websites").set_json(json!({ "content": {} })))]
#[case(actix_test::TestRequest::get().uri(&format!("/api/v1/websites/{WEBSITE}")))]
#[case(actix_test::TestRequest::post().uri(&format!("/api/v1/websites/{WEBSITE}/publish")))]
#[case(actix_test::TestRequest::post().uri(&format!("/api/v1/websites/{WEBSITE}/unpublish")))]
#[case(actix_test::TestRequest::delete().uri(&format!("/api/v1/websites/{WEBSITE}")))]
#[actix_web::test]
async fn owner_routes_require_a_session(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(app_with(unused_ports())).await;

    let response = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("unauthorized"));
}

#[rstest]
#[actix_web::test]
async fn list_is_scoped_to_the_session_owner() {
    let mut query = MockWebsiteQuery::new();
    query
        .expect_list()
        .withf(|owner_id| *owner_id == owner())
        .times(1)
        .return_once(|_| Ok(vec![record(false)]));
    let app = actix_test::init_service(app_with(mocked(MockWebsiteCommand::new(), query))).await;
    let cookie = signed_in(&app).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/websites")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.pointer("/0/id").and_then(Value::as_str), Some(WEBSITE));
    assert_eq!(body.pointer("/0/isPublished"), Some(&Value::Bool(false)));
}

#[rstest]
#[actix_web::test]
async fn create_saves_a_new_draft_for_the_session_owner() {
    let mut command = MockWebsiteCommand::new();
    command
        .expect_save()
        .withf(|request| {
            request.owner_id == owner()
                && request.website_id.is_none()
                && request.content.slug == "hope-center"
        })
        .times(1)
        .return_once(|_| Ok(record(false)));
    let app = actix_test::init_service(app_with(mocked(command, MockWebsiteQuery::new()))).await;
    let cookie = signed_in(&app).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/websites")
        .cookie(cookie)
        .set_json(json!({ "content": { "orgName": "Hope Center", "slug": "hope-center" } }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[rstest]
#[actix_web::test]
async fn save_targets_the_path_website() {
    let mut command = MockWebsiteCommand::new();
    command
        .expect_save()
        .withf(|request| request.website_id == Some(website_id()))
        .times(1)
        .return_once(|_| Ok(record(true)));
    let app = actix_test::init_service(app_with(mocked(command, MockWebsiteQuery::new()))).await;
    let cookie = signed_in(&app).await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/websites/{WEBSITE}"))
        .cookie(cookie)
        .set_json(json!({ "content": { "orgName": "Hope Center", "slug": "hope-center" } }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("isPublished"), Some(&Value::Bool(true)));
}

#[rstest]
#[case(None, false)]
#[case(Some(json!({ "content": { "orgName": "Hope Center", "slug": "hope-center" } })), true)]
#[actix_web::test]
async fn publish_forwards_optional_content(
    #[case] body: Option<Value>,
    #[case] expects_content: bool,
) {
    let mut command = MockWebsiteCommand::new();
    command
        .expect_publish()
        .withf(move |request| {
            request.handle == WebsiteHandle::new(owner(), website_id())
                && request.content.is_some() == expects_content
        })
        .times(1)
        .return_once(|_| Ok(record(true)));
    let app = actix_test::init_service(app_with(mocked(command, MockWebsiteQuery::new()))).await;
    let cookie = signed_in(&app).await;

    let mut request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/websites/{WEBSITE}/publish"))
        .cookie(cookie);
    if let Some(body) = body {
        request = request.set_json(body);
    }
    let response = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn publish_conflict_surfaces_slug_reason() {
    let mut command = MockWebsiteCommand::new();
    command
        .expect_publish()
        .times(1)
        .return_once(|_| Err(slug_taken_error()));
    let app = actix_test::init_service(app_with(mocked(command, MockWebsiteQuery::new()))).await;
    let cookie = signed_in(&app).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/websites/{WEBSITE}/publish"))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/details/reason").and_then(Value::as_str),
        Some("slug_taken")
    );
}

#[rstest]
#[actix_web::test]
async fn unpublish_and_delete_use_the_owner_handle() {
    let mut command = MockWebsiteCommand::new();
    command
        .expect_unpublish()
        .withf(|handle| *handle == WebsiteHandle::new(owner(), website_id()))
        .times(1)
        .return_once(|_| Ok(record(false)));
    command
        .expect_delete()
        .withf(|handle| *handle == WebsiteHandle::new(owner(), website_id()))
        .times(1)
        .return_once(|_| Ok(()));
    let app = actix_test::init_service(app_with(mocked(command, MockWebsiteQuery::new()))).await;
    let cookie = signed_in(&app).await;

    let unpublish = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/websites/{WEBSITE}/unpublish"))
        .cookie(cookie.clone())
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, unpublish).await.status(),
        StatusCode::OK
    );

    let delete = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/websites/{WEBSITE}"))
        .cookie(cookie)
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, delete).await.status(),
        StatusCode::NO_CONTENT
    );
}

#[rstest]
#[actix_web::test]
async fn foreign_or_missing_website_is_not_found() {
    let mut query = MockWebsiteQuery::new();
    query
        .expect_get()
        .times(1)
        .return_once(|handle| {
            Err(Error::not_found(format!(
                "website {} not found",
                handle.website_id
            )))
        });
    let app = actix_test::init_service(app_with(mocked(MockWebsiteCommand::new(), query))).await;
    let cookie = signed_in(&app).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/websites/{WEBSITE}"))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn owner_flow_publishes_a_site_over_memory_adapters() {
    let repository = Arc::new(InMemoryWebsiteRepository::new());
    let oracle = Arc::new(RepositorySlugOracle::new(Arc::clone(&repository)));
    let websites = Arc::new(WebsiteService::new(Arc::clone(&repository), oracle));
    let ports = HttpStatePorts {
        public_sites: Arc::new(PublicSiteService::new(Arc::clone(&repository))),
        websites: websites.clone(),
        websites_query: websites,
        accounts: Arc::new(AccountService::new(
            Arc::new(InMemoryIdentityProvider::new()),
            Arc::new(InMemoryUserProfileRepository::new()),
        )),
        ..unused_ports()
    };
    let app = actix_test::init_service(app_with(ports)).await;

    let registered = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({ "email": "ada@example.org", "password": "hunter22" }))
            .to_request(),
    )
    .await;
    assert_eq!(registered.status(), StatusCode::CREATED);
    let cookie = session_cookie(&registered);

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/websites")
            .cookie(cookie.clone())
            .set_json(json!({ "content": { "orgName": "Hope Center", "slug": "hope-center" } }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(created).await;
    let id = created
        .get("id")
        .and_then(Value::as_str)
        .expect("created id")
        .to_owned();

    let hidden = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/sites/hope-center")
            .to_request(),
    )
    .await;
    assert_eq!(hidden.status(), StatusCode::NOT_FOUND);

    let published = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/websites/{id}/publish"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(published.status(), StatusCode::OK);

    let served = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/sites/hope-center")
            .to_request(),
    )
    .await;
    assert_eq!(served.status(), StatusCode::OK);
}
