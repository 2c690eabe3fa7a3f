//! Account handlers establishing the owner session.
//!
//! ```text
//! POST /api/v1/auth/register {"email":"ada@example.org","password":"hunter22","displayName":"Ada"}
//! POST /api/v1/auth/login {"email":"ada@example.org","password":"hunter22"}
//! POST /api/v1/auth/logout
//! POST /api/v1/auth/password-reset {"email":"ada@example.org"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::UserIdentity;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Body for `POST /api/v1/auth/register`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email for the new account.
    pub email: String,
    /// Password, at least six characters.
    pub password: String,
    /// Optional name shown on the dashboard.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Body for `POST /api/v1/auth/password-reset`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    /// Address to send the reset link to.
    pub email: String,
}

/// Create an account and sign it in.
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        email,
        password,
        display_name,
    } = payload.into_inner();
    let identity = state
        .accounts
        .register(&email, &password, display_name)
        .await?;
    session.persist_owner(&identity.id)?;
    Ok(HttpResponse::Created().json(identity))
}

/// Authenticate and establish a session.
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserIdentity>> {
    let identity = state
        .accounts
        .sign_in(&payload.email, &payload.password)
        .await?;
    session.persist_owner(&identity.id)?;
    Ok(web::Json(identity))
}

/// End the session.
#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.clear();
    state.accounts.sign_out().await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Request a password reset email. Unknown addresses are accepted too.
#[post("/auth/password-reset")]
pub async fn request_password_reset(
    state: web::Data<HttpState>,
    payload: web::Json<PasswordResetRequest>,
) -> ApiResult<HttpResponse> {
    state.accounts.send_password_reset(&payload.email).await?;
    Ok(HttpResponse::Accepted().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::MockAccountCommand;
    use crate::domain::{Error, UserId};
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{test_session_middleware, unused_ports};

    const OWNER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn identity() -> UserIdentity {
        UserIdentity {
            id: UserId::new(OWNER).expect("fixture id"),
            email: Some("ada@example.org".to_owned()),
            display_name: Some("Ada".to_owned()),
            email_verified: false,
        }
    }

    fn app_with(
        accounts: MockAccountCommand,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = HttpState::new(HttpStatePorts {
            accounts: Arc::new(accounts),
            ..unused_ports()
        });
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .service(register)
                .service(login)
                .service(logout)
                .service(request_password_reset),
        )
    }

    fn has_session_cookie(response: &actix_web::dev::ServiceResponse) -> bool {
        response
            .response()
            .cookies()
            .any(|cookie| cookie.name() == "session" && !cookie.value().is_empty())
    }

    #[rstest]
    #[actix_web::test]
    async fn login_sets_session_and_returns_identity() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_sign_in()
            .withf(|email, password| email == "ada@example.org" && password == "hunter22")
            .times(1)
            .return_once(|_, _| Ok(identity()));
        let app = actix_test::init_service(app_with(accounts)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(LoginRequest {
                email: "ada@example.org".to_owned(),
                password: "hunter22".to_owned(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(has_session_cookie(&response));
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("id").and_then(Value::as_str), Some(OWNER));
        assert_eq!(body.get("displayName").and_then(Value::as_str), Some("Ada"));
    }

    #[rstest]
    #[actix_web::test]
    async fn rejected_login_sets_no_session() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_sign_in()
            .times(1)
            .return_once(|_, _| Err(Error::unauthorized("invalid email or password")));
        let app = actix_test::init_service(app_with(accounts)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(LoginRequest {
                email: "ada@example.org".to_owned(),
                password: "wrong".to_owned(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!has_session_cookie(&response));
    }

    #[rstest]
    #[actix_web::test]
    async fn register_passes_display_name_and_answers_created() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_register()
            .withf(|email, _, name| email == "ada@example.org" && name.as_deref() == Some("Ada"))
            .times(1)
            .return_once(|_, _, _| Ok(identity()));
        let app = actix_test::init_service(app_with(accounts)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(serde_json::json!({
                "email": "ada@example.org",
                "password": "hunter22",
                "displayName": "Ada",
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(has_session_cookie(&response));
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_registration_is_a_conflict() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_register()
            .times(1)
            .return_once(|_, _, _| Err(Error::conflict("an account already exists")));
        let app = actix_test::init_service(app_with(accounts)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(serde_json::json!({ "email": "ada@example.org", "password": "hunter22" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_signs_out_and_answers_no_content() {
        let mut accounts = MockAccountCommand::new();
        accounts.expect_sign_out().times(1).return_once(|| Ok(()));
        let app = actix_test::init_service(app_with(accounts)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[actix_web::test]
    async fn password_reset_is_accepted() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_send_password_reset()
            .withf(|email| email == "nobody@example.org")
            .times(1)
            .return_once(|_| Ok(()));
        let app = actix_test::init_service(app_with(accounts)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/password-reset")
            .set_json(PasswordResetRequest {
                email: "nobody@example.org".to_owned(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
}
