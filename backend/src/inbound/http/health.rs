//! Health endpoints: liveness and readiness checks for orchestrators.
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Shared readiness and liveness flags.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Start live but not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready once the store is wired.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness checks while draining.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn status_response(healthy: bool) -> HttpResponse {
        let mut response = if healthy {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness check: 200 once the website store is wired, 503 before.
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::status_response(state.is_ready())
}

/// Liveness check: 200 while alive, 503 once draining.
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::status_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    #[rstest]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(true, StatusCode::OK)]
    #[actix_web::test]
    async fn readiness_follows_flag(#[case] ready_flag: bool, #[case] expected: StatusCode) {
        let health = web::Data::new(HealthState::new());
        if ready_flag {
            health.mark_ready();
        }
        let app = actix_test::init_service(App::new().app_data(health).service(ready)).await;

        let request = actix_test::TestRequest::get().uri("/health/ready").to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), expected);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("no-store")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_fails_once_draining() {
        let health = web::Data::new(HealthState::new());
        let app =
            actix_test::init_service(App::new().app_data(health.clone()).service(live)).await;

        let request = actix_test::TestRequest::get().uri("/health/live").to_request();
        assert_eq!(
            actix_test::call_service(&app, request).await.status(),
            StatusCode::OK
        );

        health.mark_unhealthy();
        let request = actix_test::TestRequest::get().uri("/health/live").to_request();
        assert_eq!(
            actix_test::call_service(&app, request).await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
