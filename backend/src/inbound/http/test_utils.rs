//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::ports::{
    MockAccountCommand, MockPublicSiteQuery, MockSlugAvailability, MockWebsiteCommand,
    MockWebsiteQuery,
};
use crate::inbound::http::state::HttpStatePorts;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports backed by expectation-free mocks; any call fails the test.
///
/// Override the fields a test exercises with struct update syntax.
pub fn unused_ports() -> HttpStatePorts {
    HttpStatePorts {
        public_sites: Arc::new(MockPublicSiteQuery::new()),
        slugs: Arc::new(MockSlugAvailability::new()),
        websites: Arc::new(MockWebsiteCommand::new()),
        websites_query: Arc::new(MockWebsiteQuery::new()),
        accounts: Arc::new(MockAccountCommand::new()),
    }
}
