//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::Key;
use site_builder::domain::DEFAULT_ORACLE_TIMEOUT;
use site_builder::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) store_timeout: Duration,
}

impl ServerConfig {
    /// Configuration with the in-memory store.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            db_pool: None,
            store_timeout: DEFAULT_ORACLE_TIMEOUT,
        }
    }

    /// Use PostgreSQL-backed adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Bound store calls made by slug checks.
    #[must_use]
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}
