//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SITE_BUILDER_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::time::Duration;

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));
const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Fewest bytes of key material accepted for deriving the session key.
pub const SESSION_KEY_MIN_BYTES: usize = 32;

/// Failures loading the session key file.
#[derive(Debug, Error)]
pub enum SessionKeyError {
    /// The file could not be read.
    #[error("failed to read session key at {}: {source}", .path.display())]
    Read {
        /// Configured key path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file holds too little key material.
    #[error(
        "session key at {} has {len} bytes; at least {} are required",
        .path.display(),
        SESSION_KEY_MIN_BYTES
    )]
    TooShort {
        /// Configured key path.
        path: PathBuf,
        /// Bytes found.
        len: usize,
    },
}

/// Derive the cookie signing and encryption key from the file at `path`.
///
/// # Errors
/// Returns [`SessionKeyError`] when the file is unreadable or shorter than
/// [`SESSION_KEY_MIN_BYTES`].
pub fn load_session_key(path: &Path) -> Result<Key, SessionKeyError> {
    let bytes = std::fs::read(path).map_err(|source| SessionKeyError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.len() < SESSION_KEY_MIN_BYTES {
        return Err(SessionKeyError::TooShort {
            path: path.to_path_buf(),
            len: bytes.len(),
        });
    }
    Ok(Key::derive_from(&bytes))
}

/// Configuration for the `site-builder` server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SITE_BUILDER")]
pub struct AppSettings {
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Listen address.
    pub bind_addr: Option<SocketAddr>,
    /// Upper bound on store calls made by the slug oracle, in milliseconds.
    pub store_timeout_ms: Option<u64>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// File holding session key material; an ephemeral key is used when
    /// absent, so sessions end on restart.
    pub session_key_file: Option<PathBuf>,
    /// Whether session cookies carry the `Secure` flag.
    pub cookie_secure: Option<bool>,
}

impl AppSettings {
    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Store timeout, defaulting to five seconds.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms.unwrap_or(DEFAULT_STORE_TIMEOUT_MS))
    }

    /// Pool size, defaulting to ten connections.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Session cookie `Secure` flag, on unless disabled.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }
}
