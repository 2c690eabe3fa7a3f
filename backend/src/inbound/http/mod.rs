//! HTTP inbound adapter: public site resolution, slug checks, owner
//! accounts and owner-scoped website management.

pub mod accounts;
pub mod error;
pub mod health;
pub mod public_sites;
pub mod session;
pub mod slugs;
pub mod state;
pub mod websites;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ApiResult;
