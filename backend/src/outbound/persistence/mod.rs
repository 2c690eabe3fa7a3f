//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the website and profile ports backed by
//! PostgreSQL through `diesel-async` and `bb8` pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: Diesel and pool failures map onto port error enums;
//!   the slug `UNIQUE` constraint maps onto `SlugTaken`.
//!
//! ```ignore
//! use site_builder::outbound::persistence::{DbPool, DieselWebsiteRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/sites")).await?;
//! let websites = DieselWebsiteRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_user_profile_repository;
mod diesel_website_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_profile_repository::DieselUserProfileRepository;
pub use diesel_website_repository::DieselWebsiteRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
