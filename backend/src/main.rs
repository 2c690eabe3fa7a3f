//! Server entry-point: loads settings, wires the website store and serves
//! public sites, owner website management and health checks.

mod server;

use actix_web::cookie::Key;
use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use site_builder::inbound::http::health::HealthState;
use site_builder::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use site_builder::settings::{AppSettings, load_session_key};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let key = match settings.session_key_file.as_deref() {
        Some(path) => load_session_key(path).wrap_err("failed to load session key")?,
        None => {
            warn!("no session key file configured; sessions end on restart");
            Key::generate()
        }
    };
    let mut config = ServerConfig::new(key, settings.cookie_secure(), settings.bind_addr())
        .with_store_timeout(settings.store_timeout());

    match settings.database_url() {
        Some(database_url) => {
            run_pending_migrations(database_url.to_owned())
                .await
                .wrap_err("failed to migrate database")?;
            let pool = DbPool::new(
                PoolConfig::new(database_url)
                    .with_max_size(settings.pool_max_size())
                    .with_connection_timeout(settings.store_timeout()),
            )
            .await
            .wrap_err("failed to build database pool")?;
            info!("using PostgreSQL website store");
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; websites are kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start server")?;
    info!(bind_addr = %settings.bind_addr(), "site builder listening");
    server.await.wrap_err("server terminated abnormally")
}
