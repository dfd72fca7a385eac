//! Catalog service entry-point: loads settings, wires the catalog read path
//! and serves the REST API.

mod server;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use catalog_backend::domain::CatalogService;
use catalog_backend::inbound::http::health::HealthState;
use catalog_backend::outbound::persistence::{DbPool, DieselSqlReader, SqlProductCatalogRepository};
use catalog_backend::settings::CatalogSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CatalogSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let pool_config = settings
        .pool_config()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let bind_addr: SocketAddr = settings.bind_address().parse().map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid bind address {}: {err}", settings.bind_address()),
        )
    })?;

    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| io::Error::other(err.to_string()))?;
    let reader = Arc::new(DieselSqlReader::new(pool));
    let repository = SqlProductCatalogRepository::new(reader, settings.read_config());
    let catalog = Arc::new(CatalogService::new(Arc::new(repository)));

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, catalog);
    let listen_addr = config.bind_addr();
    let server = create_server(health_state.clone(), config)?;
    info!(%listen_addr, "catalog service listening");
    let outcome = server.await;
    health_state.mark_draining();
    info!("catalog service stopped");
    outcome
}
