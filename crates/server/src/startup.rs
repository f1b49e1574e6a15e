use std::net::SocketAddr;

use axum::Router;
use dotenvy::dotenv;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::{
    auth::{repo::seaorm::SeaOrmCredentialStore, AuthConfig},
    computer::repo::seaorm::SeaOrmResourceStore,
    DbRepositories, Services,
};

use crate::errors::StartupError;
use crate::routes;

pub type AppServices = Services<SeaOrmCredentialStore, SeaOrmResourceStore>;

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub services: AppServices,
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file when present, otherwise environment variables only.
pub fn load_config() -> Result<configs::AppConfig, StartupError> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let loaded = if std::path::Path::new(&path).exists() {
        configs::AppConfig::load_and_validate()
    } else {
        warn!(%path, "config file not found, using environment");
        configs::AppConfig::from_env()
    };
    loaded.map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Assemble stores, services and routes over an already migrated connection.
pub fn build_app(db: DatabaseConnection, auth: AuthConfig) -> Router {
    let repos = DbRepositories::new(db);
    let state = ServerState { services: Services::new(&repos, auth) };
    routes::build_router(state, build_cors())
}

fn bind_addr(cfg: &configs::ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl_c");
        return;
    }
    info!("shutdown signal received");
}

/// Public entry: connect, migrate, serve until Ctrl+C, then close the pool.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = load_config()?;

    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_and_migrate(&db_cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::ping(&db)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    let app = build_app(db.clone(), AuthConfig::from(&cfg.auth));

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    models::db::close(db).await?;
    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let cfg = configs::ServerConfig { host: "not a host".into(), port: 80, worker_threads: None };
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn bind_addr_parses_default() {
        let addr = bind_addr(&configs::ServerConfig::default()).unwrap();
        assert_eq!(addr.port(), 8080);
    }
}
