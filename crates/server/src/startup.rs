use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::env::ensure_parent_dir;
use common::utils::logging::{init_logging_default, init_logging_json};
use configs::{AppConfig, LogFormat, StorageKind};
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::storage::{DbEngine, FileEngine, StorageEngine};
use service::Storage;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

pub fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Build the engine selected by `storage.kind`; the DB engine runs migrations first.
pub async fn open_engine(cfg: &AppConfig) -> Result<Arc<dyn StorageEngine>, StartupError> {
    match cfg.storage.kind {
        StorageKind::File => {
            ensure_parent_dir(&cfg.storage.file_path).await?;
            Ok(Arc::new(FileEngine::new(&cfg.storage.file_path)))
        }
        StorageKind::Db => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await.map_err(anyhow::Error::from)?;
            Ok(Arc::new(DbEngine::new(db)))
        }
    }
}

/// Router over an already opened storage facade.
pub fn build_app(storage: Arc<Storage>) -> Router {
    routes::build_router(AppState::new(storage), build_cors())
}

/// Read `.env`, `config.toml` and environment overrides.
pub fn load_config() -> Result<AppConfig, StartupError> {
    dotenv().ok();
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Open storage and serve until Ctrl+C.
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    let engine = open_engine(&cfg).await?;
    let storage = Storage::open(engine).await.map_err(StartupError::from)?;
    let app = build_app(storage.clone());

    let addr = bind_addr(&cfg)?;
    info!(%addr, engine = storage.engine_name(), "starting hbnb api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    storage.save().await.map_err(StartupError::from)?;
    Ok(())
}
