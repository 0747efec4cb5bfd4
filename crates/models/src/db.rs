use std::env;
use std::time::Duration;

use configs::DatabaseConfig;
use once_cell::sync::Lazy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

pub static DATABASE_URL: Lazy<Option<String>> = Lazy::new(|| {
    // Load .env if present
    let _ = dotenvy::dotenv();
    env::var("DATABASE_URL").ok()
});

/// Pool settings for `url` with every other knob at its default.
fn config_for(url: Option<&str>) -> anyhow::Result<DatabaseConfig> {
    let cfg = DatabaseConfig { url: url.unwrap_or_default().to_string(), ..DatabaseConfig::default() };
    cfg.validate()?;
    Ok(cfg)
}

/// Connect using `DATABASE_URL`; fails when it is unset.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let cfg = config_for(DATABASE_URL.as_deref())?;
    connect_with_config(&cfg).await
}

/// Connect with pool settings taken from the `[database]` config section.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opt).await?;
    info!(max_connections = cfg.max_connections, "database pool ready");
    Ok(db)
}
