//! Migrate command - applies pending schema migrations and exits

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::{init_logging, LoggingConfig};
use crate::infrastructure::store::{PostgresConfig, PostgresCredentialStore, PostgresMigrator};

/// Apply all pending migrations against the configured database
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();

    init_logging(&LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });

    let pg_config = PostgresConfig::new(config.database_url())
        .with_max_connections(config.database.max_connections);
    let store = PostgresCredentialStore::connect(&pg_config).await?;

    let migrator = PostgresMigrator::new(store.pool().clone());
    migrator.run().await?;

    let version = migrator.current_version().await?;
    info!(?version, "Migrations applied");

    Ok(())
}
