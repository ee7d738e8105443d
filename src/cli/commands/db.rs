use clap::Subcommand;
use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::database::{DatabaseManager, StoreHealth};

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create any missing tables and indexes")]
    Init,

    #[command(about = "Check that the configured database is reachable")]
    Check,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let database = DatabaseManager::connect(&config.database).await?;
    let target = json!({
        "host": config.database.host,
        "port": config.database.port,
        "database": config.database.name,
    });

    let result = match cmd {
        DbCommands::Init => database.bootstrap_schema().await.map(|_| "Schema applied"),
        DbCommands::Check => database.ping().await.map(|_| "Database reachable"),
    };
    database.close().await;

    output_success(output_format, result?, Some(target))
}
