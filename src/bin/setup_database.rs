//! setup-database - 创建数据库文件并执行建表迁移

use helios::config::{load_config, print_config};
use helios::infrastructure::persistence::sqlite::open_database;
use helios::infrastructure::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);
    tracing::info!("Helios - database setup");
    print_config(&config);

    let pool = open_database(&config.database.path, config.database.max_connections).await?;
    pool.close().await;

    tracing::info!(database = %config.database.path, "Database is ready");

    Ok(())
}
