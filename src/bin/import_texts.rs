//! import-texts - 读取抽取产物并 upsert 到数据库

use std::sync::Arc;

use helios::application::{ImportCorpus, ImportCorpusHandler};
use helios::config::{load_config, print_config};
use helios::infrastructure::adapters::JsonArtifactStorage;
use helios::infrastructure::persistence::sqlite::{open_database, SqliteCorpusRepository};
use helios::infrastructure::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);
    tracing::info!("Helios - corpus import");
    print_config(&config);

    let pool = open_database(&config.database.path, config.database.max_connections).await?;

    let artifacts = Arc::new(JsonArtifactStorage::new(&config.corpus.output_dir));
    let corpus_repo = Arc::new(SqliteCorpusRepository::new(pool.clone()));

    let handler = ImportCorpusHandler::new(artifacts, corpus_repo);
    let response = handler.handle(ImportCorpus).await?;

    tracing::info!("=== Import Summary ===");
    tracing::info!("Authors: {}", response.authors);
    tracing::info!("Works: {}", response.works);
    tracing::info!("Texts: {}", response.texts);
    tracing::info!("Skipped works: {}", response.skipped_works);

    pool.close().await;

    Ok(())
}
