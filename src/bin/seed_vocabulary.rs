//! seed-vocabulary - 写入词汇学习演示数据

use std::sync::Arc;

use helios::application::{SeedVocabulary, SeedVocabularyHandler};
use helios::config::{load_config, print_config};
use helios::infrastructure::persistence::sqlite::{open_database, SqliteVocabularyRepository};
use helios::infrastructure::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);
    tracing::info!("Helios - vocabulary seeding");
    print_config(&config);

    let pool = open_database(&config.database.path, config.database.max_connections).await?;

    let vocabulary_repo = Arc::new(SqliteVocabularyRepository::new(pool.clone()));
    let command = SeedVocabulary::default();
    let email = command.email.clone();

    let response = SeedVocabularyHandler::new(vocabulary_repo)
        .handle(command)
        .await?;

    tracing::info!("Vocabulary entries: {}", response.vocabulary_entries);
    tracing::info!("Flashcards: {}", response.flashcards);
    tracing::info!("Demo user: {} ({})", email, response.user_id);

    pool.close().await;

    Ok(())
}
