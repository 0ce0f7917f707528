//! survey-archive - 普查参考资料，写出书目条目与普查汇总

use std::sync::Arc;

use helios::application::{SurveyArchive, SurveyArchiveHandler};
use helios::config::{load_config, print_config};
use helios::infrastructure::adapters::{FsReferenceArchive, JsonArtifactStorage};
use helios::infrastructure::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);
    tracing::info!("Helios - reference archive survey");
    print_config(&config);

    let archive = Arc::new(FsReferenceArchive::new(&config.reference.root));
    let artifacts = Arc::new(JsonArtifactStorage::new(&config.corpus.output_dir));

    let handler = SurveyArchiveHandler::new(archive, artifacts);
    let response = handler.handle(SurveyArchive).await?;

    let count = |analyses: Option<usize>| {
        analyses.map_or_else(|| "not found".to_string(), |n| n.to_string())
    };

    tracing::info!("=== Survey Summary ===");
    tracing::info!(
        "Text metadata entries: {} (Greek: {}, Latin: {})",
        response.total_texts,
        response.greek_texts,
        response.latin_texts
    );
    tracing::info!("Greek morphological entries: {}", count(response.greek_analyses));
    tracing::info!("Latin morphological entries: {}", count(response.latin_analyses));
    tracing::info!("Static text files: {}", response.static_files);
    tracing::info!("Metadata: {}", response.metadata_path.display());
    tracing::info!("Summary: {}", response.summary_path.display());

    Ok(())
}
