//! extract-texts - 遍历语料库并写出每个作品的 JSON 产物与运行汇总

use std::sync::Arc;

use helios::application::{ExtractCorpus, ExtractCorpusHandler};
use helios::config::{load_config, print_config};
use helios::infrastructure::adapters::{
    FsCorpusWalker, JsonArtifactStorage, TeiDocumentExtractor, TeiExtractorConfig,
};
use helios::infrastructure::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);
    tracing::info!("Helios - Perseus text extraction");
    print_config(&config);

    let source = Arc::new(FsCorpusWalker::new(&config.corpus.root));
    let extractor = Arc::new(TeiDocumentExtractor::new(TeiExtractorConfig {
        stream_threshold_bytes: config.corpus.stream_threshold_bytes,
    }));
    let artifacts = Arc::new(JsonArtifactStorage::new(&config.corpus.output_dir));

    let handler = ExtractCorpusHandler::new(source, extractor, artifacts);
    let response = handler.handle(ExtractCorpus).await?;

    tracing::info!("=== Extraction Summary ===");
    tracing::info!("Authors: {}", response.total_authors);
    tracing::info!("Works: {}", response.total_works);
    tracing::info!("Files: {}", response.total_files);
    tracing::info!("Text units: {}", response.total_lines);
    tracing::info!("Skipped documents: {}", response.skipped_documents);
    tracing::info!("Summary: {}", response.summary_path.display());

    Ok(())
}
