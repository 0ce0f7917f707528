//! Extract Command Handlers

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{ExtractCorpus, ExtractCorpusResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtifactStoragePort, AuthorSource, CorpusSourcePort, DocumentExtractorPort, DocumentSource,
    ExtractError,
};
use crate::domain::corpus::{AuthorRef, AuthorSummary, CorpusSummary, ExtractionResult, WorkEntry};

/// ExtractCorpus Handler - 遍历语料库，逐文档抽取并写出产物
///
/// 单文档解析失败只记警告并跳过；语料库根目录缺失与产物写入失败为致命错误
pub struct ExtractCorpusHandler {
    source: Arc<dyn CorpusSourcePort>,
    extractor: Arc<dyn DocumentExtractorPort>,
    artifacts: Arc<dyn ArtifactStoragePort>,
}

impl ExtractCorpusHandler {
    pub fn new(
        source: Arc<dyn CorpusSourcePort>,
        extractor: Arc<dyn DocumentExtractorPort>,
        artifacts: Arc<dyn ArtifactStoragePort>,
    ) -> Self {
        Self {
            source,
            extractor,
            artifacts,
        }
    }

    pub async fn handle(&self, _command: ExtractCorpus) -> Result<ExtractCorpusResponse, ApplicationError> {
        let authors = self.source.list_authors().await?;
        tracing::info!(count = authors.len(), "Found author directories");

        let mut summaries = Vec::with_capacity(authors.len());
        let mut skipped_documents = 0;

        for (index, author) in authors.iter().enumerate() {
            tracing::info!(
                author = %author.id,
                "Processing author ({}/{})",
                index + 1,
                authors.len()
            );

            let (summary, skipped) = self.extract_author(author).await?;
            skipped_documents += skipped;
            summaries.push(summary);
        }

        let summary = CorpusSummary::new(summaries, Utc::now());
        let summary_path = self.artifacts.save_summary(&summary).await?;

        tracing::info!(
            total_authors = summary.total_authors,
            total_works = summary.total_works,
            total_files = summary.total_files,
            skipped_documents = skipped_documents,
            summary = %summary_path.display(),
            "Extraction complete"
        );

        Ok(ExtractCorpusResponse {
            summary_path,
            total_authors: summary.total_authors,
            total_works: summary.total_works,
            total_files: summary.total_files,
            total_lines: summary.total_lines(),
            skipped_documents,
        })
    }

    /// 抽取单个作者的全部作品，返回 (作者汇总, 跳过的文档数)
    async fn extract_author(
        &self,
        author: &AuthorSource,
    ) -> Result<(AuthorSummary, usize), ApplicationError> {
        let mut entries = Vec::new();
        let mut skipped = 0;

        let works = match self.source.list_works(author).await {
            Ok(works) => works,
            Err(e) => {
                tracing::warn!(author = %author.id, error = %e, "Could not list works, skipping author");
                Vec::new()
            }
        };

        for work in &works {
            for document in &work.documents {
                let result = match self.extract(document).await? {
                    Ok(Some(result)) => result,
                    Ok(None) => {
                        tracing::debug!(
                            path = %document.relative_path.display(),
                            "Document has no text units"
                        );
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %document.relative_path.display(),
                            error = %e,
                            "Skipping document"
                        );
                        skipped += 1;
                        continue;
                    }
                };

                let output_file = self
                    .artifacts
                    .save_result(&author.id, &work.id, &result)
                    .await?;

                tracing::info!(
                    author = %author.name,
                    work = %work.title,
                    language = %result.language(),
                    lines = result.unit_count(),
                    "Extracted"
                );

                entries.push(WorkEntry {
                    work_id: work.id.clone(),
                    work_title: work.title.clone(),
                    language: result.language().to_string(),
                    output_file,
                    line_count: result.unit_count(),
                });
            }
        }

        let summary = AuthorSummary {
            author: AuthorRef {
                id: author.id.clone(),
                name: author.name.clone(),
            },
            works: entries,
        };

        Ok((summary, skipped))
    }

    /// 在阻塞线程池中解析文档
    ///
    /// 外层错误为任务失败（致命），内层为单文档抽取结果
    async fn extract(
        &self,
        document: &DocumentSource,
    ) -> Result<Result<Option<ExtractionResult>, ExtractError>, ApplicationError> {
        let extractor = Arc::clone(&self.extractor);
        let path = document.path.clone();
        let relative_path = document.relative_path.clone();

        tokio::task::spawn_blocking(move || extractor.extract_file(&path, &relative_path))
            .await
            .map_err(|e| ApplicationError::internal(format!("Extraction task failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{
        FsCorpusWalker, JsonArtifactStorage, TeiDocumentExtractor, TeiExtractorConfig,
    };
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const ILIAD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <teiHeader><fileDesc><titleStmt>
    <title>Iliad</title><author>Homer</author>
  </titleStmt></fileDesc></teiHeader>
  <text xml:lang="grc"><body>
    <l n="1">μῆνιν ἄειδε θεὰ</l>
    <l n="2">οὐλομένην</l>
  </body></text>
</TEI>"#;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn handler(root: &Path, out: &Path) -> ExtractCorpusHandler {
        ExtractCorpusHandler::new(
            Arc::new(FsCorpusWalker::new(root)),
            Arc::new(TeiDocumentExtractor::new(TeiExtractorConfig::default())),
            Arc::new(JsonArtifactStorage::new(out)),
        )
    }

    #[tokio::test]
    async fn test_extracts_corpus_and_skips_bad_documents() {
        let corpus = tempdir().unwrap();
        let out = tempdir().unwrap();
        let root = corpus.path();

        write(
            &root.join("tlg0012/__cts__.xml"),
            r#"<ti:textgroup xmlns:ti="http://chs.harvard.edu/xmlns/cts"><ti:groupname>Homer</ti:groupname></ti:textgroup>"#,
        );
        write(
            &root.join("tlg0012/tlg001/__cts__.xml"),
            r#"<ti:work xmlns:ti="http://chs.harvard.edu/xmlns/cts"><ti:title>Iliad</ti:title></ti:work>"#,
        );
        write(&root.join("tlg0012/tlg001/tlg0012.tlg001.perseus-grc2.xml"), ILIAD);
        write(
            &root.join("tlg0012/tlg001/tlg0012.tlg001.perseus-eng3.xml"),
            "<TEI><text xml:lang=\"eng\"><l>unclosed</TEI>",
        );
        write(
            &root.join("tlg0099/tlg001/tlg0099.tlg001.perseus-grc1.xml"),
            "<TEI><text xml:lang=\"grc\"><l n=\"1\">   </l></text></TEI>",
        );

        let response = handler(root, out.path()).handle(ExtractCorpus).await.unwrap();

        assert_eq!(response.total_authors, 1);
        assert_eq!(response.total_works, 1);
        assert_eq!(response.total_lines, 2);
        assert_eq!(response.skipped_documents, 1);
        assert!(out.path().join("tlg0012_tlg001_grc.json").exists());
        assert!(response.summary_path.exists());

        let storage = JsonArtifactStorage::new(out.path());
        let summary = storage.load_summary().await.unwrap();
        assert_eq!(summary.authors[0].author.name, "Homer");
        assert_eq!(summary.authors[0].works[0].work_title, "Iliad");
        assert_eq!(summary.authors[0].works[0].output_file, "tlg0012_tlg001_grc.json");
    }

    #[tokio::test]
    async fn test_missing_root_is_fatal() {
        let out = tempdir().unwrap();
        let missing = out.path().join("nope");

        let result = handler(&missing, out.path()).handle(ExtractCorpus).await;
        assert!(matches!(result, Err(ApplicationError::CorpusError(_))));
    }
}
