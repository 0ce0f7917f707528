//! Import Command Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{ImportCorpus, ImportCorpusResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtifactStoragePort, AuthorRecord, CorpusRepositoryPort, TextRecord, WorkRecord,
};
use crate::domain::catalog::{resolve_author, resolve_genre};
use crate::domain::corpus::{ExtractionResult, WorkEntry};

/// ImportCorpus Handler - 读取汇总与产物，upsert 作者、作品和文本行
///
/// 汇总不可读为致命错误；单个作品产物缺失或损坏只记警告并跳过
pub struct ImportCorpusHandler {
    artifacts: Arc<dyn ArtifactStoragePort>,
    corpus_repo: Arc<dyn CorpusRepositoryPort>,
}

impl ImportCorpusHandler {
    pub fn new(
        artifacts: Arc<dyn ArtifactStoragePort>,
        corpus_repo: Arc<dyn CorpusRepositoryPort>,
    ) -> Self {
        Self {
            artifacts,
            corpus_repo,
        }
    }

    pub async fn handle(&self, _command: ImportCorpus) -> Result<ImportCorpusResponse, ApplicationError> {
        let summary = self.artifacts.load_summary().await?;
        tracing::info!(
            authors = summary.total_authors,
            works = summary.total_works,
            "Loaded extraction summary"
        );

        let mut response = ImportCorpusResponse::default();

        for author_summary in &summary.authors {
            let tlg_id = author_summary.author.id.as_str();
            let profile = resolve_author(tlg_id);

            tracing::info!(author = %profile.name, tlg_id = %tlg_id, "Importing author");

            let author_id = self
                .corpus_repo
                .upsert_author(&AuthorRecord::from_profile(tlg_id, &profile))
                .await?;
            response.authors += 1;

            for entry in &author_summary.works {
                let genre = resolve_genre(&entry.work_title, Some(&profile.genre));
                let work_id = self
                    .corpus_repo
                    .upsert_work(&work_record(author_id, entry, genre))
                    .await?;
                response.works += 1;

                let result = match self.artifacts.load_result(&entry.output_file).await {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::warn!(
                            file = %entry.output_file,
                            error = %e,
                            "Skipping work texts"
                        );
                        response.skipped_works += 1;
                        continue;
                    }
                };

                let texts = text_records(work_id, &entry.language, &result);
                self.corpus_repo.upsert_texts(&texts).await?;
                response.texts += texts.len();

                tracing::debug!(
                    work = %entry.work_title,
                    language = %entry.language,
                    texts = texts.len(),
                    "Imported work"
                );
            }
        }

        tracing::info!(
            authors = response.authors,
            works = response.works,
            texts = response.texts,
            skipped_works = response.skipped_works,
            "Import complete"
        );

        Ok(response)
    }
}

fn work_record(author_id: Uuid, entry: &WorkEntry, genre: String) -> WorkRecord {
    WorkRecord {
        id: Uuid::new_v4(),
        author_id,
        tlg_id: entry.work_id.to_string(),
        title: entry.work_title.clone(),
        genre,
        language: entry.language.clone(),
        line_count: entry.line_count,
        is_complete: entry.line_count > 0,
    }
}

/// 产物中的每个单元对应一行，行键见 `TextUnit::storage_key`
fn text_records(work_id: Uuid, fallback_language: &str, result: &ExtractionResult) -> Vec<TextRecord> {
    let language = if result.language().is_empty() {
        fallback_language
    } else {
        result.language()
    };

    result
        .units()
        .iter()
        .enumerate()
        .map(|(index, unit)| TextRecord {
            id: Uuid::new_v4(),
            work_id,
            language: language.to_string(),
            content_type: unit.kind(),
            line_number: unit.storage_key(index),
            content: unit.text().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::corpus::{
        ArchiveId, AuthorRef, AuthorSummary, CorpusSummary, DocumentMetadata, TextUnit, UnitKind,
    };
    use crate::infrastructure::adapters::JsonArtifactStorage;
    use crate::infrastructure::memory::InMemoryCorpusRepository;
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample_result() -> ExtractionResult {
        let meta = DocumentMetadata::new(
            Some("Iliad".into()),
            Some("Homer".into()),
            Some("grc".into()),
            "tlg0012/tlg001/tlg0012.tlg001.perseus-grc2.xml",
        );
        ExtractionResult::assemble(
            meta,
            vec![
                TextUnit::from_raw(UnitKind::Line, Some("1"), "μῆνιν ἄειδε").unwrap(),
                TextUnit::from_raw(UnitKind::Line, None, "unnumbered").unwrap(),
            ],
            vec![TextUnit::from_raw(UnitKind::Paragraph, None, "prose").unwrap()],
            vec![],
        )
        .unwrap()
    }

    async fn seed_artifacts(storage: &JsonArtifactStorage, with_missing: bool) {
        let author = ArchiveId::new("tlg0012").unwrap();
        let work = ArchiveId::new("tlg001").unwrap();
        let output_file = storage.save_result(&author, &work, &sample_result()).await.unwrap();

        let mut works = vec![WorkEntry {
            work_id: work,
            work_title: "Iliad".into(),
            language: "grc".into(),
            output_file,
            line_count: 3,
        }];
        if with_missing {
            works.push(WorkEntry {
                work_id: ArchiveId::new("tlg002").unwrap(),
                work_title: "Odyssey".into(),
                language: "grc".into(),
                output_file: "tlg0012_tlg002_grc.json".into(),
                line_count: 4,
            });
        }

        let summary = CorpusSummary::new(
            vec![AuthorSummary {
                author: AuthorRef { id: author, name: "Homer".into() },
                works,
            }],
            Utc::now(),
        );
        storage.save_summary(&summary).await.unwrap();
    }

    #[tokio::test]
    async fn test_import_resolves_metadata_and_keys_texts() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(JsonArtifactStorage::new(dir.path()));
        seed_artifacts(&storage, false).await;

        let repo = Arc::new(InMemoryCorpusRepository::new());
        let handler = ImportCorpusHandler::new(storage, repo.clone());
        let response = handler.handle(ImportCorpus).await.unwrap();

        assert_eq!(response.authors, 1);
        assert_eq!(response.works, 1);
        assert_eq!(response.texts, 3);

        let author = repo.find_author("tlg0012").await.unwrap().unwrap();
        assert_eq!(author.name, "Euripides");

        let works = repo.find_works_by_author(author.id).await.unwrap();
        assert_eq!(works.len(), 1);
        assert_eq!(works[0].genre, "Epic Poetry");
        assert!(works[0].is_complete);

        let mut keys: Vec<String> = repo
            .find_texts(works[0].id, "grc")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.line_number)
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["1", "line_2", "paragraph_3"]);
    }

    #[tokio::test]
    async fn test_import_is_idempotent() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(JsonArtifactStorage::new(dir.path()));
        seed_artifacts(&storage, false).await;

        let repo = Arc::new(InMemoryCorpusRepository::new());
        let handler = ImportCorpusHandler::new(storage, repo.clone());

        handler.handle(ImportCorpus).await.unwrap();
        let first = repo.snapshot();
        handler.handle(ImportCorpus).await.unwrap();
        let second = repo.snapshot();

        assert_eq!(first, second);
        assert_eq!(second.texts.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_artifact_is_skipped() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(JsonArtifactStorage::new(dir.path()));
        seed_artifacts(&storage, true).await;

        let repo = Arc::new(InMemoryCorpusRepository::new());
        let response = ImportCorpusHandler::new(storage, repo)
            .handle(ImportCorpus)
            .await
            .unwrap();

        assert_eq!(response.works, 2);
        assert_eq!(response.texts, 3);
        assert_eq!(response.skipped_works, 1);
    }

    #[tokio::test]
    async fn test_missing_summary_is_fatal() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(JsonArtifactStorage::new(dir.path()));
        let repo = Arc::new(InMemoryCorpusRepository::new());

        let result = ImportCorpusHandler::new(storage, repo).handle(ImportCorpus).await;
        assert!(matches!(result, Err(ApplicationError::StorageError(_))));
    }
}
