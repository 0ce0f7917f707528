//! In-Memory Corpus Repository Implementation

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::application::ports::{
    AuthorRecord, CorpusRepositoryPort, RepositoryError, TextRecord, WorkRecord,
};

/// 仓储内容快照（按业务键排序），用于比较两次导入结果
#[derive(Debug, Clone, PartialEq)]
pub struct RepositorySnapshot {
    pub authors: Vec<AuthorRecord>,
    pub works: Vec<WorkRecord>,
    pub texts: Vec<TextRecord>,
}

/// 内存语料库仓储
///
/// 与 SQLite 实现相同的 upsert 语义：按业务键覆盖字段，保留首次写入的 ID
pub struct InMemoryCorpusRepository {
    /// tlg_id -> 作者
    authors: DashMap<String, AuthorRecord>,
    /// (author_id, tlg_id) -> 作品
    works: DashMap<(Uuid, String), WorkRecord>,
    /// (work_id, language, line_number) -> 文本行
    texts: DashMap<(Uuid, String, String), TextRecord>,
}

impl InMemoryCorpusRepository {
    pub fn new() -> Self {
        Self {
            authors: DashMap::new(),
            works: DashMap::new(),
            texts: DashMap::new(),
        }
    }

    pub fn snapshot(&self) -> RepositorySnapshot {
        let mut authors: Vec<AuthorRecord> = self.authors.iter().map(|e| e.value().clone()).collect();
        authors.sort_by(|a, b| a.tlg_id.cmp(&b.tlg_id));

        let mut works: Vec<WorkRecord> = self.works.iter().map(|e| e.value().clone()).collect();
        works.sort_by(|a, b| (a.author_id, &a.tlg_id).cmp(&(b.author_id, &b.tlg_id)));

        let mut texts: Vec<TextRecord> = self.texts.iter().map(|e| e.value().clone()).collect();
        texts.sort_by(|a, b| {
            (a.work_id, &a.language, &a.line_number).cmp(&(b.work_id, &b.language, &b.line_number))
        });

        RepositorySnapshot {
            authors,
            works,
            texts,
        }
    }
}

impl Default for InMemoryCorpusRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CorpusRepositoryPort for InMemoryCorpusRepository {
    async fn upsert_author(&self, author: &AuthorRecord) -> Result<Uuid, RepositoryError> {
        let mut entry = self
            .authors
            .entry(author.tlg_id.clone())
            .or_insert_with(|| author.clone());
        let id = entry.id;
        *entry = AuthorRecord {
            id,
            ..author.clone()
        };
        Ok(id)
    }

    async fn upsert_work(&self, work: &WorkRecord) -> Result<Uuid, RepositoryError> {
        let mut entry = self
            .works
            .entry((work.author_id, work.tlg_id.clone()))
            .or_insert_with(|| work.clone());
        let id = entry.id;
        *entry = WorkRecord {
            id,
            ..work.clone()
        };
        Ok(id)
    }

    async fn upsert_text(&self, text: &TextRecord) -> Result<(), RepositoryError> {
        let key = (text.work_id, text.language.clone(), text.line_number.clone());
        let mut entry = self.texts.entry(key).or_insert_with(|| text.clone());
        let id = entry.id;
        *entry = TextRecord {
            id,
            ..text.clone()
        };
        Ok(())
    }

    async fn find_author(&self, tlg_id: &str) -> Result<Option<AuthorRecord>, RepositoryError> {
        Ok(self.authors.get(tlg_id).map(|a| a.clone()))
    }

    async fn find_works_by_author(&self, author_id: Uuid) -> Result<Vec<WorkRecord>, RepositoryError> {
        let mut works: Vec<WorkRecord> = self
            .works
            .iter()
            .filter(|e| e.value().author_id == author_id)
            .map(|e| e.value().clone())
            .collect();
        works.sort_by(|a, b| a.tlg_id.cmp(&b.tlg_id));
        Ok(works)
    }

    async fn find_texts(
        &self,
        work_id: Uuid,
        language: &str,
    ) -> Result<Vec<TextRecord>, RepositoryError> {
        let mut texts: Vec<TextRecord> = self
            .texts
            .iter()
            .filter(|e| e.value().work_id == work_id && e.value().language == language)
            .map(|e| e.value().clone())
            .collect();
        texts.sort_by(|a, b| a.line_number.cmp(&b.line_number));
        Ok(texts)
    }
}
