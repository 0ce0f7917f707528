//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite / 内存）
//!
//! 所有写操作均为 upsert：按业务键插入或更新，重复执行结果一致

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::catalog::AuthorProfile;
use crate::domain::corpus::UnitKind;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Corpus Repository
// ============================================================================

/// 作者实体（用于持久化），业务键: tlg_id
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorRecord {
    pub id: Uuid,
    pub tlg_id: String,
    pub name: String,
    pub full_name: String,
    pub period: String,
    pub genre: String,
    pub nationality: String,
    pub biography: String,
}

impl AuthorRecord {
    pub fn from_profile(tlg_id: impl Into<String>, profile: &AuthorProfile) -> Self {
        Self {
            id: Uuid::new_v4(),
            tlg_id: tlg_id.into(),
            name: profile.name.clone(),
            full_name: profile.full_name.clone(),
            period: profile.period.clone(),
            genre: profile.genre.clone(),
            nationality: profile.nationality.clone(),
            biography: profile.biography.clone(),
        }
    }
}

/// 作品实体（用于持久化），业务键: (author_id, tlg_id)
#[derive(Debug, Clone, PartialEq)]
pub struct WorkRecord {
    pub id: Uuid,
    pub author_id: Uuid,
    pub tlg_id: String,
    pub title: String,
    pub genre: String,
    pub language: String,
    pub line_count: usize,
    pub is_complete: bool,
}

/// 文本行实体，业务键: (work_id, language, line_number)
#[derive(Debug, Clone, PartialEq)]
pub struct TextRecord {
    pub id: Uuid,
    pub work_id: Uuid,
    pub language: String,
    pub content_type: UnitKind,
    pub line_number: String,
    pub content: String,
}

/// Corpus Repository Port
#[async_trait]
pub trait CorpusRepositoryPort: Send + Sync {
    /// 插入或更新作者，返回已持久化的作者 ID
    async fn upsert_author(&self, author: &AuthorRecord) -> Result<Uuid, RepositoryError>;

    /// 插入或更新作品，返回已持久化的作品 ID
    async fn upsert_work(&self, work: &WorkRecord) -> Result<Uuid, RepositoryError>;

    /// 插入或更新文本行
    async fn upsert_text(&self, text: &TextRecord) -> Result<(), RepositoryError>;

    /// 批量插入或更新文本行
    async fn upsert_texts(&self, texts: &[TextRecord]) -> Result<(), RepositoryError> {
        // 默认实现：逐条 upsert
        for text in texts {
            self.upsert_text(text).await?;
        }
        Ok(())
    }

    /// 根据 TLG ID 查找作者
    async fn find_author(&self, tlg_id: &str) -> Result<Option<AuthorRecord>, RepositoryError>;

    /// 获取作者的所有作品
    async fn find_works_by_author(&self, author_id: Uuid) -> Result<Vec<WorkRecord>, RepositoryError>;

    /// 获取作品在指定语言下的所有文本行
    async fn find_texts(
        &self,
        work_id: Uuid,
        language: &str,
    ) -> Result<Vec<TextRecord>, RepositoryError>;
}

// ============================================================================
// Vocabulary Repository
// ============================================================================

/// 用户实体，业务键: email
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// 词汇条目实体，业务键: (user_id, word, language)
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyEntryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub word: String,
    pub language: String,
    pub lemma: String,
    pub part_of_speech: String,
    pub definitions: Vec<String>,
    pub context: String,
    pub lookup_count: u32,
    pub difficulty: String,
    pub last_looked_up: DateTime<Utc>,
}

/// 闪卡实体，业务键: (user_id, vocabulary_entry_id)
#[derive(Debug, Clone, PartialEq)]
pub struct FlashcardRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vocabulary_entry_id: Uuid,
    pub front: String,
    pub back: String,
    pub next_review: DateTime<Utc>,
    pub review_count: u32,
    /// 1-5
    pub difficulty: u8,
}

/// 学习会话
#[derive(Debug, Clone, PartialEq)]
pub struct StudySessionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub cards_studied: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub session_type: String,
}

/// 测验记录
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAttemptRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_type: String,
    pub score: u32,
    pub total_questions: u32,
    /// 用时（秒）
    pub time_spent_secs: u32,
    pub completed: bool,
}

/// Vocabulary Repository Port
#[async_trait]
pub trait VocabularyRepositoryPort: Send + Sync {
    /// 插入或更新用户，返回已持久化的用户 ID
    async fn upsert_user(&self, user: &UserRecord) -> Result<Uuid, RepositoryError>;

    /// 插入或更新词汇条目，返回已持久化的条目 ID
    async fn upsert_vocabulary_entry(
        &self,
        entry: &VocabularyEntryRecord,
    ) -> Result<Uuid, RepositoryError>;

    /// 插入或更新闪卡，返回已持久化的闪卡 ID
    async fn upsert_flashcard(&self, card: &FlashcardRecord) -> Result<Uuid, RepositoryError>;

    /// 按 ID 保存学习会话
    async fn save_study_session(&self, session: &StudySessionRecord) -> Result<(), RepositoryError>;

    /// 按 ID 保存测验记录
    async fn save_quiz_attempt(&self, attempt: &QuizAttemptRecord) -> Result<(), RepositoryError>;

    /// 获取用户的词汇条目
    async fn find_vocabulary_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<VocabularyEntryRecord>, RepositoryError>;

    /// 获取用户的闪卡数量
    async fn count_flashcards(&self, user_id: Uuid) -> Result<usize, RepositoryError>;
}
