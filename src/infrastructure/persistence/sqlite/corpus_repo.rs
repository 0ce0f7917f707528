//! SQLite Corpus Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    AuthorRecord, CorpusRepositoryPort, RepositoryError, TextRecord, WorkRecord,
};
use crate::domain::corpus::UnitKind;

/// SQLite Corpus Repository
///
/// 按业务键 upsert，冲突时更新字段但保留原有 ID（`RETURNING id` 返回实际 ID）
pub struct SqliteCorpusRepository {
    pool: DbPool,
}

impl SqliteCorpusRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

fn parse_id(id: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(id).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

#[derive(FromRow)]
struct AuthorRow {
    id: String,
    tlg_id: String,
    name: String,
    full_name: String,
    period: String,
    genre: String,
    nationality: String,
    biography: String,
}

impl TryFrom<AuthorRow> for AuthorRecord {
    type Error = RepositoryError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        Ok(AuthorRecord {
            id: parse_id(&row.id)?,
            tlg_id: row.tlg_id,
            name: row.name,
            full_name: row.full_name,
            period: row.period,
            genre: row.genre,
            nationality: row.nationality,
            biography: row.biography,
        })
    }
}

#[derive(FromRow)]
struct WorkRow {
    id: String,
    author_id: String,
    tlg_id: String,
    title: String,
    genre: String,
    language: String,
    line_count: i64,
    is_complete: bool,
}

impl TryFrom<WorkRow> for WorkRecord {
    type Error = RepositoryError;

    fn try_from(row: WorkRow) -> Result<Self, Self::Error> {
        Ok(WorkRecord {
            id: parse_id(&row.id)?,
            author_id: parse_id(&row.author_id)?,
            tlg_id: row.tlg_id,
            title: row.title,
            genre: row.genre,
            language: row.language,
            line_count: row.line_count as usize,
            is_complete: row.is_complete,
        })
    }
}

#[derive(FromRow)]
struct TextRow {
    id: String,
    work_id: String,
    language: String,
    content_type: String,
    line_number: String,
    content: String,
}

impl TryFrom<TextRow> for TextRecord {
    type Error = RepositoryError;

    fn try_from(row: TextRow) -> Result<Self, Self::Error> {
        let content_type = UnitKind::from_str(&row.content_type).ok_or_else(|| {
            RepositoryError::SerializationError(format!("Unknown content type: {}", row.content_type))
        })?;

        Ok(TextRecord {
            id: parse_id(&row.id)?,
            work_id: parse_id(&row.work_id)?,
            language: row.language,
            content_type,
            line_number: row.line_number,
            content: row.content,
        })
    }
}

const UPSERT_TEXT: &str = r#"
    INSERT INTO texts (id, work_id, language, content_type, line_number, content)
    VALUES (?, ?, ?, ?, ?, ?)
    ON CONFLICT(work_id, language, line_number) DO UPDATE SET
        content_type = excluded.content_type,
        content = excluded.content
"#;

#[async_trait]
impl CorpusRepositoryPort for SqliteCorpusRepository {
    async fn upsert_author(&self, author: &AuthorRecord) -> Result<Uuid, RepositoryError> {
        let id: String = sqlx::query_scalar(
            r#"
            INSERT INTO authors (id, tlg_id, name, full_name, period, genre, nationality, biography)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(tlg_id) DO UPDATE SET
                name = excluded.name,
                full_name = excluded.full_name,
                period = excluded.period,
                genre = excluded.genre,
                nationality = excluded.nationality,
                biography = excluded.biography
            RETURNING id
            "#,
        )
        .bind(author.id.to_string())
        .bind(&author.tlg_id)
        .bind(&author.name)
        .bind(&author.full_name)
        .bind(&author.period)
        .bind(&author.genre)
        .bind(&author.nationality)
        .bind(&author.biography)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        parse_id(&id)
    }

    async fn upsert_work(&self, work: &WorkRecord) -> Result<Uuid, RepositoryError> {
        let id: String = sqlx::query_scalar(
            r#"
            INSERT INTO works (id, author_id, tlg_id, title, genre, language, line_count, is_complete)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(author_id, tlg_id) DO UPDATE SET
                title = excluded.title,
                genre = excluded.genre,
                language = excluded.language,
                line_count = excluded.line_count,
                is_complete = excluded.is_complete
            RETURNING id
            "#,
        )
        .bind(work.id.to_string())
        .bind(work.author_id.to_string())
        .bind(&work.tlg_id)
        .bind(&work.title)
        .bind(&work.genre)
        .bind(&work.language)
        .bind(work.line_count as i64)
        .bind(work.is_complete)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        parse_id(&id)
    }

    async fn upsert_text(&self, text: &TextRecord) -> Result<(), RepositoryError> {
        sqlx::query(UPSERT_TEXT)
            .bind(text.id.to_string())
            .bind(text.work_id.to_string())
            .bind(&text.language)
            .bind(text.content_type.as_str())
            .bind(&text.line_number)
            .bind(&text.content)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn upsert_texts(&self, texts: &[TextRecord]) -> Result<(), RepositoryError> {
        if texts.is_empty() {
            return Ok(());
        }

        // 单个作品的全部文本行在一个事务内写入
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        for text in texts {
            sqlx::query(UPSERT_TEXT)
                .bind(text.id.to_string())
                .bind(text.work_id.to_string())
                .bind(&text.language)
                .bind(text.content_type.as_str())
                .bind(&text.line_number)
                .bind(&text.content)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn find_author(&self, tlg_id: &str) -> Result<Option<AuthorRecord>, RepositoryError> {
        let row: Option<AuthorRow> = sqlx::query_as(
            "SELECT id, tlg_id, name, full_name, period, genre, nationality, biography FROM authors WHERE tlg_id = ?",
        )
        .bind(tlg_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(AuthorRecord::try_from).transpose()
    }

    async fn find_works_by_author(&self, author_id: Uuid) -> Result<Vec<WorkRecord>, RepositoryError> {
        let rows: Vec<WorkRow> = sqlx::query_as(
            "SELECT id, author_id, tlg_id, title, genre, language, line_count, is_complete FROM works WHERE author_id = ? ORDER BY tlg_id",
        )
        .bind(author_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(WorkRecord::try_from).collect()
    }

    async fn find_texts(
        &self,
        work_id: Uuid,
        language: &str,
    ) -> Result<Vec<TextRecord>, RepositoryError> {
        let rows: Vec<TextRow> = sqlx::query_as(
            "SELECT id, work_id, language, content_type, line_number, content FROM texts WHERE work_id = ? AND language = ? ORDER BY line_number",
        )
        .bind(work_id.to_string())
        .bind(language)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(TextRecord::try_from).collect()
    }
}
