//! SQLite Vocabulary Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    FlashcardRecord, QuizAttemptRecord, RepositoryError, StudySessionRecord, UserRecord,
    VocabularyEntryRecord, VocabularyRepositoryPort,
};

/// SQLite Vocabulary Repository
pub struct SqliteVocabularyRepository {
    pool: DbPool,
}

impl SqliteVocabularyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

fn serialization_error(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::SerializationError(e.to_string())
}

#[derive(FromRow)]
struct VocabularyEntryRow {
    id: String,
    user_id: String,
    word: String,
    language: String,
    lemma: String,
    part_of_speech: String,
    definitions: String,
    context: String,
    lookup_count: i64,
    difficulty: String,
    last_looked_up: String,
}

impl TryFrom<VocabularyEntryRow> for VocabularyEntryRecord {
    type Error = RepositoryError;

    fn try_from(row: VocabularyEntryRow) -> Result<Self, Self::Error> {
        Ok(VocabularyEntryRecord {
            id: Uuid::parse_str(&row.id).map_err(serialization_error)?,
            user_id: Uuid::parse_str(&row.user_id).map_err(serialization_error)?,
            word: row.word,
            language: row.language,
            lemma: row.lemma,
            part_of_speech: row.part_of_speech,
            // 释义列表以 JSON 数组存储
            definitions: serde_json::from_str(&row.definitions).map_err(serialization_error)?,
            context: row.context,
            lookup_count: row.lookup_count as u32,
            difficulty: row.difficulty,
            last_looked_up: DateTime::parse_from_rfc3339(&row.last_looked_up)
                .map_err(serialization_error)?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl VocabularyRepositoryPort for SqliteVocabularyRepository {
    async fn upsert_user(&self, user: &UserRecord) -> Result<Uuid, RepositoryError> {
        let id: String = sqlx::query_scalar(
            r#"
            INSERT INTO users (id, email, name, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(email) DO UPDATE SET
                name = excluded.name
            RETURNING id
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.created_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Uuid::parse_str(&id).map_err(serialization_error)
    }

    async fn upsert_vocabulary_entry(
        &self,
        entry: &VocabularyEntryRecord,
    ) -> Result<Uuid, RepositoryError> {
        let definitions = serde_json::to_string(&entry.definitions).map_err(serialization_error)?;

        let id: String = sqlx::query_scalar(
            r#"
            INSERT INTO vocabulary_entries
                (id, user_id, word, language, lemma, part_of_speech, definitions, context,
                 lookup_count, difficulty, last_looked_up)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, word, language) DO UPDATE SET
                lemma = excluded.lemma,
                part_of_speech = excluded.part_of_speech,
                definitions = excluded.definitions,
                context = excluded.context,
                lookup_count = excluded.lookup_count,
                difficulty = excluded.difficulty,
                last_looked_up = excluded.last_looked_up
            RETURNING id
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.to_string())
        .bind(&entry.word)
        .bind(&entry.language)
        .bind(&entry.lemma)
        .bind(&entry.part_of_speech)
        .bind(definitions)
        .bind(&entry.context)
        .bind(entry.lookup_count as i64)
        .bind(&entry.difficulty)
        .bind(entry.last_looked_up.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Uuid::parse_str(&id).map_err(serialization_error)
    }

    async fn upsert_flashcard(&self, card: &FlashcardRecord) -> Result<Uuid, RepositoryError> {
        let id: String = sqlx::query_scalar(
            r#"
            INSERT INTO flashcards
                (id, user_id, vocabulary_entry_id, front, back, next_review, review_count, difficulty)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, vocabulary_entry_id) DO UPDATE SET
                front = excluded.front,
                back = excluded.back,
                next_review = excluded.next_review,
                review_count = excluded.review_count,
                difficulty = excluded.difficulty
            RETURNING id
            "#,
        )
        .bind(card.id.to_string())
        .bind(card.user_id.to_string())
        .bind(card.vocabulary_entry_id.to_string())
        .bind(&card.front)
        .bind(&card.back)
        .bind(card.next_review.to_rfc3339())
        .bind(card.review_count as i64)
        .bind(card.difficulty as i64)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Uuid::parse_str(&id).map_err(serialization_error)
    }

    async fn save_study_session(&self, session: &StudySessionRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO study_sessions
                (id, user_id, start_time, end_time, cards_studied, correct_answers, total_questions, session_type)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                start_time = excluded.start_time,
                end_time = excluded.end_time,
                cards_studied = excluded.cards_studied,
                correct_answers = excluded.correct_answers,
                total_questions = excluded.total_questions,
                session_type = excluded.session_type
            "#,
        )
        .bind(session.id.to_string())
        .bind(session.user_id.to_string())
        .bind(session.start_time.to_rfc3339())
        .bind(session.end_time.map(|t| t.to_rfc3339()))
        .bind(session.cards_studied as i64)
        .bind(session.correct_answers as i64)
        .bind(session.total_questions as i64)
        .bind(&session.session_type)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn save_quiz_attempt(&self, attempt: &QuizAttemptRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO quiz_attempts
                (id, user_id, quiz_type, score, total_questions, time_spent_secs, completed)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                quiz_type = excluded.quiz_type,
                score = excluded.score,
                total_questions = excluded.total_questions,
                time_spent_secs = excluded.time_spent_secs,
                completed = excluded.completed
            "#,
        )
        .bind(attempt.id.to_string())
        .bind(attempt.user_id.to_string())
        .bind(&attempt.quiz_type)
        .bind(attempt.score as i64)
        .bind(attempt.total_questions as i64)
        .bind(attempt.time_spent_secs as i64)
        .bind(attempt.completed)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_vocabulary_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<VocabularyEntryRecord>, RepositoryError> {
        let rows: Vec<VocabularyEntryRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, word, language, lemma, part_of_speech, definitions, context,
                   lookup_count, difficulty, last_looked_up
            FROM vocabulary_entries
            WHERE user_id = ?
            ORDER BY language, word
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(VocabularyEntryRecord::try_from).collect()
    }

    async fn count_flashcards(&self, user_id: Uuid) -> Result<usize, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM flashcards WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn repository() -> SqliteVocabularyRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteVocabularyRepository::new(pool)
    }

    fn user(name: &str) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            email: "reader@example.org".to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    fn entry(user_id: Uuid, lookup_count: u32) -> VocabularyEntryRecord {
        VocabularyEntryRecord {
            id: Uuid::new_v4(),
            user_id,
            word: "λόγος".to_string(),
            language: "grc".to_string(),
            lemma: "λόγος".to_string(),
            part_of_speech: "noun".to_string(),
            definitions: vec!["word".to_string(), "reason".to_string()],
            context: "John 1:1".to_string(),
            lookup_count,
            difficulty: "hard".to_string(),
            last_looked_up: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_user_by_email() {
        let repo = repository().await;
        let first = repo.upsert_user(&user("Reader")).await.unwrap();
        let second = repo.upsert_user(&user("Renamed Reader")).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_vocabulary_entry_round_trip_and_upsert() {
        let repo = repository().await;
        let user_id = repo.upsert_user(&user("Reader")).await.unwrap();

        let first = repo.upsert_vocabulary_entry(&entry(user_id, 1)).await.unwrap();
        let second = repo.upsert_vocabulary_entry(&entry(user_id, 4)).await.unwrap();
        assert_eq!(first, second);

        let entries = repo.find_vocabulary_by_user(user_id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].definitions, vec!["word", "reason"]);
        assert_eq!(entries[0].lookup_count, 4);
    }

    #[tokio::test]
    async fn test_flashcard_unique_per_entry() {
        let repo = repository().await;
        let user_id = repo.upsert_user(&user("Reader")).await.unwrap();
        let entry_id = repo.upsert_vocabulary_entry(&entry(user_id, 1)).await.unwrap();

        for review_count in 0..3 {
            repo.upsert_flashcard(&FlashcardRecord {
                id: Uuid::new_v4(),
                user_id,
                vocabulary_entry_id: entry_id,
                front: "λόγος".to_string(),
                back: "word; reason".to_string(),
                next_review: Utc::now(),
                review_count,
                difficulty: 3,
            })
            .await
            .unwrap();
        }

        assert_eq!(repo.count_flashcards(user_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_session_and_quiz_saved_by_id() {
        let repo = repository().await;
        let user_id = repo.upsert_user(&user("Reader")).await.unwrap();
        let session = StudySessionRecord {
            id: Uuid::new_v5(&user_id, b"study-session"),
            user_id,
            start_time: Utc::now(),
            end_time: None,
            cards_studied: 3,
            correct_answers: 2,
            total_questions: 3,
            session_type: "flashcards".to_string(),
        };
        let attempt = QuizAttemptRecord {
            id: Uuid::new_v5(&user_id, b"quiz-attempt"),
            user_id,
            quiz_type: "vocabulary".to_string(),
            score: 8,
            total_questions: 10,
            time_spent_secs: 300,
            completed: true,
        };

        repo.save_study_session(&session).await.unwrap();
        repo.save_study_session(&session).await.unwrap();
        repo.save_quiz_attempt(&attempt).await.unwrap();
        repo.save_quiz_attempt(&attempt).await.unwrap();

        let sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM study_sessions")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        let attempts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_attempts")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!((sessions, attempts), (1, 1));
    }
}
