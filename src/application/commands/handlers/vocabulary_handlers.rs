//! Vocabulary Command Handlers

use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{SeedVocabulary, SeedVocabularyResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    FlashcardRecord, QuizAttemptRecord, StudySessionRecord, UserRecord, VocabularyEntryRecord,
    VocabularyRepositoryPort,
};
use crate::domain::vocabulary::{SeedWord, FLASHCARD_COUNT, SEED_WORDS};

/// SeedVocabulary Handler - 写入演示用户、词汇、闪卡、学习会话与测验记录
///
/// 所有写入按业务键 upsert，会话与测验 ID 由用户 ID 派生，可重复执行
pub struct SeedVocabularyHandler {
    vocabulary_repo: Arc<dyn VocabularyRepositoryPort>,
}

impl SeedVocabularyHandler {
    pub fn new(vocabulary_repo: Arc<dyn VocabularyRepositoryPort>) -> Self {
        Self { vocabulary_repo }
    }

    pub async fn handle(&self, command: SeedVocabulary) -> Result<SeedVocabularyResponse, ApplicationError> {
        let now = Utc::now();

        let user_id = self
            .vocabulary_repo
            .upsert_user(&UserRecord {
                id: Uuid::new_v4(),
                email: command.email.clone(),
                name: command.name,
                created_at: now,
            })
            .await?;
        tracing::info!(user = %command.email, user_id = %user_id, "Upserted demo user");

        let mut entry_ids = Vec::with_capacity(SEED_WORDS.len());
        for (index, word) in SEED_WORDS.iter().enumerate() {
            let entry_id = self
                .vocabulary_repo
                .upsert_vocabulary_entry(&vocabulary_entry(user_id, index, word))
                .await?;
            tracing::debug!(word = word.word, language = word.language, "Upserted vocabulary entry");
            entry_ids.push(entry_id);
        }

        let mut flashcards = 0;
        for (index, (word, entry_id)) in SEED_WORDS
            .iter()
            .zip(&entry_ids)
            .take(FLASHCARD_COUNT)
            .enumerate()
        {
            self.vocabulary_repo
                .upsert_flashcard(&FlashcardRecord {
                    id: Uuid::new_v4(),
                    user_id,
                    vocabulary_entry_id: *entry_id,
                    front: word.word.to_string(),
                    back: word.flashcard_back(),
                    next_review: now,
                    review_count: (index % 5) as u32,
                    difficulty: (index % 5 + 1) as u8,
                })
                .await?;
            flashcards += 1;
        }

        self.vocabulary_repo
            .save_study_session(&StudySessionRecord {
                id: Uuid::new_v5(&user_id, b"study-session"),
                user_id,
                start_time: now - Duration::hours(2),
                end_time: Some(now - Duration::hours(1)),
                cards_studied: 15,
                correct_answers: 12,
                total_questions: 15,
                session_type: "flashcards".to_string(),
            })
            .await?;

        self.vocabulary_repo
            .save_quiz_attempt(&QuizAttemptRecord {
                id: Uuid::new_v5(&user_id, b"quiz-attempt"),
                user_id,
                quiz_type: "vocabulary".to_string(),
                score: 8,
                total_questions: 10,
                time_spent_secs: 300,
                completed: true,
            })
            .await?;

        tracing::info!(
            vocabulary_entries = entry_ids.len(),
            flashcards = flashcards,
            "Vocabulary seeding complete"
        );

        Ok(SeedVocabularyResponse {
            user_id,
            vocabulary_entries: entry_ids.len(),
            flashcards,
        })
    }
}

fn vocabulary_entry(user_id: Uuid, index: usize, word: &SeedWord) -> VocabularyEntryRecord {
    VocabularyEntryRecord {
        id: Uuid::new_v4(),
        user_id,
        word: word.word.to_string(),
        language: word.language.to_string(),
        lemma: word.lemma.to_string(),
        part_of_speech: word.part_of_speech.to_string(),
        definitions: word.definitions.iter().map(|d| d.to_string()).collect(),
        context: word.context.to_string(),
        lookup_count: word.lookup_count,
        difficulty: word.difficulty.as_str().to_string(),
        last_looked_up: Utc::now() - Duration::days(index as i64 + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteVocabularyRepository,
    };

    async fn repository() -> Arc<SqliteVocabularyRepository> {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        Arc::new(SqliteVocabularyRepository::new(pool))
    }

    #[tokio::test]
    async fn test_seed_writes_demo_data() {
        let repo = repository().await;
        let handler = SeedVocabularyHandler::new(repo.clone());

        let response = handler.handle(SeedVocabulary::default()).await.unwrap();
        assert_eq!(response.vocabulary_entries, 10);
        assert_eq!(response.flashcards, 8);

        let entries = repo.find_vocabulary_by_user(response.user_id).await.unwrap();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries.iter().filter(|e| e.language == "grc").count(), 5);
        assert_eq!(entries.iter().filter(|e| e.language == "lat").count(), 5);

        let fides = entries.iter().find(|e| e.word == "fides").unwrap();
        assert_eq!(fides.definitions, vec!["faith", "trust", "loyalty", "credit"]);
        assert_eq!(fides.difficulty, "hard");
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repo = repository().await;
        let handler = SeedVocabularyHandler::new(repo.clone());

        let first = handler.handle(SeedVocabulary::default()).await.unwrap();
        let second = handler.handle(SeedVocabulary::default()).await.unwrap();

        assert_eq!(first.user_id, second.user_id);
        assert_eq!(repo.find_vocabulary_by_user(first.user_id).await.unwrap().len(), 10);
        assert_eq!(repo.count_flashcards(first.user_id).await.unwrap(), 8);
    }
}
