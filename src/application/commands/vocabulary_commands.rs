//! Vocabulary Commands

use uuid::Uuid;

use crate::domain::vocabulary::{DEMO_USER_EMAIL, DEMO_USER_NAME};

/// 写入词汇演示数据命令
#[derive(Debug, Clone)]
pub struct SeedVocabulary {
    pub email: String,
    pub name: String,
}

impl Default for SeedVocabulary {
    fn default() -> Self {
        Self {
            email: DEMO_USER_EMAIL.to_string(),
            name: DEMO_USER_NAME.to_string(),
        }
    }
}

/// 种子数据写入结果
#[derive(Debug, Clone)]
pub struct SeedVocabularyResponse {
    pub user_id: Uuid,
    pub vocabulary_entries: usize,
    pub flashcards: usize,
}
