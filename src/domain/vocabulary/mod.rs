//! Vocabulary Context - 词汇学习上下文
//!
//! 演示用户、词汇条目与闪卡的种子数据

mod seed;

pub use seed::{
    SeedWord, WordDifficulty, DEMO_USER_EMAIL, DEMO_USER_NAME, FLASHCARD_COUNT, SEED_WORDS,
};
