//! Vocabulary Context - 演示数据

/// 演示用户
pub const DEMO_USER_EMAIL: &str = "demo@helios.edu";
pub const DEMO_USER_NAME: &str = "Demo Student";

/// 生成闪卡的词条数（取词表前 N 个）
pub const FLASHCARD_COUNT: usize = 8;

/// 词汇难度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordDifficulty {
    Easy,
    Medium,
    Hard,
}

impl WordDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordDifficulty::Easy => "easy",
            WordDifficulty::Medium => "medium",
            WordDifficulty::Hard => "hard",
        }
    }
}

/// 词汇种子条目
#[derive(Debug, Clone, Copy)]
pub struct SeedWord {
    pub word: &'static str,
    pub language: &'static str,
    pub lemma: &'static str,
    pub part_of_speech: &'static str,
    pub definitions: &'static [&'static str],
    pub context: &'static str,
    pub lookup_count: u32,
    pub difficulty: WordDifficulty,
}

impl SeedWord {
    /// 闪卡背面：释义以 "; " 连接
    pub fn flashcard_back(&self) -> String {
        self.definitions.join("; ")
    }
}

pub const SEED_WORDS: &[SeedWord] = &[
    SeedWord {
        word: "ἀγαθός",
        language: "grc",
        lemma: "ἀγαθός",
        part_of_speech: "adjective",
        definitions: &["good", "noble", "brave"],
        context: "Homer, Iliad 1.131",
        lookup_count: 3,
        difficulty: WordDifficulty::Medium,
    },
    SeedWord {
        word: "φιλία",
        language: "grc",
        lemma: "φιλία",
        part_of_speech: "noun",
        definitions: &["friendship", "love", "affection"],
        context: "Plato, Symposium 180c",
        lookup_count: 5,
        difficulty: WordDifficulty::Easy,
    },
    SeedWord {
        word: "σοφία",
        language: "grc",
        lemma: "σοφία",
        part_of_speech: "noun",
        definitions: &["wisdom", "knowledge", "skill"],
        context: "Plato, Republic 428b",
        lookup_count: 2,
        difficulty: WordDifficulty::Easy,
    },
    SeedWord {
        word: "ἀρετή",
        language: "grc",
        lemma: "ἀρετή",
        part_of_speech: "noun",
        definitions: &["excellence", "virtue", "courage"],
        context: "Aristotle, Nicomachean Ethics 1103a",
        lookup_count: 4,
        difficulty: WordDifficulty::Medium,
    },
    SeedWord {
        word: "λόγος",
        language: "grc",
        lemma: "λόγος",
        part_of_speech: "noun",
        definitions: &["word", "speech", "reason", "account"],
        context: "Heraclitus, Fragment 1",
        lookup_count: 7,
        difficulty: WordDifficulty::Hard,
    },
    SeedWord {
        word: "amor",
        language: "lat",
        lemma: "amor",
        part_of_speech: "noun",
        definitions: &["love", "passion", "affection"],
        context: "Vergil, Aeneid 4.412",
        lookup_count: 6,
        difficulty: WordDifficulty::Easy,
    },
    SeedWord {
        word: "virtus",
        language: "lat",
        lemma: "virtus",
        part_of_speech: "noun",
        definitions: &["virtue", "courage", "excellence"],
        context: "Cicero, De Officiis 1.18",
        lookup_count: 3,
        difficulty: WordDifficulty::Medium,
    },
    SeedWord {
        word: "sapientia",
        language: "lat",
        lemma: "sapientia",
        part_of_speech: "noun",
        definitions: &["wisdom", "knowledge", "understanding"],
        context: "Seneca, Epistulae Morales 89.4",
        lookup_count: 2,
        difficulty: WordDifficulty::Medium,
    },
    SeedWord {
        word: "pax",
        language: "lat",
        lemma: "pax",
        part_of_speech: "noun",
        definitions: &["peace", "tranquility", "harmony"],
        context: "Vergil, Aeneid 6.852",
        lookup_count: 4,
        difficulty: WordDifficulty::Easy,
    },
    SeedWord {
        word: "fides",
        language: "lat",
        lemma: "fides",
        part_of_speech: "noun",
        definitions: &["faith", "trust", "loyalty", "credit"],
        context: "Cicero, De Officiis 1.23",
        lookup_count: 5,
        difficulty: WordDifficulty::Hard,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_words_split_by_language() {
        assert_eq!(SEED_WORDS.iter().filter(|w| w.language == "grc").count(), 5);
        assert_eq!(SEED_WORDS.iter().filter(|w| w.language == "lat").count(), 5);
        assert!(FLASHCARD_COUNT <= SEED_WORDS.len());
    }

    #[test]
    fn test_flashcard_back() {
        assert_eq!(SEED_WORDS[0].flashcard_back(), "good; noble; brave");
    }
}
