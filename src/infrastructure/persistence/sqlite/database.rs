//! SQLite Database - 数据库连接和迁移

use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库连接 URL
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/helios.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite:{}?mode=rwc", path.as_ref().display()),
            max_connections: 5,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    // 启用 WAL 模式，允许并发读写
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await?;

    // 设置 busy_timeout=5000ms，遇到锁时等待而不是立即失败
    sqlx::query("PRAGMA busy_timeout=5000")
        .execute(&pool)
        .await?;

    // 设置同步模式为 NORMAL
    sqlx::query("PRAGMA synchronous=NORMAL")
        .execute(&pool)
        .await?;

    tracing::info!("SQLite pool created with WAL mode and busy_timeout=5000ms");

    Ok(pool)
}

/// 建表语句，按依赖顺序执行
const MIGRATIONS: &[&str] = &[
    // 语料库
    r#"
    CREATE TABLE IF NOT EXISTS authors (
        id TEXT PRIMARY KEY,
        tlg_id TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        full_name TEXT NOT NULL,
        period TEXT NOT NULL,
        genre TEXT NOT NULL,
        nationality TEXT NOT NULL,
        biography TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS works (
        id TEXT PRIMARY KEY,
        author_id TEXT NOT NULL,
        tlg_id TEXT NOT NULL,
        title TEXT NOT NULL,
        genre TEXT NOT NULL,
        language TEXT NOT NULL,
        line_count INTEGER NOT NULL DEFAULT 0,
        is_complete INTEGER NOT NULL DEFAULT 0,
        FOREIGN KEY (author_id) REFERENCES authors(id) ON DELETE CASCADE,
        UNIQUE (author_id, tlg_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS texts (
        id TEXT PRIMARY KEY,
        work_id TEXT NOT NULL,
        language TEXT NOT NULL,
        content_type TEXT NOT NULL,
        line_number TEXT NOT NULL,
        content TEXT NOT NULL,
        FOREIGN KEY (work_id) REFERENCES works(id) ON DELETE CASCADE,
        UNIQUE (work_id, language, line_number)
    )
    "#,
    // 词汇学习
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vocabulary_entries (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        word TEXT NOT NULL,
        language TEXT NOT NULL,
        lemma TEXT NOT NULL,
        part_of_speech TEXT NOT NULL,
        definitions TEXT NOT NULL,
        context TEXT NOT NULL,
        lookup_count INTEGER NOT NULL DEFAULT 0,
        difficulty TEXT NOT NULL,
        last_looked_up TEXT NOT NULL,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
        UNIQUE (user_id, word, language)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS flashcards (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        vocabulary_entry_id TEXT NOT NULL,
        front TEXT NOT NULL,
        back TEXT NOT NULL,
        next_review TEXT NOT NULL,
        review_count INTEGER NOT NULL DEFAULT 0,
        difficulty INTEGER NOT NULL DEFAULT 1,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
        FOREIGN KEY (vocabulary_entry_id) REFERENCES vocabulary_entries(id) ON DELETE CASCADE,
        UNIQUE (user_id, vocabulary_entry_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS study_sessions (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT,
        cards_studied INTEGER NOT NULL DEFAULT 0,
        correct_answers INTEGER NOT NULL DEFAULT 0,
        total_questions INTEGER NOT NULL DEFAULT 0,
        session_type TEXT NOT NULL,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS quiz_attempts (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        quiz_type TEXT NOT NULL,
        score INTEGER NOT NULL,
        total_questions INTEGER NOT NULL,
        time_spent_secs INTEGER NOT NULL,
        completed INTEGER NOT NULL DEFAULT 0,
        FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
    )
    "#,
    // 索引
    "CREATE INDEX IF NOT EXISTS idx_works_author_id ON works(author_id)",
    "CREATE INDEX IF NOT EXISTS idx_texts_work_language ON texts(work_id, language)",
    "CREATE INDEX IF NOT EXISTS idx_vocabulary_entries_user_id ON vocabulary_entries(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_flashcards_user_id ON flashcards(user_id)",
];

/// 打开数据库文件：确保所在目录存在，建立连接池并执行迁移
pub async fn open_database(path: impl AsRef<Path>, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let config = DatabaseConfig {
        max_connections,
        ..DatabaseConfig::new(path)
    };
    let pool = create_pool(&config).await?;
    run_migrations(&pool).await?;

    tracing::info!(path = %path.display(), "Database opened");
    Ok(pool)
}

/// 运行数据库迁移（可重复执行）
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    for statement in MIGRATIONS {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!(statements = MIGRATIONS.len(), "Database migrations completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_in_memory_db() {
        let config = DatabaseConfig::in_memory();
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();

        for table in [
            "authors",
            "flashcards",
            "quiz_attempts",
            "study_sessions",
            "texts",
            "users",
            "vocabulary_entries",
            "works",
        ] {
            assert!(names.contains(&table), "missing table {}", table);
        }
    }

    #[tokio::test]
    async fn test_open_database_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/helios.db");

        let pool = open_database(&path, 2).await.unwrap();
        assert!(path.exists());

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'texts'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 1);
        pool.close().await;

        // 再次打开同一文件不会失败
        let pool = open_database(&path, 1).await.unwrap();
        pool.close().await;
    }

    #[test]
    fn test_file_url() {
        let config = DatabaseConfig::new("data/helios.db");
        assert_eq!(config.database_url, "sqlite:data/helios.db?mode=rwc");
    }
}
