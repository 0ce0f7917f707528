//! Memory Layer - In-Memory Repositories
//!
//! 与 SQLite 实现语义一致的内存仓储，用于不依赖数据库的测试

mod corpus_repo;

pub use corpus_repo::{InMemoryCorpusRepository, RepositorySnapshot};
