//! SQLite Persistence - SQLite 数据库持久化实现

mod corpus_repo;
mod database;
mod vocabulary_repo;

pub use corpus_repo::*;
pub use database::*;
pub use vocabulary_repo::*;
