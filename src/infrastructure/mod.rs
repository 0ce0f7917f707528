//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod memory;
pub mod persistence;
pub mod telemetry;

pub use adapters::{FsCorpusWalker, JsonArtifactStorage, TeiDocumentExtractor, TeiExtractorConfig};
pub use memory::InMemoryCorpusRepository;
pub use persistence::{SqliteCorpusRepository, SqliteVocabularyRepository};
