//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（CorpusSource、DocumentExtractor、ReferenceArchive、ArtifactStorage、Repository）
//! - commands: 抽取、导入、参考资料普查、演示数据写入命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    ExtractCorpus,
    ExtractCorpusResponse,
    ImportCorpus,
    ImportCorpusResponse,
    SeedVocabulary,
    SeedVocabularyResponse,
    SurveyArchive,
    SurveyArchiveResponse,
    // Handlers
    handlers::{
        ExtractCorpusHandler, ImportCorpusHandler, SeedVocabularyHandler, SurveyArchiveHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Corpus source
    AuthorSource,
    CorpusError,
    CorpusSourcePort,
    DocumentSource,
    WorkSource,
    // Document extractor
    DocumentExtractorPort,
    ExtractError,
    // Reference archive
    ReferenceArchivePort,
    ReferenceError,
    // Artifact storage
    ArtifactError,
    ArtifactStoragePort,
    // Repositories
    AuthorRecord,
    CorpusRepositoryPort,
    RepositoryError,
    TextRecord,
    VocabularyRepositoryPort,
    WorkRecord,
};
