//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod artifact_storage;
mod corpus_source;
mod document_extractor;
mod reference_archive;
mod repositories;

pub use artifact_storage::{artifact_file_name, ArtifactError, ArtifactStoragePort};
pub use corpus_source::{AuthorSource, CorpusError, CorpusSourcePort, DocumentSource, WorkSource};
pub use document_extractor::{DocumentExtractorPort, ExtractError};
pub use reference_archive::{ReferenceArchivePort, ReferenceError};
pub use repositories::{
    AuthorRecord, CorpusRepositoryPort, FlashcardRecord, QuizAttemptRecord, RepositoryError,
    StudySessionRecord, TextRecord, UserRecord, VocabularyEntryRecord, VocabularyRepositoryPort,
    WorkRecord,
};
