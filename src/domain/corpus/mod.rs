//! Corpus Context - 语料库限界上下文
//!
//! 职责:
//! - 抽取结果聚合（书目信息 + 有序文本单元）
//! - 文本单元实体
//! - 运行汇总

mod aggregate;
mod entities;
mod summary;
mod value_objects;

pub use aggregate::{
    DocumentMetadata, ExtractionResult, UNKNOWN_AUTHOR, UNKNOWN_LANGUAGE, UNKNOWN_TITLE,
};
pub use entities::TextUnit;
pub use summary::{AuthorRef, AuthorSummary, CorpusSummary, WorkEntry};
pub use value_objects::{ArchiveId, UnitKind};
