//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::ports::{ArtifactError, CorpusError, RepositoryError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 语料库不可用（根目录缺失等）
    #[error("Corpus error: {0}")]
    CorpusError(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 产物存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<ArtifactError> for ApplicationError {
    fn from(err: ArtifactError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<CorpusError> for ApplicationError {
    fn from(err: CorpusError) -> Self {
        Self::CorpusError(err.to_string())
    }
}
