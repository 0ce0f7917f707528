//! Corpus Source Port - 语料库遍历抽象
//!
//! 目录布局: `<root>/<author>/<work>/<document>.xml`

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::corpus::ArchiveId;

/// 语料库遍历错误
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Corpus root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 作者目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSource {
    pub id: ArchiveId,
    /// 来自 __cts__.xml 的显示名，缺失时为占位名
    pub name: String,
    pub path: PathBuf,
}

/// 作品目录及其源文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSource {
    pub id: ArchiveId,
    /// 来自 __cts__.xml 的标题，缺失时为占位名
    pub title: String,
    pub path: PathBuf,
    pub documents: Vec<DocumentSource>,
}

/// 单个源文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    pub path: PathBuf,
    /// 相对语料库根目录的路径
    pub relative_path: PathBuf,
}

/// Corpus Source Port
#[async_trait]
pub trait CorpusSourcePort: Send + Sync {
    /// 列出所有作者目录（按名称排序）
    ///
    /// 根目录不存在时返回 `CorpusError::RootNotFound`
    async fn list_authors(&self) -> Result<Vec<AuthorSource>, CorpusError>;

    /// 列出作者下的所有作品目录及源文档（按名称排序）
    async fn list_works(&self, author: &AuthorSource) -> Result<Vec<WorkSource>, CorpusError>;
}
