//! Document Extractor Port - 文档抽取抽象
//!
//! 定义 TEI 源文档 → 抽取结果的接口，具体实现在 infrastructure/adapters 层

use std::path::Path;
use thiserror::Error;

use crate::domain::corpus::ExtractionResult;

/// 文档抽取错误（仅影响单个文档）
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Malformed markup: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Document Extractor Port
///
/// 返回值约定:
/// - `Ok(Some(result))` - 至少一个非空文本单元
/// - `Ok(None)` - 文档合法但没有任何非空文本单元
/// - `Err(ExtractError)` - 文档无法解析或读取
pub trait DocumentExtractorPort: Send + Sync {
    /// 从内存中的文档文本抽取
    fn extract_document(
        &self,
        raw: &str,
        relative_path: &Path,
    ) -> Result<Option<ExtractionResult>, ExtractError>;

    /// 从文件抽取（实现可按文件大小选择解析方式）
    fn extract_file(
        &self,
        path: &Path,
        relative_path: &Path,
    ) -> Result<Option<ExtractionResult>, ExtractError>;
}
