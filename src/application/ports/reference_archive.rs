//! Reference Archive Port - 参考资料普查抽象
//!
//! 布局（相对参考资料根目录）:
//! - `xml/classics.xml` 书目目录（RDF）
//! - `xml/data/<language>.morph.xml` 形态分析
//! - `reading/static/xml/` 静态阅读文本

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::reference::{
    MorphologyLanguage, MorphologySummary, StaticTextFile, TextMetadataEntry,
};

/// 参考资料读取错误
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Malformed reference file: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Reference Archive Port
///
/// 文件或目录缺失不是错误：分别返回空列表或 `None`
#[async_trait]
pub trait ReferenceArchivePort: Send + Sync {
    /// 读取书目目录中的全部条目
    async fn read_text_metadata(&self) -> Result<Vec<TextMetadataEntry>, ReferenceError>;

    /// 统计一种语言的形态分析；文件缺失时返回 `None`
    async fn read_morphology(
        &self,
        language: MorphologyLanguage,
    ) -> Result<Option<MorphologySummary>, ReferenceError>;

    /// 列出静态阅读文本文件，按名称排序
    async fn list_static_texts(&self) -> Result<Vec<StaticTextFile>, ReferenceError>;
}
