//! Corpus Context - Aggregate Root

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{TextUnit, UnitKind};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// 单个源文档的书目信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    pub language: String,
    /// 相对语料库根目录的源文件路径
    pub file_path: PathBuf,
}

impl DocumentMetadata {
    /// 缺失字段使用默认占位值
    pub fn new(
        title: Option<String>,
        author: Option<String>,
        language: Option<String>,
        file_path: impl AsRef<Path>,
    ) -> Self {
        Self {
            title: title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            author: author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            language: language
                .filter(|lang| !lang.is_empty())
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
            file_path: file_path.as_ref().to_path_buf(),
        }
    }
}

/// 一个 (作品, 语言) 的抽取结果
///
/// 不变量:
/// - units 非空
/// - 顺序固定为 line → paragraph → division，各类内部保持文档顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    metadata: DocumentMetadata,
    units: Vec<TextUnit>,
}

impl ExtractionResult {
    /// 按固定顺序拼接三类单元；全部为空时返回 None
    ///
    /// 嵌套在 div 中的 l/p 会在 division 单元里再出现一次，这里不去重
    pub fn assemble(
        metadata: DocumentMetadata,
        lines: Vec<TextUnit>,
        paragraphs: Vec<TextUnit>,
        divisions: Vec<TextUnit>,
    ) -> Option<Self> {
        let mut units = lines;
        units.extend(paragraphs);
        units.extend(divisions);

        if units.is_empty() {
            return None;
        }

        Some(Self { metadata, units })
    }

    /// 从已持久化的单元序列恢复（不重新排序）
    pub fn from_units(metadata: DocumentMetadata, units: Vec<TextUnit>) -> Result<Self, &'static str> {
        if units.is_empty() {
            return Err("抽取结果不能为空");
        }
        Ok(Self { metadata, units })
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn author(&self) -> &str {
        &self.metadata.author
    }

    pub fn language(&self) -> &str {
        &self.metadata.language
    }

    pub fn file_path(&self) -> &Path {
        &self.metadata.file_path
    }

    pub fn units(&self) -> &[TextUnit] {
        &self.units
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn count_of(&self, kind: UnitKind) -> usize {
        self.units.iter().filter(|u| u.kind() == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(kind: UnitKind, text: &str) -> TextUnit {
        TextUnit::from_raw(kind, None, text).unwrap()
    }

    #[test]
    fn test_metadata_defaults() {
        let meta = DocumentMetadata::new(None, None, Some(String::new()), "a/b.xml");
        assert_eq!(meta.title, UNKNOWN_TITLE);
        assert_eq!(meta.author, UNKNOWN_AUTHOR);
        assert_eq!(meta.language, UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_assemble_orders_by_kind() {
        let meta = DocumentMetadata::new(None, None, None, "x.xml");
        let result = ExtractionResult::assemble(
            meta,
            vec![unit(UnitKind::Line, "l1")],
            vec![unit(UnitKind::Paragraph, "p1")],
            vec![unit(UnitKind::Division, "d1")],
        )
        .unwrap();

        let kinds: Vec<_> = result.units().iter().map(|u| u.kind()).collect();
        assert_eq!(kinds, vec![UnitKind::Line, UnitKind::Paragraph, UnitKind::Division]);
        assert_eq!(result.unit_count(), 3);
        assert_eq!(result.count_of(UnitKind::Paragraph), 1);
    }

    #[test]
    fn test_assemble_empty_is_none() {
        let meta = DocumentMetadata::new(None, None, None, "x.xml");
        assert!(ExtractionResult::assemble(meta, vec![], vec![], vec![]).is_none());
    }
}
