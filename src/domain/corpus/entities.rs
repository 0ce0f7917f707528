//! Corpus Context - Entities

use serde::{Deserialize, Serialize};

use super::UnitKind;
use crate::domain::text_normalizer::normalize;

/// 文本单元 - 抽取的最小内容块
///
/// 不变量:
/// - text 为规范化后的非空文本
/// - 只有 `line` 单元可以携带行号
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    kind: UnitKind,
    /// 原始行号（`<l n="...">`），缺失时为 None
    line: Option<String>,
    text: String,
}

impl TextUnit {
    pub fn new(kind: UnitKind, line: Option<String>, text: String) -> Result<Self, &'static str> {
        if text.is_empty() {
            return Err("文本单元内容不能为空");
        }
        if kind != UnitKind::Line && line.is_some() {
            return Err("只有诗行可以携带行号");
        }
        Ok(Self { kind, line, text })
    }

    /// 从原始文本构造：先规范化，规范化后为空则返回 None
    ///
    /// 空行号视为无行号
    pub fn from_raw(kind: UnitKind, line: Option<&str>, raw: &str) -> Option<Self> {
        let text = normalize(raw);
        if text.is_empty() {
            return None;
        }
        let line = match kind {
            UnitKind::Line => line.filter(|n| !n.is_empty()).map(str::to_string),
            _ => None,
        };
        Some(Self { kind, line, text })
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 持久化用的行键
    ///
    /// 有行号时使用行号，否则按单元在序列中的位置合成 `<kind>_<position>`（从 1 开始）
    pub fn storage_key(&self, index: usize) -> String {
        match &self.line {
            Some(n) => n.clone(),
            None => format!("{}_{}", self.kind.as_str(), index + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_normalizes() {
        let unit = TextUnit::from_raw(UnitKind::Line, Some("1"), "  line   one  ").unwrap();
        assert_eq!(unit.text(), "line one");
        assert_eq!(unit.line(), Some("1"));
    }

    #[test]
    fn test_from_raw_drops_whitespace_only() {
        assert!(TextUnit::from_raw(UnitKind::Line, Some("5"), " \n\t ").is_none());
    }

    #[test]
    fn test_empty_label_is_no_label() {
        let unit = TextUnit::from_raw(UnitKind::Line, Some(""), "text").unwrap();
        assert_eq!(unit.line(), None);
    }

    #[test]
    fn test_paragraph_never_labelled() {
        let unit = TextUnit::from_raw(UnitKind::Paragraph, Some("3"), "prose").unwrap();
        assert_eq!(unit.line(), None);
        assert!(TextUnit::new(UnitKind::Division, Some("1".into()), "x".into()).is_err());
    }

    #[test]
    fn test_storage_key() {
        let line = TextUnit::from_raw(UnitKind::Line, Some("12"), "a").unwrap();
        let para = TextUnit::from_raw(UnitKind::Paragraph, None, "b").unwrap();
        assert_eq!(line.storage_key(0), "12");
        assert_eq!(para.storage_key(4), "paragraph_5");
    }

    #[test]
    fn test_serialized_shape() {
        let unit = TextUnit::from_raw(UnitKind::Paragraph, None, "b").unwrap();
        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "paragraph", "line": null, "text": "b" })
        );
    }
}
