//! Corpus Context - Value Objects

use serde::{Deserialize, Serialize};

/// 文本单元类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// `<l>` 诗行
    Line,
    /// `<p>` 段落
    Paragraph,
    /// `<div>` 分部
    Division,
}

impl UnitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Line => "line",
            UnitKind::Paragraph => "paragraph",
            UnitKind::Division => "division",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "line" => Some(UnitKind::Line),
            "paragraph" => Some(UnitKind::Paragraph),
            "division" => Some(UnitKind::Division),
            _ => None,
        }
    }

    /// 对应的 TEI 元素名
    pub fn element_name(&self) -> &'static str {
        match self {
            UnitKind::Line => "l",
            UnitKind::Paragraph => "p",
            UnitKind::Division => "div",
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 语料库归档标识（作者 `tlg0012`、作品 `tlg001` 等）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchiveId(String);

impl ArchiveId {
    pub fn new(id: impl Into<String>) -> Result<Self, &'static str> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("归档标识不能为空");
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArchiveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
