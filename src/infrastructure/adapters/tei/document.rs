//! Raw TEI Document - 解析器输出的未规范化内容

use std::path::Path;

use super::tree::{Document, Element};
use crate::domain::corpus::{DocumentMetadata, ExtractionResult, TextUnit, UnitKind};
use crate::domain::normalize;

/// 从 TEI 文档中收集到的原始内容
///
/// 树解析与流式解析都产出这一结构，后续组装逻辑只有一份
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// 第一个 `title` 元素的文本
    pub title: Option<String>,
    /// 第一个 `author` 元素的文本
    pub author: Option<String>,
    /// 第一个 `text` 元素的 `xml:lang`
    pub language: Option<String>,
    /// `l` 元素: (n 属性, 文本)
    pub lines: Vec<(Option<String>, String)>,
    pub paragraphs: Vec<String>,
    pub divisions: Vec<String>,
}

impl RawDocument {
    /// 从元素树收集
    pub fn from_tree(root: &Document) -> Self {
        Self {
            title: root.first_named("title").map(Element::text_content),
            author: root.first_named("author").map(Element::text_content),
            language: root
                .first_named("text")
                .and_then(|text| text.attribute("xml:lang"))
                .map(str::to_string),
            lines: root
                .descendants_named(UnitKind::Line.element_name())
                .into_iter()
                .map(|l| (l.attribute("n").map(str::to_string), l.text_content()))
                .collect(),
            paragraphs: texts_of(root, UnitKind::Paragraph),
            divisions: texts_of(root, UnitKind::Division),
        }
    }

    /// 规范化并组装为抽取结果；没有任何非空单元时返回 None
    pub fn into_result(self, relative_path: &Path) -> Option<ExtractionResult> {
        let metadata = DocumentMetadata::new(
            non_empty(self.title),
            non_empty(self.author),
            self.language,
            relative_path,
        );

        let lines = self
            .lines
            .iter()
            .filter_map(|(n, raw)| TextUnit::from_raw(UnitKind::Line, n.as_deref(), raw))
            .collect();
        let paragraphs = units_of(UnitKind::Paragraph, &self.paragraphs);
        let divisions = units_of(UnitKind::Division, &self.divisions);

        ExtractionResult::assemble(metadata, lines, paragraphs, divisions)
    }
}

fn texts_of(root: &Document, kind: UnitKind) -> Vec<String> {
    root.descendants_named(kind.element_name())
        .into_iter()
        .map(Element::text_content)
        .collect()
}

fn units_of(kind: UnitKind, raw: &[String]) -> Vec<TextUnit> {
    raw.iter()
        .filter_map(|text| TextUnit::from_raw(kind, None, text))
        .collect()
}

/// 标题与作者同样做空白规范化，空结果视为缺失
fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| normalize(&v)).filter(|v| !v.is_empty())
}
