//! Element Tree - 基于 quick-xml 事件构建的简单元素树

use quick_xml::Reader;

use super::markup::{drive, Attributes, MarkupSink};
use crate::application::ports::ExtractError;

/// 树节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// 元素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Attributes,
    children: Vec<Node>,
}

impl Element {
    fn new(name: &str, attributes: Attributes) -> Self {
        Self {
            name: name.to_string(),
            attributes,
            children: Vec::new(),
        }
    }

    /// 限定名（含前缀，如 `ti:title`）
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 所有后代文本按文档顺序直接拼接
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    /// 先序收集所有指定名称的元素（包含自身）
    fn collect_named<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        if self.name == name {
            out.push(self);
        }
        for child in &self.children {
            if let Node::Element(element) = child {
                element.collect_named(name, out);
            }
        }
    }

    /// 先序遍历中第一个指定名称的元素
    pub fn first_named(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Element(element) => element.first_named(name),
            Node::Text(_) => None,
        })
    }
}

/// 解析后的文档，按文档顺序保存全部顶层元素
///
/// TEI 文件只有一个根元素；片段可能有多个，查找时依次遍历
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// 跨所有顶层元素的先序遍历中第一个指定名称的元素
    pub fn first_named(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find_map(|element| element.first_named(name))
    }

    /// 跨所有顶层元素的先序遍历中所有指定名称的元素
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut out = Vec::new();
        for element in &self.elements {
            element.collect_named(name, &mut out);
        }
        out
    }
}

/// 构建元素树的 sink
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Element>,
    elements: Vec<Element>,
}

impl MarkupSink for TreeBuilder {
    fn open(&mut self, name: &str, attributes: Attributes) {
        self.stack.push(Element::new(name, attributes));
    }

    fn text(&mut self, text: &str) {
        let Some(current) = self.stack.last_mut() else {
            return;
        };
        // 相邻文本（如实体两侧、CDATA）合并为一个节点
        match current.children.last_mut() {
            Some(Node::Text(existing)) => existing.push_str(text),
            _ => current.children.push(Node::Text(text.to_string())),
        }
    }

    fn close(&mut self) {
        let Some(element) = self.stack.pop() else {
            return;
        };
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(Node::Element(element)),
            None => self.elements.push(element),
        }
    }
}

/// 解析完整文档
pub fn parse_document(raw: &str) -> Result<Document, ExtractError> {
    let mut builder = TreeBuilder::default();
    drive(Reader::from_str(raw), &mut builder)?;
    Ok(Document {
        elements: builder.elements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<TEI>
  <teiHeader><title>Outer <hi>bold</hi> title</title></teiHeader>
  <text xml:lang="lat">
    <div><l n="1">one</l><div><l n="2">two</l></div></div>
  </text>
</TEI>"#;

    #[test]
    fn test_text_content_concatenates_descendants() {
        let root = parse_document(DOC).unwrap();
        let title = root.first_named("title").unwrap();
        assert_eq!(title.text_content(), "Outer bold title");
    }

    #[test]
    fn test_descendants_in_preorder() {
        let root = parse_document(DOC).unwrap();

        let lines: Vec<_> = root
            .descendants_named("l")
            .iter()
            .map(|l| l.attribute("n").unwrap_or_default().to_string())
            .collect();
        assert_eq!(lines, vec!["1", "2"]);

        let divs = root.descendants_named("div");
        assert_eq!(divs.len(), 2);
        assert_eq!(divs[0].text_content(), "onetwo");
        assert_eq!(divs[1].text_content(), "two");
    }

    #[test]
    fn test_attribute_lookup_uses_qualified_name() {
        let root = parse_document(DOC).unwrap();
        let text = root.first_named("text").unwrap();
        assert_eq!(text.attribute("xml:lang"), Some("lat"));
        assert_eq!(text.attribute("lang"), None);
    }

    #[test]
    fn test_prefixed_names() {
        let root = parse_document(
            r#"<ti:textgroup xmlns:ti="http://chs.harvard.edu/xmlns/cts"><ti:groupname>Homer</ti:groupname></ti:textgroup>"#,
        )
        .unwrap();
        assert_eq!(root.elements().len(), 1);
        assert_eq!(root.elements()[0].name(), "ti:textgroup");
        assert_eq!(root.first_named("ti:groupname").unwrap().text_content(), "Homer");
        assert!(root.first_named("groupname").is_none());
    }

    #[test]
    fn test_lookup_spans_all_top_level_elements() {
        let doc = parse_document(
            r#"<title>Foo</title><author>Bar</author><text xml:lang="grc"><l n="1">  line   one  </l></text>"#,
        )
        .unwrap();

        assert_eq!(doc.elements().len(), 3);
        assert_eq!(doc.first_named("title").unwrap().text_content(), "Foo");
        assert_eq!(doc.first_named("author").unwrap().text_content(), "Bar");
        assert_eq!(doc.first_named("text").unwrap().attribute("xml:lang"), Some("grc"));

        let lines = doc.descendants_named("l");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text_content(), "  line   one  ");
    }

    #[test]
    fn test_malformed_is_error() {
        assert!(parse_document("<a><b></a>").is_err());
        assert!(parse_document("   ").is_err());
    }
}
