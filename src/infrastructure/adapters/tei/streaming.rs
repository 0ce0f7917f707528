//! Streaming Collector - 单遍事件收集，不构建元素树
//!
//! 用于超过阈值的大文档，输出与树解析逐字段一致

use quick_xml::Reader;
use std::io::BufRead;

use super::document::RawDocument;
use super::markup::{drive, Attributes, MarkupSink};
use crate::application::ports::ExtractError;

/// 正在收集文本的目标
#[derive(Debug, Clone, Copy)]
enum Target {
    Title,
    Author,
    Line(usize),
    Paragraph(usize),
    Division(usize),
}

/// 打开中的收集目标及其所在深度
#[derive(Debug)]
struct Capture {
    target: Target,
    depth: usize,
}

#[derive(Default)]
struct StreamingCollector {
    depth: usize,
    seen_text_element: bool,
    open: Vec<Capture>,
    document: RawDocument,
}

impl StreamingCollector {
    fn capture(&mut self, target: Target) {
        self.open.push(Capture {
            target,
            depth: self.depth,
        });
    }

    fn slot(&mut self, target: Target) -> Option<&mut String> {
        let doc = &mut self.document;
        match target {
            Target::Title => doc.title.as_mut(),
            Target::Author => doc.author.as_mut(),
            Target::Line(i) => doc.lines.get_mut(i).map(|(_, text)| text),
            Target::Paragraph(i) => doc.paragraphs.get_mut(i),
            Target::Division(i) => doc.divisions.get_mut(i),
        }
    }
}

impl MarkupSink for StreamingCollector {
    fn open(&mut self, name: &str, attributes: Attributes) {
        self.depth += 1;

        let attribute = |key: &str| {
            attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        match name {
            "title" if self.document.title.is_none() => {
                self.document.title = Some(String::new());
                self.capture(Target::Title);
            }
            "author" if self.document.author.is_none() => {
                self.document.author = Some(String::new());
                self.capture(Target::Author);
            }
            "text" if !self.seen_text_element => {
                self.seen_text_element = true;
                self.document.language = attribute("xml:lang");
            }
            "l" => {
                let n = attribute("n");
                self.document.lines.push((n, String::new()));
                self.capture(Target::Line(self.document.lines.len() - 1));
            }
            "p" => {
                self.document.paragraphs.push(String::new());
                self.capture(Target::Paragraph(self.document.paragraphs.len() - 1));
            }
            "div" => {
                self.document.divisions.push(String::new());
                self.capture(Target::Division(self.document.divisions.len() - 1));
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        // 文本属于所有打开中的目标（嵌套单元因此重复包含内层文本）
        let targets: Vec<Target> = self.open.iter().map(|c| c.target).collect();
        for target in targets {
            if let Some(slot) = self.slot(target) {
                slot.push_str(text);
            }
        }
    }

    fn close(&mut self) {
        while self.open.last().is_some_and(|c| c.depth == self.depth) {
            self.open.pop();
        }
        self.depth = self.depth.saturating_sub(1);
    }
}

/// 单遍读取文档并收集原始内容
pub fn collect<R: BufRead>(reader: R) -> Result<RawDocument, ExtractError> {
    let mut collector = StreamingCollector::default();
    drive(Reader::from_reader(reader), &mut collector)?;
    Ok(collector.document)
}
