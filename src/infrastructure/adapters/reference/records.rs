//! Record Collector - 单遍收集记录元素及其字段文本
//!
//! 书目目录与形态分析文件结构相同：大量同名记录元素，每条含若干字段子元素。
//! 记录闭合时立即交给回调，内存占用与文件大小无关

use crate::domain::normalize;
use crate::infrastructure::adapters::tei::{Attributes, MarkupSink};

/// 一条记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    attributes: Attributes,
    fields: &'static [&'static str],
    values: Vec<Option<String>>,
}

impl Record {
    fn new(attributes: Attributes, fields: &'static [&'static str]) -> Self {
        Self {
            attributes,
            fields,
            values: vec![None; fields.len()],
        }
    }

    /// 记录元素上的属性，首尾空白已去除
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
    }

    /// 字段首次出现时的文本（已规范化）；未出现为 None
    pub fn field(&self, name: &str) -> Option<String> {
        let index = self.fields.iter().position(|f| *f == name)?;
        self.values[index].as_deref().map(normalize)
    }
}

/// 记录收集 sink
///
/// 字段可以出现在记录内任意深度，同名字段只取第一次出现；字段内的子元素文本一并收集
pub struct RecordCollector<F: FnMut(Record)> {
    record: &'static str,
    fields: &'static [&'static str],
    on_record: F,
    depth: usize,
    /// 打开中的记录及其深度
    current: Option<(Record, usize)>,
    /// 打开中的字段: (字段下标, 深度)
    field: Option<(usize, usize)>,
}

impl<F: FnMut(Record)> RecordCollector<F> {
    pub fn new(record: &'static str, fields: &'static [&'static str], on_record: F) -> Self {
        Self {
            record,
            fields,
            on_record,
            depth: 0,
            current: None,
            field: None,
        }
    }
}

impl<F: FnMut(Record)> MarkupSink for RecordCollector<F> {
    fn open(&mut self, name: &str, attributes: Attributes) {
        self.depth += 1;

        if self.current.is_none() {
            if name == self.record {
                self.current = Some((Record::new(attributes, self.fields), self.depth));
            }
            return;
        }
        if self.field.is_some() {
            return;
        }

        let Some(index) = self.fields.iter().position(|f| *f == name) else {
            return;
        };
        if let Some((record, _)) = self.current.as_mut() {
            if record.values[index].is_none() {
                record.values[index] = Some(String::new());
                self.field = Some((index, self.depth));
            }
        }
    }

    fn text(&mut self, text: &str) {
        if let (Some((record, _)), Some((index, _))) = (self.current.as_mut(), self.field) {
            if let Some(value) = record.values[index].as_mut() {
                value.push_str(text);
            }
        }
    }

    fn close(&mut self) {
        if self.field.is_some_and(|(_, depth)| depth == self.depth) {
            self.field = None;
        }
        if self.current.as_ref().is_some_and(|(_, depth)| *depth == self.depth) {
            if let Some((record, _)) = self.current.take() {
                (self.on_record)(record);
            }
        }
        self.depth = self.depth.saturating_sub(1);
    }
}
