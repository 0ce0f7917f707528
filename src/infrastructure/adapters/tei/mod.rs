//! TEI Adapter - TEI XML 源文档解析
//!
//! - markup: quick-xml 事件驱动与良构性检查
//! - tree: 元素树（小文档与 __cts__.xml）
//! - streaming: 单遍流式收集（大文档）

mod document;
mod extractor;
mod markup;
mod streaming;
mod tree;

pub use extractor::{TeiDocumentExtractor, TeiExtractorConfig, DEFAULT_STREAM_THRESHOLD_BYTES};
pub(crate) use markup::{drive, Attributes, MarkupSink};
pub use tree::{parse_document, Document, Element};
