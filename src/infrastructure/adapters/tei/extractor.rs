//! TEI Document Extractor
//!
//! 小文档整体读入并构建元素树；超过阈值的文档走流式单遍收集

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use super::document::RawDocument;
use super::streaming;
use super::tree::parse_document;
use crate::application::ports::{DocumentExtractorPort, ExtractError};
use crate::domain::corpus::ExtractionResult;

/// 默认流式阈值: 64 MiB
pub const DEFAULT_STREAM_THRESHOLD_BYTES: u64 = 64 * 1024 * 1024;

/// 抽取器配置
#[derive(Debug, Clone)]
pub struct TeiExtractorConfig {
    /// 文件大小超过该值时使用流式解析
    pub stream_threshold_bytes: u64,
}

impl Default for TeiExtractorConfig {
    fn default() -> Self {
        Self {
            stream_threshold_bytes: DEFAULT_STREAM_THRESHOLD_BYTES,
        }
    }
}

/// TEI 文档抽取器
pub struct TeiDocumentExtractor {
    config: TeiExtractorConfig,
}

impl TeiDocumentExtractor {
    pub fn new(config: TeiExtractorConfig) -> Self {
        Self { config }
    }

    fn extract_streaming(
        &self,
        path: &Path,
        relative_path: &Path,
    ) -> Result<Option<ExtractionResult>, ExtractError> {
        let file = File::open(path).map_err(io_error)?;
        let raw = streaming::collect(BufReader::new(file))?;
        Ok(raw.into_result(relative_path))
    }
}

impl DocumentExtractorPort for TeiDocumentExtractor {
    fn extract_document(
        &self,
        raw: &str,
        relative_path: &Path,
    ) -> Result<Option<ExtractionResult>, ExtractError> {
        let root = parse_document(raw)?;
        Ok(RawDocument::from_tree(&root).into_result(relative_path))
    }

    fn extract_file(
        &self,
        path: &Path,
        relative_path: &Path,
    ) -> Result<Option<ExtractionResult>, ExtractError> {
        let size = std::fs::metadata(path).map_err(io_error)?.len();

        if size > self.config.stream_threshold_bytes {
            tracing::debug!(
                path = %relative_path.display(),
                size = size,
                "Using streaming extraction"
            );
            return self.extract_streaming(path, relative_path);
        }

        let raw = std::fs::read_to_string(path).map_err(io_error)?;
        self.extract_document(&raw, relative_path)
    }
}

/// 非 UTF-8 内容按标记错误处理，其余为 IO 错误
fn io_error(err: io::Error) -> ExtractError {
    match err.kind() {
        io::ErrorKind::InvalidData => ExtractError::Malformed(err.to_string()),
        _ => ExtractError::IoError(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::corpus::UnitKind;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn extractor() -> TeiDocumentExtractor {
        TeiDocumentExtractor::new(TeiExtractorConfig::default())
    }

    fn streaming_extractor() -> TeiDocumentExtractor {
        TeiDocumentExtractor::new(TeiExtractorConfig {
            stream_threshold_bytes: 0,
        })
    }

    const NESTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <teiHeader><fileDesc><titleStmt>
    <title>Hymns &amp; <hi>Odes</hi></title>
    <author>Pindar</author>
  </titleStmt></fileDesc></teiHeader>
  <text xml:lang="grc"><body>
    <div type="book" n="1">
      <p>Prose  before
         the verse.</p>
      <l n="1">ἄριστον μὲν ὕδωρ</l>
      <l n="">   </l>
      <div type="poem"><l n="2">ὁ δὲ χρυσὸς</l><p><![CDATA[cdata <text>]]></p></div>
    </div>
  </body></text>
</TEI>"#;

    #[test]
    fn test_minimal_document() {
        let raw = r#"<TEI><teiHeader><title>Foo</title><author>Bar</author></teiHeader><text xml:lang="grc"><body><l n="1">line one</l></body></text></TEI>"#;
        let result = extractor()
            .extract_document(raw, Path::new("tlg0001/tlg001/x.xml"))
            .unwrap()
            .unwrap();

        assert_eq!(result.title(), "Foo");
        assert_eq!(result.author(), "Bar");
        assert_eq!(result.language(), "grc");
        assert_eq!(result.file_path(), Path::new("tlg0001/tlg001/x.xml"));
        assert_eq!(result.unit_count(), 1);
        assert_eq!(result.units()[0].line(), Some("1"));
        assert_eq!(result.units()[0].text(), "line one");
    }

    const FRAGMENT: &str =
        r#"<title>Foo</title><author>Bar</author><text xml:lang="grc"><l n="1">  line   one  </l></text>"#;

    fn assert_foo_bar(result: &ExtractionResult) {
        assert_eq!(result.title(), "Foo");
        assert_eq!(result.author(), "Bar");
        assert_eq!(result.language(), "grc");
        assert_eq!(result.unit_count(), 1);
        assert_eq!(result.units()[0].kind(), UnitKind::Line);
        assert_eq!(result.units()[0].line(), Some("1"));
        assert_eq!(result.units()[0].text(), "line one");
    }

    #[test]
    fn test_fragment_without_wrapping_root() {
        let result = extractor()
            .extract_document(FRAGMENT, Path::new("x.xml"))
            .unwrap()
            .unwrap();
        assert_foo_bar(&result);
    }

    #[test]
    fn test_fragment_without_wrapping_root_streaming() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fragment.xml");
        std::fs::write(&path, FRAGMENT).unwrap();

        let result = streaming_extractor()
            .extract_file(&path, Path::new("fragment.xml"))
            .unwrap()
            .unwrap();
        assert_foo_bar(&result);
    }

    #[test]
    fn test_units_ordered_by_kind() {
        let raw = "<TEI><text><body><p>prose</p><l>verse</l><div>part</div></body></text></TEI>";
        let result = extractor().extract_document(raw, Path::new("x.xml")).unwrap().unwrap();

        let kinds: Vec<_> = result.units().iter().map(|u| u.kind()).collect();
        // body 不是 div，因此只有一个 division 单元
        assert_eq!(kinds, vec![UnitKind::Line, UnitKind::Paragraph, UnitKind::Division]);
        assert_eq!(result.title(), "Unknown Title");
        assert_eq!(result.author(), "Unknown Author");
        assert_eq!(result.language(), "unknown");
    }

    #[test]
    fn test_whitespace_only_line_dropped() {
        let raw = r#"<TEI><text xml:lang="lat"><l n="1">   </l><l n="2">arma virumque</l></text></TEI>"#;
        let result = extractor().extract_document(raw, Path::new("x.xml")).unwrap().unwrap();
        assert_eq!(result.unit_count(), 1);
        assert_eq!(result.units()[0].line(), Some("2"));
    }

    #[test]
    fn test_nested_content_is_duplicated() {
        let result = extractor().extract_document(NESTED, Path::new("x.xml")).unwrap().unwrap();

        assert_eq!(result.title(), "Hymns & Odes");
        assert_eq!(result.count_of(UnitKind::Line), 2);
        assert_eq!(result.count_of(UnitKind::Paragraph), 2);
        assert_eq!(result.count_of(UnitKind::Division), 2);

        let paragraph = &result.units()[2];
        assert_eq!(paragraph.text(), "Prose before\nthe verse.");

        let inner_div = result.units().last().unwrap();
        assert_eq!(inner_div.text(), "ὁ δὲ χρυσὸςcdata <text>");
    }

    #[test]
    fn test_empty_document_is_none() {
        let raw = "<TEI><text xml:lang=\"grc\"><l>  </l><p/></text></TEI>";
        assert!(extractor().extract_document(raw, Path::new("x.xml")).unwrap().is_none());
    }

    #[test]
    fn test_malformed_document_is_error() {
        let result = extractor().extract_document("<TEI><l>open</TEI>", Path::new("x.xml"));
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn test_streaming_matches_tree() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.xml");
        std::fs::write(&path, NESTED).unwrap();
        let relative = PathBuf::from("tlg0033/tlg001/doc.xml");

        let tree = extractor().extract_file(&path, &relative).unwrap();
        let streamed = streaming_extractor().extract_file(&path, &relative).unwrap();

        assert!(tree.is_some());
        assert_eq!(tree, streamed);
    }

    #[test]
    fn test_streaming_malformed_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.xml");
        std::fs::write(&path, "<TEI><text><l>x</text></TEI>").unwrap();

        let result = streaming_extractor().extract_file(&path, Path::new("bad.xml"));
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = extractor().extract_file(Path::new("/nonexistent/x.xml"), Path::new("x.xml"));
        assert!(matches!(result, Err(ExtractError::IoError(_))));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.xml");
        std::fs::write(&path, b"<TEI><l>caf\xe9</l></TEI>").unwrap();

        let result = extractor().extract_file(&path, Path::new("latin1.xml"));
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }
}
