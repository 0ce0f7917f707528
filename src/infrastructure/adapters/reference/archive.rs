//! Filesystem Reference Archive
//!
//! 实现 ReferenceArchivePort trait，目录布局:
//!
//! ```text
//! <root>/
//!   xml/classics.xml                书目目录（rdf:Description 记录）
//!   xml/data/greek.morph.xml        形态分析（analysis 记录）
//!   xml/data/latin.morph.xml
//!   reading/static/xml/*.xml        静态阅读文本
//! ```

use async_trait::async_trait;
use quick_xml::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::records::{Record, RecordCollector};
use crate::application::ports::{ExtractError, ReferenceArchivePort, ReferenceError};
use crate::domain::reference::{
    MorphologyAnalysis, MorphologyLanguage, MorphologySummary, StaticTextFile, TextMetadataEntry,
};
use crate::infrastructure::adapters::tei::drive;

const CATALOG_FILE: &str = "xml/classics.xml";
const MORPHOLOGY_DIR: &str = "xml/data";
const STATIC_TEXTS_DIR: &str = "reading/static/xml";

const CATALOG_RECORD: &str = "rdf:Description";
const CATALOG_FIELDS: &[&str] = &["dc:title", "dc:creator", "dc:language"];

const MORPHOLOGY_RECORD: &str = "analysis";
const MORPHOLOGY_FIELDS: &[&str] = &["form", "lemma", "pos", "number", "gender", "case"];

/// 文件系统参考资料
pub struct FsReferenceArchive {
    root: PathBuf,
}

impl FsReferenceArchive {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ReferenceArchivePort for FsReferenceArchive {
    async fn read_text_metadata(&self) -> Result<Vec<TextMetadataEntry>, ReferenceError> {
        let path = self.root.join(CATALOG_FILE);
        if !is_file(&path).await {
            tracing::warn!(path = %path.display(), "Text catalog not found");
            return Ok(Vec::new());
        }

        let entries = run_blocking(move || parse_catalog(&path)).await?;
        tracing::info!(entries = entries.len(), "Parsed text catalog");
        Ok(entries)
    }

    async fn read_morphology(
        &self,
        language: MorphologyLanguage,
    ) -> Result<Option<MorphologySummary>, ReferenceError> {
        let path = self.root.join(MORPHOLOGY_DIR).join(language.file_name());
        if !is_file(&path).await {
            tracing::debug!(path = %path.display(), "Morphology file not found");
            return Ok(None);
        }

        let summary = run_blocking(move || parse_morphology(&path)).await?;
        tracing::info!(
            language = language.as_str(),
            count = summary.count,
            "Counted morphological entries"
        );
        Ok(Some(summary))
    }

    async fn list_static_texts(&self) -> Result<Vec<StaticTextFile>, ReferenceError> {
        let dir = self.root.join(STATIC_TEXTS_DIR);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&dir, e)),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(&dir, e))? {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !is_static_text(&name) {
                continue;
            }

            let path = entry.path();
            let metadata = fs::metadata(&path).await.map_err(|e| io_error(&path, e))?;
            if !metadata.is_file() {
                continue;
            }

            files.push(StaticTextFile {
                name,
                size: metadata.len(),
                path,
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }
}

/// 静态文本: `.xml` 结尾，地名索引文件除外
fn is_static_text(file_name: &str) -> bool {
    file_name.ends_with(".xml") && !file_name.contains("places")
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_file())
}

/// 在阻塞线程池中解析大文件
async fn run_blocking<T, F>(parse: F) -> Result<T, ReferenceError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ReferenceError> + Send + 'static,
{
    tokio::task::spawn_blocking(parse)
        .await
        .map_err(|e| ReferenceError::IoError(format!("Parse task failed: {}", e)))?
}

fn open_reader(path: &Path) -> Result<Reader<BufReader<File>>, ReferenceError> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    Ok(Reader::from_reader(BufReader::new(file)))
}

fn parse_catalog(path: &Path) -> Result<Vec<TextMetadataEntry>, ReferenceError> {
    let mut entries = Vec::new();
    let mut collector = RecordCollector::new(CATALOG_RECORD, CATALOG_FIELDS, |record: Record| {
        let entry = TextMetadataEntry::new(
            record.attribute("rdf:about"),
            record.field("dc:title"),
            record.field("dc:creator"),
            record.field("dc:language"),
        );
        if let Some(entry) = entry {
            entries.push(entry);
        }
    });

    drive(open_reader(path)?, &mut collector).map_err(|e| markup_error(path, e))?;
    Ok(entries)
}

fn parse_morphology(path: &Path) -> Result<MorphologySummary, ReferenceError> {
    let mut summary = MorphologySummary::default();
    let mut collector = RecordCollector::new(MORPHOLOGY_RECORD, MORPHOLOGY_FIELDS, |record: Record| {
        let field = |name: &str| record.field(name).unwrap_or_default();
        summary.record(MorphologyAnalysis {
            form: field("form"),
            lemma: field("lemma"),
            pos: field("pos"),
            number: field("number"),
            gender: field("gender"),
            case: field("case"),
        });
    });

    drive(open_reader(path)?, &mut collector).map_err(|e| markup_error(path, e))?;
    Ok(summary)
}

fn io_error(path: &Path, err: std::io::Error) -> ReferenceError {
    ReferenceError::IoError(format!("{}: {}", path.display(), err))
}

fn markup_error(path: &Path, err: ExtractError) -> ReferenceError {
    match err {
        ExtractError::Malformed(msg) => ReferenceError::Malformed(format!("{}: {}", path.display(), msg)),
        ExtractError::IoError(msg) => ReferenceError::IoError(format!("{}: {}", path.display(), msg)),
    }
}
