//! Filesystem Corpus Walker
//!
//! 实现 CorpusSourcePort trait，目录布局:
//!
//! ```text
//! <root>/
//!   tlg0012/
//!     __cts__.xml              作者显示名
//!     tlg001/
//!       __cts__.xml            作品标题
//!       tlg0012.tlg001.perseus-grc2.xml
//! ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{
    AuthorSource, CorpusError, CorpusSourcePort, DocumentSource, WorkSource,
};
use crate::domain::corpus::ArchiveId;
use crate::domain::normalize;
use crate::infrastructure::adapters::tei::parse_document;

const CTS_FILE_NAME: &str = "__cts__.xml";
const AUTHOR_DIR_PREFIX: &str = "tlg";
const DOCUMENT_MARKER: &str = "perseus-";

pub const UNKNOWN_AUTHOR_NAME: &str = "Unknown Author";
pub const UNKNOWN_WORK_TITLE: &str = "Unknown Work";

/// 文件系统语料库遍历
pub struct FsCorpusWalker {
    root: PathBuf,
}

impl FsCorpusWalker {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// 作品目录下的源文档，路径相对语料库根目录
    async fn list_documents(&self, work_dir: &Path) -> Result<Vec<DocumentSource>, CorpusError> {
        let documents = list_entries(work_dir, false)
            .await?
            .into_iter()
            .filter(|(file_name, _)| is_source_document(file_name))
            .map(|(_, doc_path)| DocumentSource {
                relative_path: doc_path
                    .strip_prefix(&self.root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| doc_path.clone()),
                path: doc_path,
            })
            .collect();

        Ok(documents)
    }
}

#[async_trait]
impl CorpusSourcePort for FsCorpusWalker {
    async fn list_authors(&self) -> Result<Vec<AuthorSource>, CorpusError> {
        if !fs::metadata(&self.root).await.is_ok_and(|m| m.is_dir()) {
            return Err(CorpusError::RootNotFound(self.root.clone()));
        }

        let mut authors = Vec::new();
        for (name, path) in list_entries(&self.root, true).await? {
            if !name.starts_with(AUTHOR_DIR_PREFIX) {
                continue;
            }
            let Ok(id) = ArchiveId::new(name.as_str()) else {
                continue;
            };

            let name = read_cts_name(&path, &["ti:groupname", "ti:title"])
                .await
                .unwrap_or_else(|| UNKNOWN_AUTHOR_NAME.to_string());

            authors.push(AuthorSource { id, name, path });
        }

        Ok(authors)
    }

    async fn list_works(&self, author: &AuthorSource) -> Result<Vec<WorkSource>, CorpusError> {
        let mut works = Vec::new();

        for (name, path) in list_entries(&author.path, true).await? {
            if name == "__cts__" {
                continue;
            }
            let Ok(id) = ArchiveId::new(name.as_str()) else {
                continue;
            };

            let title = read_cts_name(&path, &["ti:title"])
                .await
                .unwrap_or_else(|| UNKNOWN_WORK_TITLE.to_string());

            // 单个作品目录不可读只跳过该作品
            let documents = match self.list_documents(&path).await {
                Ok(documents) => documents,
                Err(e) => {
                    tracing::warn!(work = %path.display(), error = %e, "Could not list documents, skipping work");
                    continue;
                }
            };

            works.push(WorkSource {
                id,
                title,
                path,
                documents,
            });
        }

        Ok(works)
    }
}

/// 源文档: `.xml` 结尾、不以 `__cts__` 开头、包含 `perseus-`
fn is_source_document(file_name: &str) -> bool {
    file_name.ends_with(".xml")
        && !file_name.starts_with("__cts__")
        && file_name.contains(DOCUMENT_MARKER)
}

/// 列出目录下的子目录或文件，按名称排序
///
/// 符号链接按其目标判断类型，失效的链接忽略
async fn list_entries(dir: &Path, directories: bool) -> Result<Vec<(String, PathBuf)>, CorpusError> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| CorpusError::IoError(format!("{}: {}", dir.display(), e)))?;

    let mut out = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| CorpusError::IoError(e.to_string()))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| CorpusError::IoError(e.to_string()))?;
        let is_dir = if file_type.is_symlink() {
            match fs::metadata(entry.path()).await {
                Ok(metadata) => metadata.is_dir(),
                Err(e) => {
                    tracing::debug!(path = %entry.path().display(), error = %e, "Ignoring dangling symlink");
                    continue;
                }
            }
        } else {
            file_type.is_dir()
        };
        if is_dir != directories {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        out.push((name, entry.path()));
    }

    out.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(out)
}

/// 从目录下的 __cts__.xml 读取显示名，按顺序取第一个存在的元素
///
/// 文件缺失返回 None；文件损坏记录警告后返回 None
async fn read_cts_name(dir: &Path, elements: &[&str]) -> Option<String> {
    let path = dir.join(CTS_FILE_NAME);
    let raw = match fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read CTS metadata");
            return None;
        }
    };

    let root = match parse_document(&raw) {
        Ok(root) => root,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not parse CTS metadata");
            return None;
        }
    };

    elements
        .iter()
        .find_map(|name| root.first_named(name))
        .map(|element| normalize(&element.text_content()))
        .filter(|name| !name.is_empty())
}
