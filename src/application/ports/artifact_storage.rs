//! Artifact Storage Port - 中间产物存储抽象
//!
//! 每个 (作者, 作品, 语言) 一个抽取结果产物，每次运行一个汇总产物；
//! 参考资料普查另写书目条目与普查汇总

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::corpus::{ArchiveId, CorpusSummary, ExtractionResult};
use crate::domain::reference::{ArchiveSurvey, TextMetadataEntry};

/// 产物存储错误
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 产物文件名：`<author>_<work>_<language>.json`
///
/// 同一作品同一语言重复抽取时覆盖而非新增
pub fn artifact_file_name(author_id: &ArchiveId, work_id: &ArchiveId, language: &str) -> String {
    format!("{}_{}_{}.json", author_id, work_id, language)
}

/// Artifact Storage Port
#[async_trait]
pub trait ArtifactStoragePort: Send + Sync {
    /// 保存抽取结果，返回产物文件名
    async fn save_result(
        &self,
        author_id: &ArchiveId,
        work_id: &ArchiveId,
        result: &ExtractionResult,
    ) -> Result<String, ArtifactError>;

    /// 读取抽取结果
    async fn load_result(&self, file_name: &str) -> Result<ExtractionResult, ArtifactError>;

    /// 保存运行汇总，返回汇总文件路径
    async fn save_summary(&self, summary: &CorpusSummary) -> Result<PathBuf, ArtifactError>;

    /// 读取运行汇总
    async fn load_summary(&self) -> Result<CorpusSummary, ArtifactError>;

    /// 保存书目目录全部条目，返回文件路径
    async fn save_text_metadata(&self, entries: &[TextMetadataEntry]) -> Result<PathBuf, ArtifactError>;

    /// 保存参考资料普查汇总，返回文件路径
    async fn save_survey(&self, survey: &ArchiveSurvey) -> Result<PathBuf, ArtifactError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_file_name() {
        let author = ArchiveId::new("tlg0012").unwrap();
        let work = ArchiveId::new("tlg001").unwrap();
        assert_eq!(artifact_file_name(&author, &work, "grc"), "tlg0012_tlg001_grc.json");
    }
}
