//! JSON Artifact Storage - 文件系统 JSON 产物存储实现
//!
//! 实现 ArtifactStoragePort trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{
    artifact_file_name, ArtifactError, ArtifactStoragePort,
};
use crate::domain::corpus::{
    ArchiveId, CorpusSummary, DocumentMetadata, ExtractionResult, TextUnit, UnitKind,
};
use crate::domain::reference::{ArchiveSurvey, TextMetadataEntry};

/// 汇总文件名
pub const SUMMARY_FILE_NAME: &str = "extraction-summary.json";

/// 书目目录条目文件名
pub const TEXT_METADATA_FILE_NAME: &str = "text-metadata.json";

/// 参考资料普查汇总文件名
pub const SURVEY_FILE_NAME: &str = "archive-summary.json";

/// 产物 JSON 结构
#[derive(Debug, Serialize, Deserialize)]
struct ArtifactDto {
    metadata: ArtifactMetadataDto,
    content: Vec<ArtifactUnitDto>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ArtifactMetadataDto {
    title: String,
    author: String,
    language: String,
    file_path: PathBuf,
    /// 仅写出，读取时以 content 为准
    #[serde(default)]
    total_lines: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct ArtifactUnitDto {
    kind: UnitKind,
    line: Option<String>,
    text: String,
}

impl From<&ExtractionResult> for ArtifactDto {
    fn from(result: &ExtractionResult) -> Self {
        let meta = result.metadata();
        Self {
            metadata: ArtifactMetadataDto {
                title: meta.title.clone(),
                author: meta.author.clone(),
                language: meta.language.clone(),
                file_path: meta.file_path.clone(),
                total_lines: result.unit_count(),
            },
            content: result
                .units()
                .iter()
                .map(|unit| ArtifactUnitDto {
                    kind: unit.kind(),
                    line: unit.line().map(str::to_string),
                    text: unit.text().to_string(),
                })
                .collect(),
        }
    }
}

impl TryFrom<ArtifactDto> for ExtractionResult {
    type Error = ArtifactError;

    fn try_from(dto: ArtifactDto) -> Result<Self, Self::Error> {
        let units = dto
            .content
            .into_iter()
            .map(|unit| TextUnit::new(unit.kind, unit.line, unit.text))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ArtifactError::SerializationError(e.to_string()))?;

        let metadata = DocumentMetadata {
            title: dto.metadata.title,
            author: dto.metadata.author,
            language: dto.metadata.language,
            file_path: dto.metadata.file_path,
        };

        ExtractionResult::from_units(metadata, units)
            .map_err(|e| ArtifactError::SerializationError(e.to_string()))
    }
}

/// 文件系统 JSON 产物存储
pub struct JsonArtifactStorage {
    /// 输出目录
    base_dir: PathBuf,
}

impl JsonArtifactStorage {
    /// 输出目录在首次写入时创建
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    async fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), ArtifactError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| ArtifactError::IoError(e.to_string()))?;

        let json = serde_json::to_string_pretty(value)
            .map_err(|e| ArtifactError::SerializationError(e.to_string()))?;

        fs::write(path, json)
            .await
            .map_err(|e| ArtifactError::IoError(e.to_string()))
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<T, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::NotFound(path.to_string_lossy().to_string()));
        }

        let json = fs::read_to_string(path)
            .await
            .map_err(|e| ArtifactError::IoError(e.to_string()))?;

        serde_json::from_str(&json).map_err(|e| ArtifactError::SerializationError(e.to_string()))
    }
}

#[async_trait]
impl ArtifactStoragePort for JsonArtifactStorage {
    async fn save_result(
        &self,
        author_id: &ArchiveId,
        work_id: &ArchiveId,
        result: &ExtractionResult,
    ) -> Result<String, ArtifactError> {
        let file_name = artifact_file_name(author_id, work_id, result.language());
        let path = self.base_dir.join(&file_name);

        self.write_json(&path, &ArtifactDto::from(result)).await?;

        tracing::debug!(
            file = %file_name,
            units = result.unit_count(),
            "Saved artifact"
        );

        Ok(file_name)
    }

    async fn load_result(&self, file_name: &str) -> Result<ExtractionResult, ArtifactError> {
        let dto: ArtifactDto = self.read_json(&self.base_dir.join(file_name)).await?;
        ExtractionResult::try_from(dto)
    }

    async fn save_summary(&self, summary: &CorpusSummary) -> Result<PathBuf, ArtifactError> {
        let path = self.base_dir.join(SUMMARY_FILE_NAME);
        self.write_json(&path, summary).await?;

        tracing::info!(path = %path.display(), "Saved extraction summary");

        Ok(path)
    }

    async fn load_summary(&self) -> Result<CorpusSummary, ArtifactError> {
        self.read_json(&self.base_dir.join(SUMMARY_FILE_NAME)).await
    }

    async fn save_text_metadata(&self, entries: &[TextMetadataEntry]) -> Result<PathBuf, ArtifactError> {
        let path = self.base_dir.join(TEXT_METADATA_FILE_NAME);
        self.write_json(&path, &entries).await?;

        tracing::info!(path = %path.display(), entries = entries.len(), "Saved text metadata");

        Ok(path)
    }

    async fn save_survey(&self, survey: &ArchiveSurvey) -> Result<PathBuf, ArtifactError> {
        let path = self.base_dir.join(SURVEY_FILE_NAME);
        self.write_json(&path, survey).await?;

        tracing::info!(path = %path.display(), "Saved archive survey");

        Ok(path)
    }
}
