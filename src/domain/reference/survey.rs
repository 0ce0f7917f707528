//! Reference Context - Archive Survey

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 形态分析样例条数
pub const MORPHOLOGY_SAMPLE_SIZE: usize = 10;

/// 书目样例与文件清单在汇总中保留的条数
pub const SURVEY_SAMPLE_SIZE: usize = 20;

const UNKNOWN_LANGUAGE: &str = "unknown";

/// 书目目录中的一条文本记录（`rdf:Description`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMetadataEntry {
    /// `rdf:about`
    pub id: String,
    pub title: String,
    pub creator: String,
    pub language: String,
}

impl TextMetadataEntry {
    /// 缺少 id、标题或作者时不构成条目；语言缺失记为 `unknown`
    pub fn new(
        id: Option<String>,
        title: Option<String>,
        creator: Option<String>,
        language: Option<String>,
    ) -> Option<Self> {
        Some(Self {
            id: id.filter(|v| !v.is_empty())?,
            title: title.filter(|v| !v.is_empty())?,
            creator: creator.filter(|v| !v.is_empty())?,
            language: language
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
        })
    }

    pub fn is_greek(&self) -> bool {
        matches!(self.language.as_str(), "grc" | "greek")
    }

    pub fn is_latin(&self) -> bool {
        matches!(self.language.as_str(), "lat" | "latin")
    }
}

/// 形态分析文件的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphologyLanguage {
    Greek,
    Latin,
}

impl MorphologyLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            MorphologyLanguage::Greek => "greek",
            MorphologyLanguage::Latin => "latin",
        }
    }

    /// 形态分析文件名，如 `greek.morph.xml`
    pub fn file_name(&self) -> String {
        format!("{}.morph.xml", self.as_str())
    }
}

/// 一条形态分析（`analysis` 元素），缺失字段为空串
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphologyAnalysis {
    pub form: String,
    pub lemma: String,
    pub pos: String,
    pub number: String,
    pub gender: String,
    pub case: String,
}

/// 单个语言的形态分析统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphologySummary {
    pub count: usize,
    pub sample: Vec<MorphologyAnalysis>,
}

impl MorphologySummary {
    /// 记录一条分析；只有词形与词元都非空的条目才计数
    pub fn record(&mut self, analysis: MorphologyAnalysis) {
        if analysis.form.is_empty() || analysis.lemma.is_empty() {
            return;
        }
        self.count += 1;
        if self.sample.len() < MORPHOLOGY_SAMPLE_SIZE {
            self.sample.push(analysis);
        }
    }
}

/// 静态阅读文本文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticTextFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMetadataSummary {
    pub total: usize,
    pub greek: usize,
    pub latin: usize,
    pub samples: Vec<TextMetadataEntry>,
}

/// 缺失或无法解析的语言不出现在输出中
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphologicalData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greek: Option<MorphologySummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin: Option<MorphologySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFilesSummary {
    pub total: usize,
    pub files: Vec<StaticTextFile>,
}

/// 一次参考资料普查的汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveSurvey {
    pub extraction_date: DateTime<Utc>,
    pub text_metadata: TextMetadataSummary,
    pub morphological_data: MorphologicalData,
    pub text_files: TextFilesSummary,
}

impl ArchiveSurvey {
    pub fn new(
        entries: &[TextMetadataEntry],
        morphological_data: MorphologicalData,
        files: &[StaticTextFile],
        extraction_date: DateTime<Utc>,
    ) -> Self {
        Self {
            extraction_date,
            text_metadata: TextMetadataSummary {
                total: entries.len(),
                greek: entries.iter().filter(|e| e.is_greek()).count(),
                latin: entries.iter().filter(|e| e.is_latin()).count(),
                samples: entries.iter().take(SURVEY_SAMPLE_SIZE).cloned().collect(),
            },
            morphological_data,
            text_files: TextFilesSummary {
                total: files.len(),
                files: files.iter().take(SURVEY_SAMPLE_SIZE).cloned().collect(),
            },
        }
    }
}
