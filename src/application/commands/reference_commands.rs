//! Reference Commands

use std::path::PathBuf;

/// 普查参考资料（书目目录、形态分析、静态文本）命令
#[derive(Debug, Clone, Default)]
pub struct SurveyArchive;

/// 普查结果
#[derive(Debug, Clone)]
pub struct SurveyArchiveResponse {
    pub summary_path: PathBuf,
    pub metadata_path: PathBuf,
    pub total_texts: usize,
    pub greek_texts: usize,
    pub latin_texts: usize,
    /// 形态分析文件缺失时为 None
    pub greek_analyses: Option<usize>,
    pub latin_analyses: Option<usize>,
    pub static_files: usize,
}
