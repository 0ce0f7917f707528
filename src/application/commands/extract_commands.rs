//! Extract Commands

use std::path::PathBuf;

/// 抽取整个语料库命令
#[derive(Debug, Clone, Default)]
pub struct ExtractCorpus;

/// 抽取运行结果
#[derive(Debug, Clone)]
pub struct ExtractCorpusResponse {
    pub summary_path: PathBuf,
    pub total_authors: usize,
    pub total_works: usize,
    pub total_files: usize,
    pub total_lines: usize,
    /// 解析失败而跳过的文档数
    pub skipped_documents: usize,
}
