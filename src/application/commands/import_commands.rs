//! Import Commands

/// 将抽取产物导入持久化存储命令
#[derive(Debug, Clone, Default)]
pub struct ImportCorpus;

/// 导入运行结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportCorpusResponse {
    pub authors: usize,
    pub works: usize,
    pub texts: usize,
    /// 产物缺失或无法解析而跳过的作品数
    pub skipped_works: usize,
}
