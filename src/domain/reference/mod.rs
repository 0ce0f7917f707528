//! Reference Context - 参考资料普查
//!
//! 职责:
//! - classics.xml 书目目录条目
//! - 希腊语/拉丁语形态分析计数与样例
//! - 静态阅读文本文件清单

mod survey;

pub use survey::{
    ArchiveSurvey, MorphologicalData, MorphologyAnalysis, MorphologyLanguage, MorphologySummary,
    StaticTextFile, TextFilesSummary, TextMetadataEntry, TextMetadataSummary,
    MORPHOLOGY_SAMPLE_SIZE, SURVEY_SAMPLE_SIZE,
};
