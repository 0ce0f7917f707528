//! Corpus Context - Run Summary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ArchiveId;

/// 作者引用（语料库目录 + __cts__ 元数据中的显示名）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: ArchiveId,
    pub name: String,
}

/// 一个已写出的作品产物
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub work_id: ArchiveId,
    pub work_title: String,
    pub language: String,
    /// 产物文件名（相对输出目录）
    pub output_file: String,
    pub line_count: usize,
}

/// 单个作者的抽取结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub author: AuthorRef,
    pub works: Vec<WorkEntry>,
}

/// 一次完整抽取运行的汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub total_authors: usize,
    pub total_works: usize,
    pub total_files: usize,
    pub extraction_date: DateTime<Utc>,
    pub authors: Vec<AuthorSummary>,
}

impl CorpusSummary {
    /// 汇总作者列表，丢弃没有任何作品产物的作者
    pub fn new(authors: Vec<AuthorSummary>, extraction_date: DateTime<Utc>) -> Self {
        let authors: Vec<AuthorSummary> = authors
            .into_iter()
            .filter(|a| !a.works.is_empty())
            .collect();
        let total_works = authors.iter().map(|a| a.works.len()).sum();

        Self {
            total_authors: authors.len(),
            total_works,
            // 每个作品条目对应一个产物文件
            total_files: total_works,
            extraction_date,
            authors,
        }
    }

    pub fn total_lines(&self) -> usize {
        self.authors
            .iter()
            .flat_map(|a| a.works.iter())
            .map(|w| w.line_count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(id: &str, lines: usize) -> WorkEntry {
        WorkEntry {
            work_id: ArchiveId::new(id).unwrap(),
            work_title: "Iliad".to_string(),
            language: "grc".to_string(),
            output_file: format!("tlg0012_{}_grc.json", id),
            line_count: lines,
        }
    }

    #[test]
    fn test_summary_counts_and_filters_empty_authors() {
        let authors = vec![
            AuthorSummary {
                author: AuthorRef { id: ArchiveId::new("tlg0012").unwrap(), name: "Homer".into() },
                works: vec![work("tlg001", 10), work("tlg002", 5)],
            },
            AuthorSummary {
                author: AuthorRef { id: ArchiveId::new("tlg0099").unwrap(), name: "Nobody".into() },
                works: vec![],
            },
        ];

        let summary = CorpusSummary::new(authors, Utc::now());
        assert_eq!(summary.total_authors, 1);
        assert_eq!(summary.total_works, 2);
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.total_lines(), 15);
    }
}
