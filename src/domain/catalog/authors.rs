//! Catalog Context - 作者信息表
//!
//! 归档作者 ID → 描述信息，数据来自内嵌的 `data/authors.json`

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

const AUTHOR_TABLE_JSON: &str = include_str!("../../../data/authors.json");

/// 未知作者的占位字段值
pub const UNKNOWN: &str = "Unknown";

/// 作者描述信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub name: String,
    pub full_name: String,
    pub period: String,
    /// 作者默认体裁
    pub genre: String,
    pub nationality: String,
    pub biography: String,
}

impl AuthorProfile {
    /// 表中不存在的作者 ID 的占位记录
    pub fn placeholder(archive_id: &str) -> Self {
        Self {
            name: format!("Author {}", archive_id),
            full_name: UNKNOWN.to_string(),
            period: UNKNOWN.to_string(),
            genre: UNKNOWN.to_string(),
            nationality: UNKNOWN.to_string(),
            biography: UNKNOWN.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct AuthorTableEntry {
    id: String,
    #[serde(flatten)]
    profile: AuthorProfile,
}

/// 进程级只读作者表，首次访问时解析
static AUTHOR_TABLE: LazyLock<HashMap<String, AuthorProfile>> = LazyLock::new(|| {
    let entries: Vec<AuthorTableEntry> =
        serde_json::from_str(AUTHOR_TABLE_JSON).expect("embedded author table must be valid JSON");
    entries.into_iter().map(|e| (e.id, e.profile)).collect()
});

/// 查询作者信息，未知 ID 返回占位记录
pub fn resolve_author(archive_id: &str) -> AuthorProfile {
    AUTHOR_TABLE
        .get(archive_id)
        .cloned()
        .unwrap_or_else(|| AuthorProfile::placeholder(archive_id))
}

/// 作者表条目数
pub fn known_author_count() -> usize {
    AUTHOR_TABLE.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_loads() {
        assert_eq!(known_author_count(), 100);
    }

    #[test]
    fn test_known_author() {
        let euripides = resolve_author("tlg0012");
        assert_eq!(euripides.name, "Euripides");
        assert_eq!(euripides.genre, "Tragedy");

        let plato = resolve_author("tlg0059");
        assert_eq!(plato.name, "Plato");
        assert_eq!(plato.period, "Classical");
        assert_eq!(plato.genre, "Philosophy");
    }

    #[test]
    fn test_unknown_author_fallback() {
        let author = resolve_author("tlg9999");
        assert_eq!(author.name, "Author tlg9999");
        assert_eq!(author.period, "Unknown");
        assert_eq!(author.full_name, "Unknown");
        assert_eq!(author.genre, "Unknown");
        assert_eq!(author.nationality, "Unknown");
        assert_eq!(author.biography, "Unknown");
    }
}
