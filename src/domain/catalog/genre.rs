//! Catalog Context - 体裁推断
//!
//! 按作品标题关键词推断体裁，规则有序，先匹配者胜出

/// 无任何规则匹配且作者也无默认体裁时使用
pub const DEFAULT_GENRE: &str = "Literature";

/// 关键词规则：(关键词列表, 体裁)
const GENRE_RULES: &[(&[&str], &str)] = &[
    (&["tragedy", "tragic"], "Tragedy"),
    (&["comedy", "comic"], "Comedy"),
    (&["epic", "iliad", "odyssey"], "Epic Poetry"),
    (&["ode", "hymn"], "Lyric Poetry"),
    (&["history", "histories"], "History"),
    (&["philosophy", "ethics", "politics"], "Philosophy"),
    (&["oratory", "speech", "oration"], "Oratory"),
    (&["medicine", "medical"], "Medicine"),
    (&["mathematics", "geometry"], "Mathematics"),
    (&["geography"], "Geography"),
    (&["novel", "romance"], "Novel"),
    (&["epistle", "letter"], "Epistle"),
    (&["gospel", "acts", "revelation"], "Religious"),
    (&["bible", "testament"], "Religious"),
];

/// 推断作品体裁
///
/// 标题转小写后做子串匹配；均未命中时退回作者默认体裁，再退回 `Literature`
pub fn resolve_genre(work_title: &str, author_genre: Option<&str>) -> String {
    let title = work_title.to_lowercase();

    GENRE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| title.contains(k)))
        .map(|(_, genre)| genre.to_string())
        .or_else(|| {
            author_genre
                .filter(|g| !g.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_GENRE.to_string())
}
