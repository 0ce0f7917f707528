//! Catalog Context - 元数据解析
//!
//! 职责:
//! - 归档作者 ID → 作者描述信息（静态表）
//! - 作品标题 → 体裁（关键词规则）

mod authors;
mod genre;

pub use authors::{known_author_count, resolve_author, AuthorProfile, UNKNOWN};
pub use genre::{resolve_genre, DEFAULT_GENRE};
