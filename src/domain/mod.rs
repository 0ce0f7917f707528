//! Domain Layer - 领域层
//!
//! 包含四个限界上下文:
//! - Corpus Context: 抽取结果与文本单元
//! - Catalog Context: 作者信息与体裁推断
//! - Reference Context: 书目目录与形态分析普查
//! - Vocabulary Context: 词汇学习演示数据

pub mod catalog;
pub mod corpus;
pub mod reference;
pub mod vocabulary;

// 共享的文本规范化
mod text_normalizer;

pub use text_normalizer::normalize;
