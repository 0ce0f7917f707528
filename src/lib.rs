//! Helios - Perseus 古典文本语料抽取与导入
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Corpus Context: 抽取结果、文本单元、运行汇总
//! - Catalog Context: 作者元数据表、体裁推断
//! - Vocabulary Context: 词汇学习演示数据
//!
//! 应用层 (application/):
//! - Ports: 端口定义（CorpusSource, DocumentExtractor, ArtifactStorage, Repositories）
//! - Commands: 抽取、导入、演示数据写入
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: 目录遍历、TEI 解析、JSON 产物存储
//! - Persistence: SQLite 存储
//! - Memory: 内存仓储
//! - Telemetry: 日志初始化

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
