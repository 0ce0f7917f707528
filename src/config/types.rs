//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::infrastructure::adapters::tei::DEFAULT_STREAM_THRESHOLD_BYTES;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 语料库配置
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// 参考资料配置
    #[serde(default)]
    pub reference: ReferenceConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 语料库配置
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    /// 语料库根目录（`canonical-greekLit/data`）
    #[serde(default = "default_corpus_root")]
    pub root: PathBuf,

    /// 抽取产物输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// 超过该大小（字节）的文档使用流式解析
    #[serde(default = "default_stream_threshold")]
    pub stream_threshold_bytes: u64,
}

fn default_corpus_root() -> PathBuf {
    PathBuf::from("canonical-greekLit/data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/extracted-texts")
}

fn default_stream_threshold() -> u64 {
    DEFAULT_STREAM_THRESHOLD_BYTES
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: default_corpus_root(),
            output_dir: default_output_dir(),
            stream_threshold_bytes: default_stream_threshold(),
        }
    }
}

/// 参考资料配置
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceConfig {
    /// 参考资料根目录（含 `xml/classics.xml`、`xml/data`、`reading/static/xml`）
    #[serde(default = "default_reference_root")]
    pub root: PathBuf,
}

fn default_reference_root() -> PathBuf {
    PathBuf::from("sgml")
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            root: default_reference_root(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/helios.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
