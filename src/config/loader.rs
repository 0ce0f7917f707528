//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（helios.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::infrastructure::adapters::tei::DEFAULT_STREAM_THRESHOLD_BYTES;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["helios", "helios.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "HELIOS";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `HELIOS_`，层级分隔符 `__`）
/// 2. 配置文件（helios.toml 或 helios.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `HELIOS_CORPUS__ROOT=/data/canonical-greekLit/data`
/// - `HELIOS_CORPUS__OUTPUT_DIR=/data/extracted-texts`
/// - `HELIOS_REFERENCE__ROOT=/data/sgml`
/// - `HELIOS_DATABASE__PATH=/data/helios.db`
/// - `HELIOS_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_environment(config_path, environment())
}

fn environment() -> Environment {
    // 注意: 环境变量名会被转换为小写
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_with_environment(
    config_path: Option<&Path>,
    environment: Environment,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("corpus.root", "canonical-greekLit/data")?
        .set_default("corpus.output_dir", "data/extracted-texts")?
        .set_default("corpus.stream_threshold_bytes", DEFAULT_STREAM_THRESHOLD_BYTES)?
        .set_default("reference.root", "sgml")?
        .set_default("database.path", "data/helios.db")?
        .set_default("database.max_connections", 5)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    builder = builder.add_source(environment);

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.corpus.root.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Corpus root cannot be empty".to_string(),
        ));
    }

    if config.corpus.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Output directory cannot be empty".to_string(),
        ));
    }

    if config.corpus.stream_threshold_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "Stream threshold cannot be 0".to_string(),
        ));
    }

    if config.reference.root.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Reference root cannot be empty".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "Database max connections cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Corpus Root: {:?}", config.corpus.root);
    tracing::info!("Output Directory: {:?}", config.corpus.output_dir);
    tracing::info!("Stream Threshold: {} bytes", config.corpus.stream_threshold_bytes);
    tracing::info!("Reference Root: {:?}", config.reference.root);
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn env_vars(vars: &[(&str, &str)]) -> Environment {
        let mut map = config::Map::new();
        for (key, value) in vars {
            map.insert(key.to_string(), value.to_string());
        }
        environment().source(Some(map))
    }

    #[test]
    fn test_load_defaults() {
        let config = load_with_environment(None, env_vars(&[])).unwrap();
        assert_eq!(config.corpus.root, PathBuf::from("canonical-greekLit/data"));
        assert_eq!(config.corpus.stream_threshold_bytes, DEFAULT_STREAM_THRESHOLD_BYTES);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config = load_with_environment(
            None,
            env_vars(&[
                ("HELIOS_CORPUS__ROOT", "/srv/corpus"),
                ("HELIOS_CORPUS__STREAM_THRESHOLD_BYTES", "1024"),
                ("HELIOS_LOG__JSON", "true"),
                ("HELIOS_REFERENCE__ROOT", "/srv/sgml"),
            ]),
        )
        .unwrap();

        assert_eq!(config.corpus.root, PathBuf::from("/srv/corpus"));
        assert_eq!(config.reference.root, PathBuf::from("/srv/sgml"));
        assert_eq!(config.corpus.stream_threshold_bytes, 1024);
        assert!(config.log.json);
    }

    #[test]
    fn test_file_then_env() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("helios.toml");
        std::fs::write(
            &path,
            "[database]\npath = \"/var/lib/helios.db\"\nmax_connections = 2\n",
        )
        .unwrap();

        let config = load_with_environment(
            Some(path.as_path()),
            env_vars(&[("HELIOS_DATABASE__MAX_CONNECTIONS", "8")]),
        )
        .unwrap();

        assert_eq!(config.database.path, "/var/lib/helios.db");
        assert_eq!(config.database.max_connections, 8);
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_threshold() {
        let result = load_with_environment(
            None,
            env_vars(&[("HELIOS_CORPUS__STREAM_THRESHOLD_BYTES", "0")]),
        );
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validation_error_for_empty_db_path() {
        let mut config = AppConfig::default();
        config.database.path = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_reference_root() {
        let mut config = AppConfig::default();
        config.reference.root = PathBuf::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_connections() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(validate_config(&config).is_err());
    }
}
