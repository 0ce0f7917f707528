//! Telemetry - tracing 日志初始化

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// 初始化全局日志订阅者
///
/// `RUST_LOG` 存在时优先于配置中的日志级别
pub fn init_tracing(config: &LogConfig) {
    let log_filter = format!("{},helios={},sqlx=warn", config.level, config.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
