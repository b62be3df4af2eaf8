//! 日志初始化
//! json 用于部署环境，pretty 用于本地开发

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

// sqlx 在 info 级别会记录每条语句
const QUIET_DEPENDENCIES: &str = "sqlx=warn,tower_http=info";

/// 过滤指令：RUST_LOG 非空时原样使用，否则为配置级别加依赖降噪
fn filter_directives(level: &str, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_string(),
        _ => format!("{},{}", level.to_lowercase(), QUIET_DEPENDENCIES),
    }
}

/// 安装全局 subscriber，进程内只应调用一次
pub fn init_telemetry(logging: &LoggingConfig) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = EnvFilter::new(filter_directives(&logging.level, rust_log.as_deref()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if logging.format.eq_ignore_ascii_case("pretty") {
        builder.pretty().init();
    } else {
        builder.json().flatten_event(true).init();
    }

    tracing::info!(level = %logging.level, format = %logging.format, "Logging ready");
}
