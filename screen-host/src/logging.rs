//! # 日志初始化

use tracing_subscriber::EnvFilter;

/// 安装全局 fmt subscriber
///
/// `RUST_LOG` 优先，否则使用 `default_level`。重复调用是无操作。
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
