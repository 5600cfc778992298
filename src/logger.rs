//! 日志初始化
//!
//! 使用 `RUST_LOG` 控制级别，默认 `info`

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化全局日志（重复调用时忽略）
pub fn init() {
    init_with_default("info");
}

/// 指定默认级别初始化，`RUST_LOG` 优先
pub fn init_with_default(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
