//! 日志初始化
//!
//! 日志写到 stderr，stdout 只留给题目和作答。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 按 `RUST_LOG` 初始化，未设置时为 info
pub fn init() {
    init_with_level("info");
}

/// 按给定级别初始化；`RUST_LOG` 存在时优先使用
pub fn init_with_level(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // 重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
