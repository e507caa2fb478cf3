//! `tracing` subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// 默认日志级别（未设置 `RUST_LOG` 时）。
pub const DEFAULT_FILTER: &str = "warn";

/// 安装写到 stderr 的 fmt subscriber，stdout 只留给对话内容。
///
/// 重复调用时保留已安装的 subscriber。
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
