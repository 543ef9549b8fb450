/// 日志工具模块
///
/// 提供日志初始化和启动信息输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化全局日志订阅器
///
/// 过滤级别从 `RUST_LOG` 读取，缺省为 `info`。
/// 重复调用是无害的（测试中常见）。
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

/// 记录应用启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 学业支持后台核心已初始化");
    info!("📁 上传根目录: {}", config.upload_root);
    info!("🤖 辅导模型: {} @ {}", config.llm_model_name, config.llm_api_base_url);
    info!("{}", "=".repeat(60));
}
