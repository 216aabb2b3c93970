// ==========================================
// 制造库存系统 - 日志初始化
// ==========================================
// 输出: stderr（stdout 专供命令行 JSON 结果，可直接管道给 jq 等工具）
// 级别: RUST_LOG，缺省 info
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化命令行进程的日志
///
/// 只能调用一次，由 `main` 在解析参数前调用。
///
/// # 环境变量
/// - RUST_LOG: 例如 `RUST_LOG=autoflex_inventory::engine=debug` 可查看被跳过产品的原因
///
/// # 示例
/// ```no_run
/// autoflex_inventory::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 测试用日志：debug 级别，输出交给测试框架捕获
///
/// 多个测试重复调用时忽略已初始化的错误。
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
