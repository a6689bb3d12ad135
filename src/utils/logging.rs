/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use crate::orchestrator::join_loop::RunReport;
use crate::orchestrator::raffle_entrant::EntrySummary;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// # 参数
/// - `debug`: 是否输出 debug 级别日志（`RUST_LOG` 优先）
pub fn init(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("raffle_runner={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `command`: 正在执行的子命令
/// - `base_url`: 站点地址
pub fn log_startup(command: &str, base_url: &str) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 RaffleRunner v{} - {}",
        env!("CARGO_PKG_VERSION"),
        command
    );
    info!("🌐 站点: {}", base_url);
    info!("{}", "=".repeat(60));
}

/// 记录单轮参与完成信息
///
/// # 参数
/// - `cycle`: 扫描轮次
/// - `summary`: 本轮统计
pub fn log_cycle_complete(cycle: u64, summary: &EntrySummary) {
    info!("{}", "─".repeat(60));
    info!(
        "✓ 第 {} 轮完成: 参与 {}/{}，处理 {} 个",
        cycle,
        summary.entered,
        summary.total,
        summary.outcomes.len()
    );
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(report: &RunReport) {
    info!("{}", "=".repeat(60));
    info!("📊 运行结束统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("🔁 扫描次数: {}", report.cycles);
    info!("✅ 成功参与: {}", report.entered);
    info!("📋 已处理抽奖: {}", report.joined);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
