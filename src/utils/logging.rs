//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use tracing::info;

use crate::config::Config;
use crate::orchestrator::{CycleReport, RunSummary};

/// 在日志文件中写入本次运行的起始标记
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n提问循环日志 - {}\n{}\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path))?;
    file.write_all(log_header.as_bytes())
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, total_questions: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 循环提问模式");
    info!("🌐 接口地址: {}", config.chat_endpoint());
    info!("🤖 模型: {}", config.model_name);
    info!("📋 问题数量: {}", total_questions);
    info!(
        "🔁 最大重试次数: {}，重试间隔: {}s，问题间隔: {}s",
        config.max_retries,
        config.retry_delay.as_secs_f64(),
        config.question_delay.as_secs_f64()
    );
    match config.max_cycles {
        Some(cycles) => info!("⏱ 运行 {} 轮后结束", cycles),
        None => info!("♾ 持续运行，按 Ctrl+C 退出"),
    }
    info!("{}", "=".repeat(60));
}

/// 记录一轮开始
pub fn log_cycle_start(cycle: u64, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("🔀 第 {} 轮开始，{} 个问题已随机排序", cycle, total);
    info!("{}", "=".repeat(60));
}

/// 记录一轮结束
pub fn log_cycle_complete(report: &CycleReport) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 第 {} 轮完成: 成功 {}/{}，跳过 {}",
        report.cycle,
        report.answered(),
        report.total(),
        report.skipped()
    );
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// 只有设置了最大轮数时才会走到这里
pub fn print_final_stats(summary: &RunSummary, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 运行结束统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("🔁 轮数: {}", summary.cycles);
    info!("✅ 成功: {}", summary.answered);
    info!("❌ 跳过: {}", summary.skipped);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 50), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("问题问题问题", 2), "问题...");
    }

    #[test]
    fn test_init_log_file_appends() {
        let path = std::env::temp_dir().join(format!(
            "question_loop_log_{}.log",
            std::process::id()
        ));
        let path_str = path.to_string_lossy().to_string();

        init_log_file(&path_str).unwrap();
        init_log_file(&path_str).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("提问循环日志").count(), 2);

        let _ = std::fs::remove_file(&path);
    }
}
