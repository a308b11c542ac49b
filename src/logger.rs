//! 日志初始化
//!
//! 同时输出到终端和日志文件，级别由 `RUST_LOG` 控制，默认 `info`

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::utils::logging::init_log_file;

/// 初始化全局日志
///
/// # 参数
/// - `log_file_path`: 日志文件路径（追加写入）
pub fn init(log_file_path: &str) -> Result<()> {
    init_log_file(log_file_path)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("日志系统初始化失败")?;

    Ok(())
}
