//! # Question Loop
//!
//! 一个持续向聊天接口提问的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用三层结构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 只负责发送一次 HTTP 请求
//! - `ChatTransport` - 发送请求、拿回状态码和响应体的能力
//! - `HttpTransport` - 基于 reqwest 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 只处理单个 Question
//! - `RequestExecutor` - 提问 + 固定间隔重试
//! - `Delay` - 等待能力，测试中可替换
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/scheduler` - 打乱顺序、逐个提问、控制节奏、永久循环
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use clients::{ChatTransport, HttpTransport};
pub use config::Config;
pub use error::{ChatError, ChatResult, ConfigError};
pub use models::{Answer, Credential, Question, QuestionSet};
pub use orchestrator::{CycleReport, RunSummary, Scheduler};
pub use services::{Delay, RecordingDelay, RequestExecutor, TokioDelay};
