//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责循环调度，是整个系统的"指挥中心"。
//!
//! ### `scheduler` - 调度器
//! - 每轮打乱问题顺序（QuestionSet → 随机排列）
//! - 逐个调用 RequestExecutor
//! - 成功后按固定间隔等待，失败直接跳过
//! - 一轮结束后立即开始下一轮
//!
//! ## 层次关系
//!
//! ```text
//! scheduler (处理 QuestionSet，永久循环)
//!     ↓
//! request_executor (处理单个 Question，有限次重试)
//!     ↓
//! ChatTransport (发送一次 HTTP 请求)
//! ```

pub mod scheduler;

pub use scheduler::{CycleReport, QuestionOutcome, RunSummary, Scheduler};
