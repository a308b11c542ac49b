//! 请求执行服务 - 业务能力层
//!
//! 只负责"问一个问题拿到回答"，失败时固定间隔重试

use chrono::{DateTime, Local};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::clients::{parse_answer, ChatRequest, ChatTransport};
use crate::config::Config;
use crate::error::{ChatError, ChatResult};
use crate::models::question::{Answer, Credential, Question};
use crate::services::delay::Delay;
use crate::utils::truncate_text;

/// 日志中问题预览的长度
const QUESTION_PREVIEW_LEN: usize = 50;
/// 日志中错误响应体的最大长度
const ERROR_BODY_PREVIEW_LEN: usize = 200;

/// 单次尝试的记录，写完日志即丢弃
#[derive(Debug)]
pub struct RequestAttempt<'a> {
    pub question: &'a Question,
    pub attempt: u32,
    pub started_at: DateTime<Local>,
    pub outcome: Result<(), &'a ChatError>,
}

impl fmt::Display for RequestAttempt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.outcome {
            Ok(()) => "成功".to_string(),
            Err(e) => e.to_string(),
        };
        write!(
            f,
            "[{}] 第 {} 次尝试 '{}': {}",
            self.started_at.format("%H:%M:%S"),
            self.attempt,
            truncate_text(self.question.text(), QUESTION_PREVIEW_LEN),
            outcome
        )
    }
}

/// 请求执行服务
///
/// 职责：
/// - 构造单条 user 消息的聊天请求
/// - 最多尝试 `max_retries` 次，每次失败后等待固定的 `retry_delay`
/// - 非 200、网络错误、200 但响应格式错误都按同一种失败处理
/// - 重试用尽后返回 `ChatError::RetriesExhausted`
pub struct RequestExecutor {
    transport: Arc<dyn ChatTransport>,
    delay: Arc<dyn Delay>,
    model_name: String,
    temperature: f64,
    max_retries: u32,
    retry_delay: Duration,
}

impl RequestExecutor {
    /// 创建新的执行服务
    pub fn new(config: &Config, transport: Arc<dyn ChatTransport>, delay: Arc<dyn Delay>) -> Self {
        Self {
            transport,
            delay,
            model_name: config.model_name.clone(),
            temperature: config.temperature,
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
        }
    }

    /// 提问并返回回答
    ///
    /// # 参数
    /// - `credential`: API Key
    /// - `question`: 问题
    ///
    /// # 返回
    /// 第一次成功的回答；全部失败时返回 `ChatError::RetriesExhausted`
    pub async fn execute(&self, credential: &Credential, question: &Question) -> ChatResult<Answer> {
        let request = ChatRequest::user(&self.model_name, question.text(), self.temperature);
        let preview = truncate_text(question.text(), QUESTION_PREVIEW_LEN);

        for attempt in 1..=self.max_retries {
            let started_at = Local::now();
            info!(
                "第 {}/{} 次尝试，问题: {}",
                attempt, self.max_retries, preview
            );

            match self.attempt(credential, &request).await {
                Ok(answer) => {
                    debug!(
                        "{}",
                        RequestAttempt {
                            question,
                            attempt,
                            started_at,
                            outcome: Ok(()),
                        }
                    );
                    return Ok(answer);
                }
                Err(e) => {
                    let record = RequestAttempt {
                        question,
                        attempt,
                        started_at,
                        outcome: Err(&e),
                    };
                    match &e {
                        ChatError::Transport(_) => error!("{}", record),
                        _ => warn!("{}", record),
                    }
                    self.delay.sleep(self.retry_delay).await;
                }
            }
        }

        Err(ChatError::RetriesExhausted {
            question: preview,
            attempts: self.max_retries,
        })
    }

    /// 单次请求
    async fn attempt(&self, credential: &Credential, request: &ChatRequest) -> ChatResult<Answer> {
        let reply = self.transport.send(credential, request).await?;

        if !reply.is_ok() {
            return Err(ChatError::Status {
                status: reply.status,
                body: truncate_text(&reply.body, ERROR_BODY_PREVIEW_LEN),
            });
        }

        parse_answer(&reply.body).map(Answer::new)
    }
}
