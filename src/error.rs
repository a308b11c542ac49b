use thiserror::Error;

/// 聊天请求错误
///
/// 前三种错误都会在 `RequestExecutor` 内部被重试，只有
/// `RetriesExhausted` 会传到调度层。
#[derive(Debug, Error)]
pub enum ChatError {
    /// API 返回非 200 状态码
    #[error("API错误 ({status}): {body}")]
    Status { status: u16, body: String },

    /// 网络层错误（连接失败、超时、读取响应失败）
    #[error("请求失败: {0}")]
    Transport(String),

    /// 200 响应但无法解析出 `choices[0].message.content`
    #[error("响应格式错误: {0}")]
    MalformedResponse(String),

    /// 重试次数用尽
    #[error("超过最大重试次数 ({attempts} 次)，问题: {question}")]
    RetriesExhausted { question: String, attempts: u32 },
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Transport(err.to_string())
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置项取值非法
    #[error("配置项 {name} 无效: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    /// 问题列表为空
    #[error("问题列表为空")]
    EmptyQuestionSet,

    /// API Key 为空
    #[error("API Key 不能为空")]
    EmptyCredential,
}

/// 聊天请求结果类型
pub type ChatResult<T> = Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_contains_status() {
        let err = ChatError::Status {
            status: 503,
            body: "busy".into(),
        };
        assert_eq!(err.to_string(), "API错误 (503): busy");
    }

    #[test]
    fn test_reqwest_error_is_transport() {
        let err = reqwest::Client::new().get("not a url").build().unwrap_err();
        assert!(matches!(ChatError::from(err), ChatError::Transport(_)));
    }
}
