//! 聊天接口客户端
//!
//! 封装与 `/v1/chat/completions` 相关的请求构造、发送和响应解析
use crate::config::Config;
use crate::error::{ChatError, ChatResult};
use crate::models::question::Credential;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 聊天消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// 聊天请求体
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

impl ChatRequest {
    /// 只包含一条 user 消息的请求
    pub fn user(model: impl Into<String>, content: impl Into<String>, temperature: f64) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: content.into(),
            }],
            temperature,
        }
    }
}

/// HTTP 响应（状态码 + 原始响应体）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// 发送聊天请求的能力
///
/// 只负责把请求发出去并拿回状态码和响应体，不做重试，也不解析内容。
/// 网络层错误返回 `ChatError::Transport`。
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, credential: &Credential, request: &ChatRequest) -> ChatResult<HttpReply>;
}

/// 基于 reqwest 的实现
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// 创建新的客户端，超时时间取自配置
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("无法创建 HTTP 客户端")?;

        Ok(Self {
            client,
            endpoint: config.chat_endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, credential: &Credential, request: &ChatRequest) -> ChatResult<HttpReply> {
        debug!("POST {}，模型: {}", self.endpoint, request.model);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(credential.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpReply { status, body })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// 从响应体中取出 `choices[0].message.content`
///
/// 任何不符合该结构的响应都返回 `ChatError::MalformedResponse`
pub fn parse_answer(body: &str) -> ChatResult<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ChatError::MalformedResponse("choices 为空".to_string()))?
        .message
        .content
        .ok_or_else(|| ChatError::MalformedResponse("message.content 为空".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest::user("qwen2-0.5b-instruct", "What is Rust?", 0.7);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "model": "qwen2-0.5b-instruct",
                "messages": [{"role": "user", "content": "What is Rust?"}],
                "temperature": 0.7
            })
        );
    }

    #[test]
    fn test_parse_answer_takes_first_choice() {
        let body = json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "first"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ],
            "usage": {"total_tokens": 12}
        })
        .to_string();

        assert_eq!(parse_answer(&body).unwrap(), "first");
    }

    #[test]
    fn test_parse_answer_rejects_malformed_bodies() {
        let cases = [
            "not json",
            "{}",
            r#"{"choices": []}"#,
            r#"{"choices": [{"message": {}}]}"#,
            r#"{"choices": [{"message": {"content": null}}]}"#,
            r#"{"choices": [{"text": "legacy"}]}"#,
        ];

        for body in cases {
            assert!(
                matches!(parse_answer(body), Err(ChatError::MalformedResponse(_))),
                "body 应该被视为格式错误: {}",
                body
            );
        }
    }

    #[test]
    fn test_http_transport_endpoint() {
        let config = Config {
            base_url: "http://localhost:9000".to_string(),
            ..Config::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.endpoint(),
            "http://localhost:9000/v1/chat/completions"
        );
    }
}
