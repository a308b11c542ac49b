use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// API 基础地址（不含 `/v1/chat/completions`）
    pub base_url: String,
    /// 模型名称
    pub model_name: String,
    /// 采样温度
    pub temperature: f64,
    /// 单个问题最多尝试次数
    pub max_retries: u32,
    /// 每次失败后的等待时间
    pub retry_delay: Duration,
    /// 成功回答后到下一个问题之间的等待时间
    pub question_delay: Duration,
    /// 单次请求超时
    pub request_timeout: Duration,
    /// 问题列表 TOML 文件，不存在时使用内置列表
    pub questions_file: String,
    /// 日志文件
    pub log_file: String,
    /// 最多运行几轮，`None` 表示一直运行
    pub max_cycles: Option<u64>,
    /// 打乱顺序用的随机种子
    pub shuffle_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://pengu.gaia.domains".to_string(),
            model_name: "qwen2-0.5b-instruct".to_string(),
            temperature: 0.7,
            max_retries: 100,
            retry_delay: Duration::from_secs(5),
            question_delay: Duration::from_secs(1),
            request_timeout: Duration::from_secs(30),
            questions_file: "questions.toml".to_string(),
            log_file: "chatbot.log".to_string(),
            max_cycles: None,
            shuffle_seed: None,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置或无法解析的项使用默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: std::env::var("CHAT_BASE_URL").unwrap_or(default.base_url),
            model_name: std::env::var("CHAT_MODEL").unwrap_or(default.model_name),
            temperature: env_parse("CHAT_TEMPERATURE").unwrap_or(default.temperature),
            max_retries: env_parse("CHAT_MAX_RETRIES").unwrap_or(default.max_retries),
            retry_delay: env_parse("CHAT_RETRY_DELAY_SECS")
                .map(Duration::from_secs)
                .unwrap_or(default.retry_delay),
            question_delay: env_parse("CHAT_QUESTION_DELAY_SECS")
                .map(Duration::from_secs)
                .unwrap_or(default.question_delay),
            request_timeout: env_parse("CHAT_REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(default.request_timeout),
            questions_file: std::env::var("QUESTIONS_FILE").unwrap_or(default.questions_file),
            log_file: std::env::var("LOG_FILE").unwrap_or(default.log_file),
            max_cycles: env_parse("MAX_CYCLES").or(default.max_cycles),
            shuffle_seed: env_parse("SHUFFLE_SEED").or(default.shuffle_seed),
        }
    }

    /// 完整的聊天接口地址
    pub fn chat_endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "base_url",
                reason: "不能为空".to_string(),
            });
        }
        if self.model_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "model_name",
                reason: "不能为空".to_string(),
            });
        }
        if self.max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_retries",
                reason: "至少为 1".to_string(),
            });
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
