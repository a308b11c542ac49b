use crate::config::Config;
use crate::models::question::QuestionSet;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 内置问题列表
pub const BUILTIN_QUESTIONS: &str = include_str!("../../../questions.toml");

/// 问题列表文件格式
#[derive(Debug, Deserialize)]
struct QuestionFile {
    questions: Vec<String>,
}

/// 解析 TOML 格式的问题列表
pub fn parse_question_set(content: &str) -> Result<QuestionSet> {
    let file: QuestionFile = toml::from_str(content).context("无法解析问题列表")?;
    Ok(QuestionSet::new(file.questions)?)
}

/// 从 TOML 文件加载问题列表
pub async fn load_question_set(toml_file_path: &Path) -> Result<QuestionSet> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    parse_question_set(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))
}

/// 按配置加载问题列表
///
/// 配置的文件存在时从文件加载，否则使用内置列表
pub async fn load_configured_question_set(config: &Config) -> Result<QuestionSet> {
    let path = Path::new(&config.questions_file);

    if fs::try_exists(path).await.unwrap_or(false) {
        tracing::info!("正在加载问题列表: {}", path.display());
        let set = load_question_set(path).await?;
        tracing::info!("成功加载 {} 个问题", set.len());
        return Ok(set);
    }

    tracing::warn!("问题文件 {} 不存在，使用内置问题列表", path.display());
    parse_question_set(BUILTIN_QUESTIONS)
}
