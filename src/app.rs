use crate::clients::HttpTransport;
use crate::config::Config;
use crate::models::question::{Credential, QuestionSet};
use crate::models::loaders::load_configured_question_set;
use crate::orchestrator::{RunSummary, Scheduler};
use crate::services::{RequestExecutor, TokioDelay};
use crate::utils::logging::{log_startup, print_final_stats};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    credential: Credential,
    questions: QuestionSet,
}

impl App {
    /// 初始化应用：检查配置并加载问题列表
    pub async fn initialize(config: Config, credential: Credential) -> Result<Self> {
        config.validate().context("配置无效")?;

        let questions = load_configured_question_set(&config).await?;

        log_startup(&config, questions.len());

        Ok(Self {
            config,
            credential,
            questions,
        })
    }

    /// 运行应用主逻辑
    ///
    /// 未设置最大轮数时不会返回
    pub async fn run(&self) -> Result<RunSummary> {
        let transport = Arc::new(HttpTransport::new(&self.config)?);
        let delay = Arc::new(TokioDelay);

        let executor = RequestExecutor::new(&self.config, transport, delay.clone());
        let mut scheduler = Scheduler::new(&self.config, executor, delay);

        info!("开始循环提问，共 {} 个问题", self.questions.len());
        let summary = scheduler.run(&self.credential, &self.questions).await;

        print_final_stats(&summary, &self.config.log_file);

        Ok(summary)
    }
}
