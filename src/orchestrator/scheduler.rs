//! 调度器 - 编排层
//!
//! 永久循环：每轮打乱问题顺序，逐个提问，成功后按固定间隔等待，
//! 失败则记录日志直接进入下一个问题。

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info};

use crate::config::Config;
use crate::error::ChatError;
use crate::models::question::{Answer, Credential, Question, QuestionSet};
use crate::services::{Delay, RequestExecutor};
use crate::utils::logging::{log_cycle_complete, log_cycle_start};
use crate::utils::truncate_text;

/// 单个问题的处理结果
#[derive(Debug)]
pub enum QuestionOutcome {
    /// 拿到回答
    Answered {
        question: Question,
        answer: Answer,
        elapsed: Duration,
    },
    /// 重试用尽后跳过
    Skipped { question: Question, error: ChatError },
}

impl QuestionOutcome {
    pub fn question(&self) -> &Question {
        match self {
            QuestionOutcome::Answered { question, .. } | QuestionOutcome::Skipped { question, .. } => {
                question
            }
        }
    }

    pub fn answer(&self) -> Option<&Answer> {
        match self {
            QuestionOutcome::Answered { answer, .. } => Some(answer),
            QuestionOutcome::Skipped { .. } => None,
        }
    }
}

/// 一轮的处理结果
#[derive(Debug)]
pub struct CycleReport {
    /// 轮次（从1开始）
    pub cycle: u64,
    /// 按本轮顺序排列的处理结果
    pub outcomes: Vec<QuestionOutcome>,
}

impl CycleReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn answered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.answer().is_some()).count()
    }

    pub fn skipped(&self) -> usize {
        self.total() - self.answered()
    }

    /// 本轮的提问顺序
    pub fn order(&self) -> Vec<&str> {
        self.outcomes.iter().map(|o| o.question().text()).collect()
    }
}

/// 运行统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub answered: usize,
    pub skipped: usize,
}

impl RunSummary {
    fn record(&mut self, report: &CycleReport) {
        self.cycles += 1;
        self.answered += report.answered();
        self.skipped += report.skipped();
    }
}

/// 调度器
///
/// 单线程顺序执行，不持有问题集合和 API Key，二者都由 [`Scheduler::run`] 传入
pub struct Scheduler {
    executor: RequestExecutor,
    delay: Arc<dyn Delay>,
    question_delay: Duration,
    max_cycles: Option<u64>,
    rng: StdRng,
}

impl Scheduler {
    /// 创建新的调度器
    pub fn new(config: &Config, executor: RequestExecutor, delay: Arc<dyn Delay>) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            executor,
            delay,
            question_delay: config.question_delay,
            max_cycles: config.max_cycles,
            rng,
        }
    }

    /// 运行调度循环
    ///
    /// 未设置 `max_cycles` 时永不返回
    pub async fn run(&mut self, credential: &Credential, questions: &QuestionSet) -> RunSummary {
        let mut summary = RunSummary::default();

        loop {
            if let Some(max_cycles) = self.max_cycles {
                if summary.cycles >= max_cycles {
                    return summary;
                }
            }

            let report = self
                .run_cycle(summary.cycles + 1, credential, questions)
                .await;
            summary.record(&report);
        }
    }

    /// 执行一轮：打乱顺序后逐个提问
    pub async fn run_cycle(
        &mut self,
        cycle: u64,
        credential: &Credential,
        questions: &QuestionSet,
    ) -> CycleReport {
        let order = questions.shuffled(&mut self.rng);
        let total = order.len();
        log_cycle_start(cycle, total);

        let mut outcomes = Vec::with_capacity(total);

        for (i, question) in order.into_iter().enumerate() {
            info!("\n处理第 {}/{} 个问题", i + 1, total);
            info!("问题: {}", question);

            let outcome = self.ask(credential, question).await;
            if outcome.answer().is_some() {
                self.delay.sleep(self.question_delay).await;
            }
            outcomes.push(outcome);
        }

        let report = CycleReport { cycle, outcomes };
        log_cycle_complete(&report);
        report
    }

    /// 提问一个问题，失败不会向上传播
    async fn ask(&self, credential: &Credential, question: &Question) -> QuestionOutcome {
        let start = Instant::now();

        match self.executor.execute(credential, question).await {
            Ok(answer) => {
                let elapsed = start.elapsed();

                println!(
                    "问题 '{}' 的回答:\n{}",
                    truncate_text(question.text(), 50),
                    answer
                );

                info!("收到完整回答，耗时 {:.2}s", elapsed.as_secs_f64());
                info!("回答长度: {} 个字符", answer.char_count());

                QuestionOutcome::Answered {
                    question: question.clone(),
                    answer,
                    elapsed,
                }
            }
            Err(e) => {
                error!("❌ 问题处理失败: {}", e);
                QuestionOutcome::Skipped {
                    question: question.clone(),
                    error: e,
                }
            }
        }
    }
}
