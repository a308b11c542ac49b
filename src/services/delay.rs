//! 等待能力
//!
//! 重试间隔和问题间隔都通过 [`Delay`] 完成，测试中替换为 [`RecordingDelay`]

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

#[async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// 真实等待
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// 只记录等待时长，立即返回
#[derive(Debug, Default)]
pub struct RecordingDelay {
    calls: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按调用顺序返回所有等待时长
    pub fn calls(&self) -> Vec<Duration> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// 等待时长总和
    pub fn total(&self) -> Duration {
        self.calls().iter().sum()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_delay_does_not_wait() {
        let delay = RecordingDelay::new();
        delay.sleep(Duration::from_secs(3600)).await;
        delay.sleep(Duration::from_secs(5)).await;

        assert_eq!(
            delay.calls(),
            vec![Duration::from_secs(3600), Duration::from_secs(5)]
        );
        assert_eq!(delay.total(), Duration::from_secs(3605));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_delay_advances_clock() {
        let start = tokio::time::Instant::now();
        TokioDelay.sleep(Duration::from_secs(5)).await;
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
