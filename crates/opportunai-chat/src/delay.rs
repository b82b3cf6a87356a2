//! Reply delay strategies.
//!
//! The session waits on a [`Delay`] before revealing each bot turn. The
//! application uses a fixed delay; tests drive the session with
//! [`NoDelay`] or release replies one at a time with [`ManualDelay`].

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

/// Default wait before a bot reply becomes visible.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(800);

#[async_trait]
pub trait Delay: Send + Sync {
    /// Resolve once the reply may be revealed.
    async fn wait(&self);
}

/// Sleeps for the same duration before every reply.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    duration: Duration,
}

impl FixedDelay {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

#[async_trait]
impl Delay for FixedDelay {
    async fn wait(&self) {
        tokio::time::sleep(self.duration).await;
    }
}

/// Reveals replies immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self) {}
}

/// Holds every reply until [`ManualDelay::release`] is called.
///
/// Each release lets exactly one waiting reply through. A release issued
/// before the reply starts waiting is remembered.
#[derive(Debug, Default)]
pub struct ManualDelay {
    gate: Notify,
}

impl ManualDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl Delay for ManualDelay {
    async fn wait(&self) {
        self.gate.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_fixed_delay_default() {
        assert_eq!(FixedDelay::default().duration(), Duration::from_millis(800));
        assert_eq!(FixedDelay::from_millis(5).duration(), Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_waits_full_duration() {
        let start = tokio::time::Instant::now();
        FixedDelay::from_millis(800).wait().await;
        assert!(start.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test]
    async fn test_manual_delay_release_before_wait() {
        let delay = ManualDelay::new();
        delay.release();
        tokio::time::timeout(Duration::from_secs(1), delay.wait())
            .await
            .expect("stored release should let the wait through");
    }

    #[tokio::test]
    async fn test_manual_delay_blocks_until_release() {
        let delay = Arc::new(ManualDelay::new());
        let waiter = {
            let delay = Arc::clone(&delay);
            tokio::spawn(async move { delay.wait().await })
        };
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        delay.release();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }
}
