//! Scripted achievement source for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{Result, SourceError};
use crate::source::traits::AchievementSource;
use crate::types::Achievement;

/// Scripted source for unit tests.
///
/// Outcomes are consumed in order; once the script is exhausted the
/// source keeps returning empty success. Records every `since` argument
/// it was called with.
pub struct MockSource {
    script: Mutex<VecDeque<Result<Vec<Achievement>>>>,
    seen_since: Mutex<Vec<Option<DateTime<Utc>>>>,
    delay: Option<Duration>,
    call_count: AtomicU32,
}

impl MockSource {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            seen_since: Mutex::new(Vec::new()),
            delay: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// Delay every fetch, to exercise overlap behavior.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Script a successful fetch.
    pub fn enqueue_ok(&self, achievements: Vec<Achievement>) {
        self.script
            .lock()
            .expect("mock script lock")
            .push_back(Ok(achievements));
    }

    /// Script a failed fetch.
    pub fn enqueue_err(&self, err: SourceError) {
        self.script
            .lock()
            .expect("mock script lock")
            .push_back(Err(err));
    }

    /// Number of times fetch was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Every `since` argument seen so far, in call order.
    pub fn seen_since(&self) -> Vec<Option<DateTime<Utc>>> {
        self.seen_since.lock().expect("mock since lock").clone()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AchievementSource for MockSource {
    async fn fetch(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Achievement>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.seen_since
            .lock()
            .expect("mock since lock")
            .push(since);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.script.lock().expect("mock script lock").pop_front();
        match scripted {
            Some(outcome) => outcome,
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_consumed_in_order() {
        let source = MockSource::new();
        source.enqueue_err(SourceError::Unavailable);
        source.enqueue_ok(Vec::new());

        assert!(source.fetch(None).await.is_err());
        assert!(source.fetch(None).await.is_ok());

        // Exhausted script keeps succeeding
        assert!(source.fetch(None).await.unwrap().is_empty());
        assert_eq!(source.call_count(), 3);
    }

    #[tokio::test]
    async fn test_since_arguments_recorded() {
        let source = MockSource::new();
        let now = Utc::now();

        source.fetch(None).await.unwrap();
        source.fetch(Some(now)).await.unwrap();

        assert_eq!(source.seen_since(), vec![None, Some(now)]);
    }
}
