//! Notification polling service.
//!
//! ## Overview
//!
//! The poller keeps "achievements not yet shown to the user" eventually
//! consistent with the stats backend:
//! 1. One immediate check on start, then re-checks on a fixed cadence
//! 2. Completion events are deduplicated by (goal id, completion time)
//! 3. Fresh events land in an ordered queue the UI renders and drains
//! 4. The `since` cursor advances only on a successful check, so a failed
//!    poll delays discovery but never skips it
//!
//! Checks never overlap: a timer tick or manual trigger that arrives
//! while a check is outstanding is skipped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, error, info, warn};

use crate::error::SourceError;
use crate::queue::NotificationQueue;
use crate::source::AchievementSource;
use crate::state::{PollerStats, SessionState, DEFAULT_DELIVERED_CAPACITY};
use crate::types::Achievement;

/// Poller configuration.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Interval between scheduled checks
    pub interval: Duration,
    /// Bound on remembered delivery keys
    pub delivered_capacity: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            delivered_capacity: DEFAULT_DELIVERED_CAPACITY,
        }
    }
}

/// Goal-achievement notification poller.
///
/// Cheap to clone; clones share the same queue and session state.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use aimstats_notify::{HttpSource, NotificationPoller, SourceConfig};
///
/// # async fn example() {
/// let source = Arc::new(HttpSource::new(SourceConfig::default()));
/// let poller = NotificationPoller::new(source);
///
/// poller.start();
/// let pending = poller.pending().await;
/// poller.stop().await;
/// # }
/// ```
#[derive(Clone)]
pub struct NotificationPoller {
    config: PollerConfig,
    source: Arc<dyn AchievementSource>,
    state: Arc<RwLock<SessionState>>,
    queue: Arc<RwLock<NotificationQueue>>,
    in_flight: Arc<AtomicBool>,
    shutdown_tx: Arc<Mutex<Option<mpsc::Sender<()>>>>,
}

impl NotificationPoller {
    /// Create a poller with the default configuration.
    pub fn new(source: Arc<dyn AchievementSource>) -> Self {
        Self::with_config(source, PollerConfig::default())
    }

    /// Create a poller with the given configuration.
    pub fn with_config(source: Arc<dyn AchievementSource>, config: PollerConfig) -> Self {
        Self {
            source,
            state: Arc::new(RwLock::new(SessionState::new(config.delivered_capacity))),
            queue: Arc::new(RwLock::new(NotificationQueue::new())),
            in_flight: Arc::new(AtomicBool::new(false)),
            shutdown_tx: Arc::new(Mutex::new(None)),
            config,
        }
    }

    /// Start the polling loop: one immediate check, then one per interval.
    ///
    /// A second call while running is a no-op.
    pub fn start(&self) {
        let (tx, rx) = mpsc::channel(1);

        {
            let mut shutdown = self.shutdown_tx.lock().expect("shutdown lock");
            if shutdown.is_some() {
                warn!("notification poller already running");
                return;
            }
            *shutdown = Some(tx);
        }

        info!(
            interval_ms = self.config.interval.as_millis() as u64,
            "Starting notification poller"
        );

        let poller = self.clone();
        tokio::spawn(async move {
            poller.run_poll_loop(rx).await;
        });
    }

    /// Stop the polling loop. No further checks run after this returns.
    ///
    /// An in-flight request is not aborted; its result merges through the
    /// same idempotent filtering as any other check.
    pub async fn stop(&self) {
        let tx = self.shutdown_tx.lock().expect("shutdown lock").take();
        if let Some(tx) = tx {
            info!("Stopping notification poller");
            let _ = tx.send(()).await;
        }
    }

    /// Whether the polling loop is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.shutdown_tx.lock().expect("shutdown lock").is_some()
    }

    /// Run one check outside the schedule (on-demand refresh).
    ///
    /// Infallible at this surface: failures are logged and retried by the
    /// next scheduled check.
    pub async fn check_now(&self) {
        self.check_achievements().await;
    }

    /// Ordered snapshot of pending notifications.
    pub async fn pending(&self) -> Vec<Achievement> {
        self.queue.read().await.pending()
    }

    /// Remove every pending notification for the given goal.
    ///
    /// Idempotent. The delivered-set is untouched, so a dismissed
    /// achievement cannot re-appear from a future poll of the same
    /// completion event.
    pub async fn dismiss(&self, goal_id: i64) {
        let removed = self.queue.write().await.dismiss(goal_id);
        if removed > 0 {
            debug!(goal_id, removed, "dismissed goal notifications");
        }
    }

    /// Snapshot of activity counters.
    pub async fn stats(&self) -> PollerStats {
        self.state.read().await.stats()
    }

    /// Session boundary (e.g. logout): clear cursor, delivered-set,
    /// counters, and the pending queue.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        let mut queue = self.queue.write().await;
        state.reset();
        queue.clear();
        info!("notification session state reset");
    }

    async fn run_poll_loop(self, mut shutdown_rx: mpsc::Receiver<()>) {
        // Initial check before the first tick
        self.check_achievements().await;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {
                    self.check_achievements().await;
                }
                _ = shutdown_rx.recv() => {
                    debug!("notification poll loop stopped");
                    break;
                }
            }
        }
    }

    async fn check_achievements(&self) {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("achievement check already in flight, skipping");
            return;
        }

        let since = self.state.read().await.cursor();

        match self.source.fetch(since).await {
            Ok(achievements) => {
                let total = achievements.len();
                let mut state = self.state.write().await;
                let mut queue = self.queue.write().await;

                let mut fresh = 0u64;
                for achievement in achievements {
                    let key = achievement.delivery_key();
                    if state.is_delivered(&key) {
                        continue;
                    }
                    state.mark_delivered(key);
                    queue.push(achievement);
                    fresh += 1;
                }

                // Cursor is client wall-clock time, not the achievements'
                // own timestamps: the backend clock may disagree with ours
                state.record_success(fresh, Utc::now());

                if fresh > 0 {
                    info!(new = fresh, total, "queued goal achievements");
                } else {
                    debug!(total, "achievement check found nothing new");
                }
            }
            Err(SourceError::Unavailable) => {
                // Endpoint not deployed yet: no warning noise
                debug!("achievements endpoint not available");
                self.state.write().await.record_failure();
            }
            Err(SourceError::Server { status, message }) => {
                warn!(status, message = %message, "achievement check failed");
                self.state.write().await.record_failure();
            }
            Err(err) => {
                error!(error = %err, "failed to check goal achievements");
                self.state.write().await.record_failure();
            }
        }

        self.in_flight.store(false, Ordering::SeqCst);
    }
}
