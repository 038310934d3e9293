//! Goal-achievement notification polling for the aimstats dashboard.
//!
//! Maintains an eventually-consistent view of "achievements not yet shown
//! to the user":
//! - Polls the stats backend on a fixed cadence (plus on-demand checks)
//! - Deduplicates completion events by goal id + completion timestamp
//! - Exposes an ordered notification queue with dismiss semantics
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use aimstats_notify::{HttpSource, NotificationPoller, SourceConfig};
//!
//! # async fn example() {
//! let source = Arc::new(HttpSource::new(SourceConfig {
//!     base_url: "http://localhost:3000".into(),
//!     ..Default::default()
//! }));
//!
//! let poller = NotificationPoller::new(source);
//! poller.start();
//!
//! // Render pending notifications, dismiss on user action
//! for achievement in poller.pending().await {
//!     println!("{}", achievement.description);
//!     poller.dismiss(achievement.id).await;
//! }
//!
//! poller.stop().await;
//! # }
//! ```

pub mod error;
pub mod poller;
pub mod queue;
pub mod source;
pub mod state;
pub mod types;

// Re-export main types
pub use error::{Result, SourceError};
pub use poller::{NotificationPoller, PollerConfig};
pub use queue::NotificationQueue;
pub use source::{AchievementSource, HttpSource, MockSource, SourceConfig};
pub use state::{PollerStats, SessionState};
pub use types::{Achievement, CheckAchievementsResponse, DeliveryKey};
