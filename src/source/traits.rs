//! Core trait for achievement sources.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::types::Achievement;

/// Abstraction over where completed achievements come from.
///
/// The poller only talks to this trait; production uses
/// [`HttpSource`](crate::source::HttpSource), tests script a
/// [`MockSource`](crate::source::MockSource).
#[async_trait]
pub trait AchievementSource: Send + Sync {
    /// Fetch achievements completed after `since`.
    ///
    /// `None` means no lower bound: the source returns every currently
    /// outstanding achievement.
    async fn fetch(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Achievement>>;
}
