//! Goal and achievement records shared across the crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked goal, as returned by the achievements endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    /// Unique goal identifier
    pub id: i64,
    /// Goal category (e.g. "score", "accuracy", "ttk")
    pub goal_type: String,
    /// Value the goal aims for
    pub target_value: f64,
    /// Latest recorded value
    pub current_value: f64,
    /// Human-readable description
    pub description: String,
    /// Task the goal is scoped to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_task_name: Option<String>,
    /// Set once the goal has been achieved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Achievement {
    /// Delivery key identifying this completion event.
    pub fn delivery_key(&self) -> DeliveryKey {
        DeliveryKey {
            goal_id: self.id,
            completed_at: self.completed_at,
        }
    }
}

/// Identity of a single completion event.
///
/// Keyed by goal id plus completion timestamp so a goal that is reset and
/// achieved again produces a fresh notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeliveryKey {
    /// Goal identifier
    pub goal_id: i64,
    /// Completion timestamp of the event
    pub completed_at: Option<DateTime<Utc>>,
}

/// Response body of the check-achievements endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckAchievementsResponse {
    /// Newly completed achievements; an absent field means none
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}
