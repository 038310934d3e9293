//! Achievement source abstraction layer.
//!
//! Provides a trait-based interface over where completed achievements
//! come from:
//! - HTTP source for the stats backend's goals API
//! - Mock source for testing

pub mod http;
pub mod mock;
pub mod traits;

pub use http::{HttpSource, SourceConfig};
pub use mock::MockSource;
pub use traits::AchievementSource;
