//! HTTP source for the goals API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{header, Client, StatusCode};

use crate::error::{Result, SourceError};
use crate::source::traits::AchievementSource;
use crate::types::{Achievement, CheckAchievementsResponse};

/// Configuration for [`HttpSource`].
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL of the stats backend, e.g. `http://localhost:3000`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Optional bearer token for authenticated deployments
    pub api_key: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
            timeout_secs: 10,
            api_key: None,
        }
    }
}

/// HTTP client for the check-achievements endpoint.
pub struct HttpSource {
    config: SourceConfig,
    client: Client,
}

impl HttpSource {
    /// Create a new source from the given configuration.
    pub fn new(config: SourceConfig) -> Self {
        let mut headers = header::HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                    .expect("Invalid API key"),
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self { config, client }
    }

    /// Build the request URL with an optional `since` lower bound.
    fn check_achievements_url(&self, since: Option<DateTime<Utc>>) -> String {
        let mut url = format!("{}/api/goals/check-achievements", self.config.base_url);

        // RFC 3339 with the Z suffix: no characters needing query escaping
        if let Some(since) = since {
            url.push_str("?since=");
            url.push_str(&since.to_rfc3339_opts(SecondsFormat::Millis, true));
        }

        url
    }
}

#[async_trait]
impl AchievementSource for HttpSource {
    async fn fetch(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Achievement>> {
        let url = self.check_achievements_url(since);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SourceError::Unavailable);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Server {
                status,
                message: body,
            });
        }

        let body = response.text().await?;
        let parsed: CheckAchievementsResponse = serde_json::from_str(&body)?;
        Ok(parsed.achievements)
    }
}
