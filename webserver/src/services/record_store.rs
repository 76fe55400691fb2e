//! Supabase-backed optimization history
//!
//! Speaks PostgREST against the `optimizations` table. The store is an
//! optional collaborator: without `SUPABASE_URL`/`SUPABASE_KEY` it runs
//! disabled, and its own failures never leave this module.

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use shared::OptimizationRecord;

use crate::traits::RecordStore;

const TABLE_PATH: &str = "rest/v1/optimizations";

#[derive(Debug, Clone)]
struct StoreConfig {
    base_url: String,
    api_key: String,
}

/// Record store over Supabase PostgREST; disabled when unconfigured.
pub struct RealRecordStore {
    config: Option<StoreConfig>,
    http: reqwest::Client,
}

/// Insert payload; `id` and `created_at` are store-assigned.
#[derive(Serialize)]
struct InsertRecord<'a> {
    original_prompt: &'a str,
    optimized_prompt: &'a str,
    improvement_score: i32,
    improvements: &'a str,
}

impl RealRecordStore {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            config: Some(StoreConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key: api_key.to_string(),
            }),
            http: reqwest::Client::new(),
        }
    }

    /// Store with persistence disabled; saves are dropped and history is
    /// empty.
    pub fn disabled() -> Self {
        Self {
            config: None,
            http: reqwest::Client::new(),
        }
    }

    /// Resolve from `SUPABASE_URL`/`SUPABASE_KEY`; disabled when either is
    /// absent.
    pub fn from_env() -> Self {
        match (std::env::var("SUPABASE_URL"), std::env::var("SUPABASE_KEY")) {
            (Ok(url), Ok(key)) => Self::new(&url, &key),
            _ => {
                warn!("SUPABASE_URL or SUPABASE_KEY not set, history persistence disabled");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl RecordStore for RealRecordStore {
    async fn save(&self, record: OptimizationRecord) {
        let Some(config) = &self.config else { return };

        let payload = InsertRecord {
            original_prompt: &record.original_prompt,
            optimized_prompt: &record.optimized_prompt,
            improvement_score: record.improvement_score,
            improvements: &record.improvements,
        };

        let result = self
            .http
            .post(format!("{}/{}", config.base_url, TABLE_PATH))
            .header("apikey", &config.api_key)
            .header("Authorization", format!("Bearer {}", config.api_key))
            .header("Prefer", "return=minimal")
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                warn!(status = %response.status(), "record save rejected");
            }
            Err(error) => warn!(%error, "record save failed"),
            Ok(_) => {}
        }
    }

    async fn list(&self) -> Vec<OptimizationRecord> {
        let Some(config) = &self.config else {
            return Vec::new();
        };

        let result = self
            .http
            .get(format!("{}/{}", config.base_url, TABLE_PATH))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .header("apikey", &config.api_key)
            .header("Authorization", format!("Bearer {}", config.api_key))
            .send()
            .await;

        let response = match result {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(status = %response.status(), "history fetch rejected");
                return Vec::new();
            }
            Err(error) => {
                warn!(%error, "history fetch failed");
                return Vec::new();
            }
        };

        match response.json().await {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "history payload decode failed");
                Vec::new()
            }
        }
    }
}
