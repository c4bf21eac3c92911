//! Activity persistence port

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use worktracker_domain::{ActivitySample, Result};

/// Storage abstraction for 30-second activity samples.
#[async_trait]
pub trait SampleRepository: Send + Sync {
    /// Persist one sample and return its row id.
    async fn save_sample(&self, sample: &ActivitySample) -> Result<i64>;

    /// All samples for a member within `[start, end]`, ordered by timestamp
    /// ascending.
    async fn find_samples(
        &self,
        username: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ActivitySample>>;
}
