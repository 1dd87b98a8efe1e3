use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use super::{SlaPolicy, UpdateType};

/// Lookup seam for SLA policies and update timestamps. A `None` policy is an
/// expected first-use state and triggers the configured defaults, never an
/// error.
#[async_trait]
pub trait SlaRepositoryTrait: Send + Sync {
    async fn get_policy(&self, update_type: UpdateType) -> Result<Option<SlaPolicy>>;

    async fn get_last_update_at(
        &self,
        property_id: &str,
        update_type: UpdateType,
    ) -> Result<Option<NaiveDate>>;
}
