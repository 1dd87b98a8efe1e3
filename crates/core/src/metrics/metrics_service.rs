use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::Result;
use crate::properties::{CashFlowLedger, PropertyRepositoryTrait, ValuationHistory};

use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::metrics_calculator;
use super::PropertyMetrics;

#[async_trait]
pub trait MetricsServiceTrait: Send + Sync {
    /// Computes the full derived-metrics record for one property, rounded
    /// for display.
    async fn get_property_metrics(&self, property_id: &str) -> Result<PropertyMetrics>;
}

/// Fetches a property's histories through the repository seam and runs the
/// pure calculator over them. All actual math lives in
/// [`metrics_calculator`]; this service only orchestrates and rounds.
pub struct MetricsService {
    repository: Arc<dyn PropertyRepositoryTrait>,
}

impl MetricsService {
    pub fn new(repository: Arc<dyn PropertyRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl MetricsServiceTrait for MetricsService {
    async fn get_property_metrics(&self, property_id: &str) -> Result<PropertyMetrics> {
        debug!("Calculating metrics for property '{}'", property_id);

        let property = self.repository.get_property(property_id).await?;
        let valuations = self.repository.get_valuations(property_id).await?;
        let cash_events = self.repository.get_cash_events(property_id).await?;

        let history =
            ValuationHistory::new(property.purchase_price, property.purchase_date, valuations)?;
        let ledger = CashFlowLedger::new(cash_events)?;

        // The denormalized estimate on the property row should mirror the
        // latest valuation point. The history wins when they disagree.
        if property.current_estimate != history.current_estimate() {
            warn!(
                "Property '{}': current estimate {:?} does not match latest valuation {:?}",
                property_id,
                property.current_estimate,
                history.current_estimate()
            );
        }

        let metrics = metrics_calculator::calculate_property_metrics(&property, &history, &ledger);
        Ok(metrics.round_dp(DISPLAY_DECIMAL_PRECISION))
    }
}
