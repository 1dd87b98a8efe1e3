use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::Result;
use crate::metrics::{metrics_calculator, PropertyMetrics};
use crate::properties::{
    CashFlowLedger, ConstructionTimeline, Property, PropertyRepositoryTrait, ValuationHistory,
};
use crate::sla::{SlaEvaluator, SlaRepositoryTrait, SlaStatus, UpdateType};

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::{PortfolioSummary, RegionBreakdown, StatusBreakdown, ValueHistoryPoint};

/// Cap on the regions listed in a portfolio summary.
const TOP_REGIONS_LIMIT: usize = 5;

/// One property's fully loaded analytics inputs.
pub struct PortfolioEntry {
    pub property: Property,
    pub history: ValuationHistory,
    pub ledger: CashFlowLedger,
}

#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Owner-level roll-up across all of the owner's properties.
    async fn get_portfolio_summary(&self, owner_id: &str) -> Result<PortfolioSummary>;

    /// Per-property metrics for every property of an owner, display-rounded.
    async fn get_properties_metrics(&self, owner_id: &str) -> Result<Vec<PropertyMetrics>>;

    /// SLA freshness state for one (property, update type) pair as of `today`.
    async fn get_sla_status(
        &self,
        property_id: &str,
        update_type: UpdateType,
        today: NaiveDate,
    ) -> Result<SlaStatus>;

    /// Net construction progress change for a property inside `[from, to]`.
    async fn get_construction_progress_trend(
        &self,
        property_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Option<Decimal>>;
}

/// Facade the transport layer (REST handler, CLI, batch job) calls. Holds the
/// data seams and the SLA evaluator; every calculation is delegated to the
/// pure calculator and aggregation functions.
pub struct PortfolioService {
    repository: Arc<dyn PropertyRepositoryTrait>,
    sla_repository: Arc<dyn SlaRepositoryTrait>,
    sla_evaluator: SlaEvaluator,
}

impl PortfolioService {
    pub fn new(
        repository: Arc<dyn PropertyRepositoryTrait>,
        sla_repository: Arc<dyn SlaRepositoryTrait>,
        sla_evaluator: SlaEvaluator,
    ) -> Self {
        Self {
            repository,
            sla_repository,
            sla_evaluator,
        }
    }

    async fn load_entries(&self, owner_id: &str) -> Result<Vec<PortfolioEntry>> {
        let properties = self.repository.list_properties(owner_id).await?;
        let mut entries = Vec::with_capacity(properties.len());
        for property in properties {
            let valuations = self.repository.get_valuations(&property.id).await?;
            let cash_events = self.repository.get_cash_events(&property.id).await?;
            let history = ValuationHistory::new(
                property.purchase_price,
                property.purchase_date,
                valuations,
            )?;
            let ledger = CashFlowLedger::new(cash_events)?;
            entries.push(PortfolioEntry {
                property,
                history,
                ledger,
            });
        }
        Ok(entries)
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn get_portfolio_summary(&self, owner_id: &str) -> Result<PortfolioSummary> {
        debug!("Building portfolio summary for owner '{}'", owner_id);
        let entries = self.load_entries(owner_id).await?;
        Ok(summarize_portfolio(owner_id, &entries))
    }

    async fn get_properties_metrics(&self, owner_id: &str) -> Result<Vec<PropertyMetrics>> {
        let entries = self.load_entries(owner_id).await?;
        Ok(entries
            .iter()
            .map(|e| {
                metrics_calculator::calculate_property_metrics(&e.property, &e.history, &e.ledger)
                    .round_dp(DISPLAY_DECIMAL_PRECISION)
            })
            .collect())
    }

    async fn get_sla_status(
        &self,
        property_id: &str,
        update_type: UpdateType,
        today: NaiveDate,
    ) -> Result<SlaStatus> {
        let property = self.repository.get_property(property_id).await?;
        let policy = self.sla_repository.get_policy(update_type).await?;
        let last_update_at = self
            .sla_repository
            .get_last_update_at(property_id, update_type)
            .await?;

        Ok(self.sla_evaluator.evaluate(
            update_type,
            policy.as_ref(),
            last_update_at,
            property.created_at,
            today,
        ))
    }

    async fn get_construction_progress_trend(
        &self,
        property_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Option<Decimal>> {
        let snapshots = self
            .repository
            .get_construction_snapshots(property_id)
            .await?;
        let timeline = ConstructionTimeline::new(snapshots)?;
        Ok(timeline.progress_delta(from, to))
    }
}

/// Folds per-property inputs into the owner-level summary. Pure; the facade
/// only feeds it loaded entries.
pub fn summarize_portfolio(owner_id: &str, entries: &[PortfolioEntry]) -> PortfolioSummary {
    let total_purchase_value: Decimal = entries
        .iter()
        .map(|e| e.history.purchase_price())
        .sum();
    let total_current_value: Decimal = entries
        .iter()
        .map(|e| {
            e.history
                .current_estimate()
                .unwrap_or(e.history.purchase_price())
        })
        .sum();

    PortfolioSummary {
        owner_id: owner_id.to_string(),
        properties_count: entries.len() as u32,
        total_purchase_value: total_purchase_value.round_dp(DISPLAY_DECIMAL_PRECISION),
        total_current_value: total_current_value.round_dp(DISPLAY_DECIMAL_PRECISION),
        average_roi: average_roi(entries).map(|v| v.round_dp(DISPLAY_DECIMAL_PRECISION)),
        status_distribution: status_distribution(entries),
        top_regions: top_regions(entries),
        value_history: value_history(entries),
    }
}

/// Mean of per-property ROI over the properties where ROI is defined.
fn average_roi(entries: &[PortfolioEntry]) -> Option<Decimal> {
    let rois: Vec<Decimal> = entries
        .iter()
        .filter_map(|e| metrics_calculator::roi(&e.history))
        .collect();
    if rois.is_empty() {
        return None;
    }
    let sum: Decimal = rois.iter().sum();
    Some(sum / Decimal::from(rois.len() as u64))
}

fn status_distribution(entries: &[PortfolioEntry]) -> Vec<StatusBreakdown> {
    let mut counts = HashMap::new();
    for entry in entries {
        *counts.entry(entry.property.status).or_insert(0u32) += 1;
    }
    let mut breakdown: Vec<StatusBreakdown> = counts
        .into_iter()
        .map(|(status, count)| StatusBreakdown { status, count })
        .collect();
    breakdown.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.status.as_str().cmp(b.status.as_str()))
    });
    breakdown
}

fn top_regions(entries: &[PortfolioEntry]) -> Vec<RegionBreakdown> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for entry in entries {
        if let Some(region) = entry.property.region.as_deref() {
            *counts.entry(region).or_insert(0) += 1;
        }
    }
    let mut breakdown: Vec<RegionBreakdown> = counts
        .into_iter()
        .map(|(region, count)| RegionBreakdown {
            region: region.to_string(),
            count,
        })
        .collect();
    breakdown.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.region.cmp(&b.region)));
    breakdown.truncate(TOP_REGIONS_LIMIT);
    breakdown
}

/// Portfolio value series with one point per distinct valuation or purchase
/// date. Each property contributes from its purchase date onward, carrying
/// its latest known value forward between points.
fn value_history(entries: &[PortfolioEntry]) -> Vec<ValueHistoryPoint> {
    let mut dates = BTreeSet::new();
    for entry in entries {
        dates.insert(entry.history.purchase_date());
        for point in entry.history.points() {
            dates.insert(point.date);
        }
    }

    dates
        .into_iter()
        .map(|date| {
            let owned: Vec<&PortfolioEntry> = entries
                .iter()
                .filter(|e| e.history.purchase_date() <= date)
                .collect();
            let purchase_value: Decimal =
                owned.iter().map(|e| e.history.purchase_price()).sum();
            let current_value: Decimal =
                owned.iter().map(|e| e.history.value_as_of(date)).sum();
            ValueHistoryPoint {
                date,
                purchase_value: purchase_value.round_dp(DISPLAY_DECIMAL_PRECISION),
                current_value: current_value.round_dp(DISPLAY_DECIMAL_PRECISION),
            }
        })
        .collect()
}
