//! Portfolio summary data contracts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::properties::PropertyStatus;

/// Property count for one lifecycle status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub status: PropertyStatus,
    pub count: u32,
}

/// Property count for one region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegionBreakdown {
    pub region: String,
    pub count: u32,
}

/// One charting point of the portfolio value series. Both figures are
/// resampled to the point's date: the purchase value covers every property
/// acquired by then, the current value carries each property's latest known
/// valuation forward as a step function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValueHistoryPoint {
    pub date: NaiveDate,
    pub purchase_value: Decimal,
    pub current_value: Decimal,
}

/// Owner-level roll-up of per-property metrics, consumed by dashboards and
/// reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub owner_id: String,
    pub properties_count: u32,
    pub total_purchase_value: Decimal,
    /// Sum of current estimates, substituting the purchase price where no
    /// estimate exists yet (chart continuity; ROI averaging does not do this).
    pub total_current_value: Decimal,
    /// Mean ROI over the properties where ROI is defined. `None` when no
    /// property has one; missing estimates are never averaged in as 0%.
    pub average_roi: Option<Decimal>,
    pub status_distribution: Vec<StatusBreakdown>,
    pub top_regions: Vec<RegionBreakdown>,
    pub value_history: Vec<ValueHistoryPoint>,
}
