//! Derived-metrics data contracts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived decision metrics for a single property.
///
/// Every field is independently nullable: `None` means "no reliable figure",
/// which is distinct from zero throughout the engine. A newly purchased
/// property legitimately has most of these unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMetrics {
    pub property_id: String,
    pub roi: Option<Decimal>,
    pub value_growth: Option<Decimal>,
    pub value_growth_percent: Option<Decimal>,
    pub cagr: Option<Decimal>,
    pub irr: Option<Decimal>,
    pub payback_period_years: Option<Decimal>,
    pub yield_percent: Option<Decimal>,
    pub forecast_annual_income: Option<Decimal>,
}

impl PropertyMetrics {
    /// Rounds every present field to `dp` decimal places.
    pub fn round_dp(mut self, dp: u32) -> Self {
        self.roi = self.roi.map(|v| v.round_dp(dp));
        self.value_growth = self.value_growth.map(|v| v.round_dp(dp));
        self.value_growth_percent = self.value_growth_percent.map(|v| v.round_dp(dp));
        self.cagr = self.cagr.map(|v| v.round_dp(dp));
        self.irr = self.irr.map(|v| v.round_dp(dp));
        self.payback_period_years = self.payback_period_years.map(|v| v.round_dp(dp));
        self.yield_percent = self.yield_percent.map(|v| v.round_dp(dp));
        self.forecast_annual_income = self.forecast_annual_income.map(|v| v.round_dp(dp));
        self
    }
}
