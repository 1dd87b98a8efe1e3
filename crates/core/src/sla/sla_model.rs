//! SLA policy and status models.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Kind of periodic update a property owes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    ConstructionUpdate,
    RentalUpdate,
}

/// Freshness rule for one update type. Exactly one mode applies per policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum SlaMode {
    /// An update must land inside `[window_start_day, window_end_day]`
    /// (day-of-month bounds, 1-31) each month.
    MonthlyWindow {
        window_start_day: u32,
        window_end_day: u32,
    },
    /// An update must never be staler than `threshold_days`.
    DaysThreshold { threshold_days: i64 },
}

/// Per-update-type freshness policy, as stored upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SlaPolicy {
    pub update_type: UpdateType,
    #[serde(flatten)]
    pub mode: SlaMode,
}

/// Compliance state, recomputed on every evaluation and never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlaState {
    Compliant,
    Due,
    Overdue,
}

/// Evaluation result for one (property, update type) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SlaStatus {
    pub update_type: UpdateType,
    pub state: SlaState,
    pub days_until_due: Option<i64>,
    pub days_overdue: Option<i64>,
}

/// Injectable defaulting table for SLA evaluation. A missing policy row is an
/// expected first-use state, so every update type has a named default here,
/// and the due pre-warning ratio is policy data rather than a scattered
/// literal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SlaConfig {
    /// Fraction of a staleness threshold after which the state turns `Due`.
    pub due_warning_ratio: Decimal,
    pub construction_default: SlaMode,
    pub rental_default: SlaMode,
}

impl Default for SlaConfig {
    fn default() -> Self {
        Self {
            due_warning_ratio: dec!(0.8),
            construction_default: SlaMode::MonthlyWindow {
                window_start_day: 1,
                window_end_day: 5,
            },
            rental_default: SlaMode::DaysThreshold { threshold_days: 30 },
        }
    }
}

impl SlaConfig {
    pub fn default_mode_for(&self, update_type: UpdateType) -> &SlaMode {
        match update_type {
            UpdateType::ConstructionUpdate => &self.construction_default,
            UpdateType::RentalUpdate => &self.rental_default,
        }
    }
}
