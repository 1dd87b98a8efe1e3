//! Goals domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Closed set of trackable goal kinds. Each variant has exactly one resolver
/// in the tracker, matched exhaustively, so adding a kind is a compile-time
/// checked extension.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Roi,
    YearlyIncome,
    PropertiesCount,
    PortfolioValue,
    ValueGrowth,
}

/// User-driven goal lifecycle. Attainment is not a status: completion is
/// derived on every evaluation and a completed goal stays `Active` until the
/// owner archives it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    Archived,
}

/// Domain model representing a goal.
///
/// `property_id = None` scopes the goal to the owner's whole portfolio.
/// When `period_from`/`period_to` are set, only events inside the inclusive
/// window contribute to the current value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub owner_id: String,
    pub goal_type: GoalType,
    pub target_value: Decimal,
    pub property_id: Option<String>,
    pub period_from: Option<NaiveDate>,
    pub period_to: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    pub status: GoalStatus,
}

/// Evaluation result for a goal, recomputed on every read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: String,
    pub current_value: Option<Decimal>,
    pub progress_percent: Decimal,
    pub is_completed: bool,
}
