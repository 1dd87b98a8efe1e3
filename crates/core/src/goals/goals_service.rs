use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::Result;
use crate::properties::{
    CashFlowLedger, Property, PropertyRepositoryTrait, ValuationHistory,
};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::{Goal, GoalProgress, GoalType};

/// Per-property data a goal evaluation reads.
pub struct GoalInputs {
    pub property: Property,
    pub history: ValuationHistory,
    pub ledger: CashFlowLedger,
}

#[async_trait]
pub trait GoalTrackerServiceTrait: Send + Sync {
    /// Recomputes the current value and progress of a goal as of `as_of`.
    async fn evaluate_goal(&self, goal: &Goal, as_of: NaiveDate) -> Result<GoalProgress>;

    async fn evaluate_goals(&self, goals: &[Goal], as_of: NaiveDate)
        -> Result<Vec<GoalProgress>>;
}

pub struct GoalTrackerService {
    repository: Arc<dyn PropertyRepositoryTrait>,
}

impl GoalTrackerService {
    pub fn new(repository: Arc<dyn PropertyRepositoryTrait>) -> Self {
        Self { repository }
    }

    async fn load_inputs(&self, goal: &Goal) -> Result<Vec<GoalInputs>> {
        let properties = match &goal.property_id {
            Some(property_id) => vec![self.repository.get_property(property_id).await?],
            None => self.repository.list_properties(&goal.owner_id).await?,
        };

        let mut inputs = Vec::with_capacity(properties.len());
        for property in properties {
            let valuations = self.repository.get_valuations(&property.id).await?;
            let cash_events = self.repository.get_cash_events(&property.id).await?;
            let history = ValuationHistory::new(
                property.purchase_price,
                property.purchase_date,
                valuations,
            )?;
            let ledger = CashFlowLedger::new(cash_events)?;
            inputs.push(GoalInputs {
                property,
                history,
                ledger,
            });
        }
        Ok(inputs)
    }
}

#[async_trait]
impl GoalTrackerServiceTrait for GoalTrackerService {
    async fn evaluate_goal(&self, goal: &Goal, as_of: NaiveDate) -> Result<GoalProgress> {
        debug!("Evaluating goal '{}' as of {}", goal.id, as_of);

        if let (Some(from), Some(to)) = (goal.period_from, goal.period_to) {
            if from > to {
                // Rejected at creation upstream; treated as an empty window here.
                warn!(
                    "Goal '{}': period start {} is after period end {}",
                    goal.id, from, to
                );
            }
        }

        let inputs = self.load_inputs(goal).await?;
        let current_value = resolve_current_value(
            goal.goal_type,
            &inputs,
            goal.period_from,
            goal.period_to,
            as_of,
        );
        let progress = progress_percent(current_value, goal.target_value);

        Ok(GoalProgress {
            goal_id: goal.id.clone(),
            current_value: current_value.map(|v| v.round_dp(DISPLAY_DECIMAL_PRECISION)),
            progress_percent: progress.round_dp(DISPLAY_DECIMAL_PRECISION),
            is_completed: progress >= Decimal::ONE_HUNDRED,
        })
    }

    async fn evaluate_goals(
        &self,
        goals: &[Goal],
        as_of: NaiveDate,
    ) -> Result<Vec<GoalProgress>> {
        let mut results = Vec::with_capacity(goals.len());
        for goal in goals {
            results.push(self.evaluate_goal(goal, as_of).await?);
        }
        Ok(results)
    }
}

/// Progress toward a target, clamped to [0, 100]. Unknown current values and
/// non-positive targets resolve to zero progress, and overshooting the target
/// never pushes progress past 100.
pub fn progress_percent(current_value: Option<Decimal>, target_value: Decimal) -> Decimal {
    let current = match current_value {
        Some(value) => value,
        None => return Decimal::ZERO,
    };
    if target_value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (current / target_value * Decimal::ONE_HUNDRED).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Resolves the measured value for a goal kind over its scope and window.
/// One arm per [`GoalType`] variant, matched exhaustively.
pub fn resolve_current_value(
    goal_type: GoalType,
    inputs: &[GoalInputs],
    period_from: Option<NaiveDate>,
    period_to: Option<NaiveDate>,
    as_of: NaiveDate,
) -> Option<Decimal> {
    match goal_type {
        GoalType::Roi => mean_roi(inputs, period_from, period_to),
        GoalType::YearlyIncome => {
            // Without an explicit window an income goal reads the trailing year.
            let (from, to) = match (period_from, period_to) {
                (None, None) => (Some(as_of - Duration::days(365)), Some(as_of)),
                bounds => bounds,
            };
            Some(
                inputs
                    .iter()
                    .map(|i| i.ledger.income_between(from, to))
                    .sum(),
            )
        }
        GoalType::PropertiesCount => {
            let count = inputs.iter().filter(|i| !i.property.is_closed()).count();
            Some(Decimal::from(count as u64))
        }
        GoalType::PortfolioValue => Some(
            inputs
                .iter()
                .map(|i| {
                    windowed_estimate(&i.history, period_from, period_to)
                        .unwrap_or(i.history.purchase_price())
                })
                .sum(),
        ),
        GoalType::ValueGrowth => {
            let growths: Vec<Decimal> = inputs
                .iter()
                .filter_map(|i| {
                    windowed_estimate(&i.history, period_from, period_to)
                        .map(|estimate| estimate - i.history.purchase_price())
                })
                .collect();
            if growths.is_empty() {
                return None;
            }
            Some(growths.iter().sum())
        }
    }
}

/// Estimate used for valuation-based goals: the latest point overall, or the
/// latest point inside the goal window when one is set.
fn windowed_estimate(
    history: &ValuationHistory,
    period_from: Option<NaiveDate>,
    period_to: Option<NaiveDate>,
) -> Option<Decimal> {
    if period_from.is_none() && period_to.is_none() {
        history.current_estimate()
    } else {
        history.latest_value_in(period_from, period_to)
    }
}

/// Mean ROI over the properties where ROI is defined. Properties without an
/// estimate are excluded from the mean, never averaged in as 0%.
fn mean_roi(
    inputs: &[GoalInputs],
    period_from: Option<NaiveDate>,
    period_to: Option<NaiveDate>,
) -> Option<Decimal> {
    let rois: Vec<Decimal> = inputs
        .iter()
        .filter_map(|i| {
            let estimate = windowed_estimate(&i.history, period_from, period_to)?;
            let purchase_price = i.history.purchase_price();
            if purchase_price <= Decimal::ZERO {
                return None;
            }
            Some((estimate - purchase_price) / purchase_price * Decimal::ONE_HUNDRED)
        })
        .collect();
    if rois.is_empty() {
        return None;
    }
    let sum: Decimal = rois.iter().sum();
    let count = Decimal::from(rois.len() as u64);
    if count.is_zero() {
        return None;
    }
    Some(sum / count)
}
