//! Valuation history domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{CalculatorError, Result};

/// A single appraisal or re-estimate of a property's value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationPoint {
    pub date: NaiveDate,
    pub value: Decimal,
    pub source: Option<String>,
    pub note: Option<String>,
}

impl ValuationPoint {
    pub fn new(date: NaiveDate, value: Decimal) -> Self {
        Self {
            date,
            value,
            source: None,
            note: None,
        }
    }
}

/// Ordered record of a property's value over time.
///
/// The purchase price acts as the implicit t0 valuation, so the history is
/// never empty even when no reassessment has been recorded yet. Construction
/// rejects structurally invalid input (non-positive purchase price, points
/// out of date order) with a hard error, since that indicates an upstream
/// data-integrity bug rather than an expected sparse-data state.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationHistory {
    purchase_price: Decimal,
    purchase_date: NaiveDate,
    points: Vec<ValuationPoint>,
}

impl ValuationHistory {
    pub fn new(
        purchase_price: Decimal,
        purchase_date: NaiveDate,
        points: Vec<ValuationPoint>,
    ) -> Result<Self> {
        if purchase_price <= Decimal::ZERO {
            return Err(
                CalculatorError::NonPositivePurchasePrice(purchase_price.to_string()).into(),
            );
        }
        for window in points.windows(2) {
            if window[1].date < window[0].date {
                return Err(CalculatorError::UnsortedHistory {
                    kind: "valuation",
                    date: window[1].date,
                }
                .into());
            }
        }
        Ok(Self {
            purchase_price,
            purchase_date,
            points,
        })
    }

    pub fn purchase_price(&self) -> Decimal {
        self.purchase_price
    }

    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    pub fn points(&self) -> &[ValuationPoint] {
        &self.points
    }

    /// Latest explicitly recorded estimate, if any reassessment exists.
    pub fn current_estimate(&self) -> Option<Decimal> {
        self.points.last().map(|p| p.value)
    }

    /// Basis for yield and portfolio-value figures: the latest estimate when
    /// one exists, the purchase price otherwise.
    pub fn current_basis(&self) -> Decimal {
        self.current_estimate().unwrap_or(self.purchase_price)
    }

    /// Date of the latest valuation, falling back to the purchase date when
    /// only the implicit t0 point exists.
    pub fn latest_date(&self) -> NaiveDate {
        self.points.last().map_or(self.purchase_date, |p| p.date)
    }

    /// Step-function value of the property as of `date`: the latest recorded
    /// point at or before `date`, else the purchase price.
    pub fn value_as_of(&self, date: NaiveDate) -> Decimal {
        self.points
            .iter()
            .rev()
            .find(|p| p.date <= date)
            .map_or(self.purchase_price, |p| p.value)
    }

    /// Latest recorded point inside `[from, to]` (both bounds inclusive and
    /// optional). Returns `None` when no point falls in the window.
    pub fn latest_value_in(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Option<Decimal> {
        self.points
            .iter()
            .rev()
            .find(|p| {
                from.map_or(true, |f| p.date >= f) && to.map_or(true, |t| p.date <= t)
            })
            .map(|p| p.value)
    }
}
