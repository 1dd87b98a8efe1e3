//! Cash-flow ledger domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{CalculatorError, Result};

/// Kind of a dated cash event against a property.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CashEventKind {
    Expense,
    Income,
    Payout,
}

/// A single dated cash event. `amount` is stored as a magnitude; the sign
/// convention (expenses negative, income and payouts positive) is applied by
/// `signed_amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashEvent {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub kind: CashEventKind,
}

impl CashEvent {
    pub fn new(date: NaiveDate, amount: Decimal, kind: CashEventKind) -> Self {
        Self { date, amount, kind }
    }

    /// Signed ledger amount: expenses negative, income and payouts positive.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            CashEventKind::Expense => -self.amount.abs(),
            CashEventKind::Income | CashEventKind::Payout => self.amount.abs(),
        }
    }
}

/// Chronological, append-only record of signed cash events for a property.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CashFlowLedger {
    events: Vec<CashEvent>,
}

impl CashFlowLedger {
    pub fn new(events: Vec<CashEvent>) -> Result<Self> {
        for window in events.windows(2) {
            if window[1].date < window[0].date {
                return Err(CalculatorError::UnsortedHistory {
                    kind: "cash flow",
                    date: window[1].date,
                }
                .into());
            }
        }
        Ok(Self { events })
    }

    pub fn events(&self) -> &[CashEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sum of income-kind events inside `[from, to]` (inclusive, optional
    /// bounds). Payouts and expenses are excluded; this feeds income goals.
    pub fn income_between(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Decimal {
        self.events
            .iter()
            .filter(|e| e.kind == CashEventKind::Income)
            .filter(|e| {
                from.map_or(true, |f| e.date >= f) && to.map_or(true, |t| e.date <= t)
            })
            .map(|e| e.signed_amount())
            .sum()
    }
}
