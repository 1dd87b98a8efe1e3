//! Construction timeline domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{CalculatorError, Result, ValidationError};

/// Minimum length of a justification for a reported progress decrease.
pub const MIN_DECREASE_REASON_LEN: usize = 10;

/// A dated construction progress report for a property under construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConstructionSnapshot {
    pub date: NaiveDate,
    /// Percent complete, 0-100.
    pub progress: Decimal,
    pub stage: Option<String>,
    pub reason_for_decrease: Option<String>,
}

impl ConstructionSnapshot {
    pub fn new(date: NaiveDate, progress: Decimal) -> Self {
        Self {
            date,
            progress,
            stage: None,
            reason_for_decrease: None,
        }
    }
}

/// Write-boundary rule for progress reports: progress may only decrease when
/// a justification of at least [`MIN_DECREASE_REASON_LEN`] characters
/// accompanies it. The timeline container itself tolerates historical
/// decreases, since they may legitimately exist in stored data.
pub fn validate_progress_update(
    previous: Option<&ConstructionSnapshot>,
    next: &ConstructionSnapshot,
) -> Result<()> {
    if next.progress < Decimal::ZERO || next.progress > Decimal::ONE_HUNDRED {
        return Err(ValidationError::InvalidInput(format!(
            "Construction progress must be within 0-100, got {}",
            next.progress
        ))
        .into());
    }
    if let Some(prev) = previous {
        if next.progress < prev.progress {
            let reason_len = next
                .reason_for_decrease
                .as_deref()
                .map_or(0, |r| r.trim().len());
            if reason_len < MIN_DECREASE_REASON_LEN {
                return Err(ValidationError::InvalidInput(format!(
                    "Progress decrease from {} to {} requires a reason of at least {} characters",
                    prev.progress, next.progress, MIN_DECREASE_REASON_LEN
                ))
                .into());
            }
        }
    }
    Ok(())
}

/// Ordered record of construction progress snapshots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstructionTimeline {
    snapshots: Vec<ConstructionSnapshot>,
}

impl ConstructionTimeline {
    pub fn new(snapshots: Vec<ConstructionSnapshot>) -> Result<Self> {
        for window in snapshots.windows(2) {
            if window[1].date < window[0].date {
                return Err(CalculatorError::UnsortedHistory {
                    kind: "construction",
                    date: window[1].date,
                }
                .into());
            }
        }
        Ok(Self { snapshots })
    }

    pub fn snapshots(&self) -> &[ConstructionSnapshot] {
        &self.snapshots
    }

    pub fn latest_progress(&self) -> Option<Decimal> {
        self.snapshots.last().map(|s| s.progress)
    }

    /// Net progress change inside `[from, to]`, for dashboard trend widgets.
    /// Decreases are carried through as-is rather than clamped away.
    pub fn progress_delta(&self, from: NaiveDate, to: NaiveDate) -> Option<Decimal> {
        let in_window: Vec<&ConstructionSnapshot> = self
            .snapshots
            .iter()
            .filter(|s| s.date >= from && s.date <= to)
            .collect();
        match (in_window.first(), in_window.last()) {
            (Some(first), Some(last)) => Some(last.progress - first.progress),
            _ => None,
        }
    }
}
