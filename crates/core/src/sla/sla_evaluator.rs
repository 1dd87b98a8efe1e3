use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use super::{SlaConfig, SlaMode, SlaPolicy, SlaState, SlaStatus, UpdateType};

/// Evaluates update freshness for a (property, update type) pair.
///
/// Stateless: the status is recomputed from the policy, the last update
/// timestamp, and the evaluation date on every call. A missing policy falls
/// back to the configured per-type default.
pub struct SlaEvaluator {
    config: SlaConfig,
}

impl Default for SlaEvaluator {
    fn default() -> Self {
        Self::new(SlaConfig::default())
    }
}

impl SlaEvaluator {
    pub fn new(config: SlaConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(
        &self,
        update_type: UpdateType,
        policy: Option<&SlaPolicy>,
        last_update_at: Option<NaiveDate>,
        property_created_at: NaiveDate,
        today: NaiveDate,
    ) -> SlaStatus {
        let mode = policy
            .map(|p| &p.mode)
            .unwrap_or_else(|| self.config.default_mode_for(update_type));

        match *mode {
            SlaMode::DaysThreshold { threshold_days } => self.evaluate_days_threshold(
                update_type,
                threshold_days,
                last_update_at,
                property_created_at,
                today,
            ),
            SlaMode::MonthlyWindow {
                window_start_day,
                window_end_day,
            } => evaluate_monthly_window(
                update_type,
                window_start_day,
                window_end_day,
                last_update_at,
                property_created_at,
                today,
            ),
        }
    }

    fn evaluate_days_threshold(
        &self,
        update_type: UpdateType,
        threshold_days: i64,
        last_update_at: Option<NaiveDate>,
        property_created_at: NaiveDate,
        today: NaiveDate,
    ) -> SlaStatus {
        // With no update ever recorded, staleness is measured from creation:
        // overdue once the property outlives one full threshold period.
        let days_stale = match last_update_at {
            Some(last) => (today - last).num_days().max(0),
            None => {
                let age = (today - property_created_at).num_days().max(0);
                return if age > threshold_days {
                    SlaStatus {
                        update_type,
                        state: SlaState::Overdue,
                        days_until_due: None,
                        days_overdue: Some(age - threshold_days),
                    }
                } else {
                    SlaStatus {
                        update_type,
                        state: SlaState::Due,
                        days_until_due: Some(threshold_days - age),
                        days_overdue: None,
                    }
                };
            }
        };

        if days_stale >= threshold_days {
            return SlaStatus {
                update_type,
                state: SlaState::Overdue,
                days_until_due: None,
                days_overdue: Some(days_stale - threshold_days),
            };
        }

        let due_cutoff = Decimal::from(threshold_days) * self.config.due_warning_ratio;
        let state = if Decimal::from(days_stale) >= due_cutoff {
            SlaState::Due
        } else {
            SlaState::Compliant
        };
        SlaStatus {
            update_type,
            state,
            days_until_due: Some(threshold_days - days_stale),
            days_overdue: None,
        }
    }
}

fn evaluate_monthly_window(
    update_type: UpdateType,
    window_start_day: u32,
    window_end_day: u32,
    last_update_at: Option<NaiveDate>,
    property_created_at: NaiveDate,
    today: NaiveDate,
) -> SlaStatus {
    let (window_start, window_end) =
        month_window(today, window_start_day, window_end_day);

    let last = match last_update_at {
        Some(last) => last,
        None => {
            // One full evaluation cycle is one month of existence.
            let one_cycle_old = property_created_at
                .checked_add_months(Months::new(1))
                .map_or(false, |cutoff| cutoff <= today);
            return if one_cycle_old {
                let closed_end = last_closed_window_end(today, window_start_day, window_end_day);
                SlaStatus {
                    update_type,
                    state: SlaState::Overdue,
                    days_until_due: None,
                    days_overdue: Some((today - closed_end).num_days().max(0)),
                }
            } else {
                let upcoming_end = if today > window_end {
                    month_window(
                        next_month(today),
                        window_start_day,
                        window_end_day,
                    )
                    .1
                } else {
                    window_end
                };
                SlaStatus {
                    update_type,
                    state: SlaState::Due,
                    days_until_due: Some((upcoming_end - today).num_days()),
                    days_overdue: None,
                }
            };
        }
    };

    if last >= window_start && last <= window_end {
        // An update already landed inside this month's window.
        let next_start = month_window(next_month(today), window_start_day, window_end_day).0;
        return SlaStatus {
            update_type,
            state: SlaState::Compliant,
            days_until_due: Some((next_start - today).num_days()),
            days_overdue: None,
        };
    }

    if today < window_start {
        // The window has not opened yet, nothing is overdue.
        return SlaStatus {
            update_type,
            state: SlaState::Compliant,
            days_until_due: Some((window_start - today).num_days()),
            days_overdue: None,
        };
    }

    if today <= window_end {
        return SlaStatus {
            update_type,
            state: SlaState::Due,
            days_until_due: Some((window_end - today).num_days()),
            days_overdue: None,
        };
    }

    SlaStatus {
        update_type,
        state: SlaState::Overdue,
        days_until_due: None,
        days_overdue: Some((today - window_end).num_days()),
    }
}

/// The month's update window, with day bounds clamped to the month length
/// and the end never preceding the start.
fn month_window(in_month: NaiveDate, start_day: u32, end_day: u32) -> (NaiveDate, NaiveDate) {
    let last_day = days_in_month(in_month);
    let start = start_day.clamp(1, last_day);
    let end = end_day.clamp(start, last_day);
    (
        in_month.with_day(start).unwrap_or(in_month),
        in_month.with_day(end).unwrap_or(in_month),
    )
}

/// End date of the most recent window that has fully closed.
fn last_closed_window_end(today: NaiveDate, start_day: u32, end_day: u32) -> NaiveDate {
    let (_, current_end) = month_window(today, start_day, end_day);
    if today > current_end {
        current_end
    } else {
        month_window(previous_month(today), start_day, end_day).1
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    let next = first
        .checked_add_months(Months::new(1))
        .unwrap_or(first);
    (next - first).num_days() as u32
}

fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

fn previous_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}
