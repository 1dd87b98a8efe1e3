//! Unit tests for the property history containers.

use super::*;
use crate::errors::Error;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn valuation_history_rejects_non_positive_purchase_price() {
    let result = ValuationHistory::new(Decimal::ZERO, date(2023, 1, 1), vec![]);
    assert!(matches!(result, Err(Error::Calculation(_))));

    let result = ValuationHistory::new(dec!(-5), date(2023, 1, 1), vec![]);
    assert!(matches!(result, Err(Error::Calculation(_))));
}

#[test]
fn valuation_history_rejects_unsorted_points() {
    let points = vec![
        ValuationPoint::new(date(2024, 6, 1), dec!(1100000)),
        ValuationPoint::new(date(2024, 1, 1), dec!(1050000)),
    ];
    let result = ValuationHistory::new(dec!(1000000), date(2023, 1, 1), points);
    assert!(matches!(result, Err(Error::Calculation(_))));
}

#[test]
fn valuation_history_without_points_falls_back_to_purchase() {
    let history = ValuationHistory::new(dec!(1000000), date(2023, 1, 1), vec![]).unwrap();
    assert_eq!(history.current_estimate(), None);
    assert_eq!(history.latest_date(), date(2023, 1, 1));
    assert_eq!(history.value_as_of(date(2024, 1, 1)), dec!(1000000));
}

#[test]
fn value_as_of_carries_latest_point_forward() {
    let points = vec![
        ValuationPoint::new(date(2023, 6, 1), dec!(1100000)),
        ValuationPoint::new(date(2024, 6, 1), dec!(1250000)),
    ];
    let history = ValuationHistory::new(dec!(1000000), date(2023, 1, 1), points).unwrap();

    assert_eq!(history.value_as_of(date(2023, 3, 1)), dec!(1000000));
    assert_eq!(history.value_as_of(date(2023, 6, 1)), dec!(1100000));
    assert_eq!(history.value_as_of(date(2024, 2, 1)), dec!(1100000));
    assert_eq!(history.value_as_of(date(2025, 1, 1)), dec!(1250000));
}

#[test]
fn latest_value_in_honors_inclusive_window() {
    let points = vec![
        ValuationPoint::new(date(2023, 6, 1), dec!(1100000)),
        ValuationPoint::new(date(2024, 6, 1), dec!(1250000)),
    ];
    let history = ValuationHistory::new(dec!(1000000), date(2023, 1, 1), points).unwrap();

    assert_eq!(
        history.latest_value_in(Some(date(2023, 1, 1)), Some(date(2023, 12, 31))),
        Some(dec!(1100000))
    );
    assert_eq!(
        history.latest_value_in(Some(date(2023, 6, 1)), Some(date(2023, 6, 1))),
        Some(dec!(1100000))
    );
    assert_eq!(
        history.latest_value_in(Some(date(2025, 1, 1)), Some(date(2025, 12, 31))),
        None
    );
    // Inverted window matches nothing rather than crashing.
    assert_eq!(
        history.latest_value_in(Some(date(2024, 12, 31)), Some(date(2023, 1, 1))),
        None
    );
}

#[test]
fn cash_event_sign_convention() {
    let expense = CashEvent::new(date(2024, 1, 10), dec!(500), CashEventKind::Expense);
    let income = CashEvent::new(date(2024, 1, 20), dec!(1200), CashEventKind::Income);
    let payout = CashEvent::new(date(2024, 1, 30), dec!(300), CashEventKind::Payout);

    assert_eq!(expense.signed_amount(), dec!(-500));
    assert_eq!(income.signed_amount(), dec!(1200));
    assert_eq!(payout.signed_amount(), dec!(300));

    // Magnitudes are normalized even if the caller pre-signed the amount.
    let pre_signed = CashEvent::new(date(2024, 2, 1), dec!(-500), CashEventKind::Expense);
    assert_eq!(pre_signed.signed_amount(), dec!(-500));
}

#[test]
fn ledger_rejects_unsorted_events() {
    let events = vec![
        CashEvent::new(date(2024, 3, 1), dec!(100), CashEventKind::Income),
        CashEvent::new(date(2024, 1, 1), dec!(100), CashEventKind::Income),
    ];
    assert!(matches!(
        CashFlowLedger::new(events),
        Err(Error::Calculation(_))
    ));
}

#[test]
fn income_between_sums_only_income_in_window() {
    let events = vec![
        CashEvent::new(date(2024, 1, 5), dec!(1000), CashEventKind::Income),
        CashEvent::new(date(2024, 2, 5), dec!(400), CashEventKind::Expense),
        CashEvent::new(date(2024, 3, 5), dec!(2000), CashEventKind::Income),
        CashEvent::new(date(2024, 4, 5), dec!(900), CashEventKind::Payout),
        CashEvent::new(date(2024, 6, 5), dec!(3000), CashEventKind::Income),
    ];
    let ledger = CashFlowLedger::new(events).unwrap();

    assert_eq!(
        ledger.income_between(Some(date(2024, 1, 1)), Some(date(2024, 5, 1))),
        dec!(3000)
    );
    assert_eq!(ledger.income_between(None, None), dec!(6000));
    // Inverted window is empty.
    assert_eq!(
        ledger.income_between(Some(date(2024, 6, 1)), Some(date(2024, 1, 1))),
        Decimal::ZERO
    );
}

#[test]
fn progress_decrease_requires_substantial_reason() {
    let prev = ConstructionSnapshot::new(date(2024, 1, 1), dec!(60));
    let mut next = ConstructionSnapshot::new(date(2024, 2, 1), dec!(45));

    assert!(validate_progress_update(Some(&prev), &next).is_err());

    next.reason_for_decrease = Some("too short".to_string());
    assert!(validate_progress_update(Some(&prev), &next).is_err());

    next.reason_for_decrease = Some("facade rework after inspection".to_string());
    assert!(validate_progress_update(Some(&prev), &next).is_ok());
}

#[test]
fn progress_update_bounds_checked() {
    let next = ConstructionSnapshot::new(date(2024, 2, 1), dec!(101));
    assert!(validate_progress_update(None, &next).is_err());

    let next = ConstructionSnapshot::new(date(2024, 2, 1), dec!(-1));
    assert!(validate_progress_update(None, &next).is_err());
}

#[test]
fn timeline_tolerates_historical_decreases() {
    let mut decreased = ConstructionSnapshot::new(date(2024, 3, 1), dec!(40));
    decreased.reason_for_decrease = Some("structural issue found on site".to_string());
    let snapshots = vec![
        ConstructionSnapshot::new(date(2024, 1, 1), dec!(30)),
        ConstructionSnapshot::new(date(2024, 2, 1), dec!(55)),
        decreased,
        ConstructionSnapshot::new(date(2024, 4, 1), dec!(70)),
    ];
    let timeline = ConstructionTimeline::new(snapshots).unwrap();

    assert_eq!(timeline.latest_progress(), Some(dec!(70)));
    assert_eq!(
        timeline.progress_delta(date(2024, 2, 1), date(2024, 3, 1)),
        Some(dec!(-15))
    );
    assert_eq!(
        timeline.progress_delta(date(2024, 1, 1), date(2024, 4, 1)),
        Some(dec!(40))
    );
    assert_eq!(
        timeline.progress_delta(date(2025, 1, 1), date(2025, 2, 1)),
        None
    );
}
