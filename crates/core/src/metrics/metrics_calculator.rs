//! Pure metric calculations over a property's histories.
//!
//! No I/O and no mutation. Every function returns `Option<Decimal>`:
//! missing inputs and mathematically degenerate cases resolve to `None`,
//! never to a misleading default. Results outside the display-safety caps
//! are likewise suppressed to `None`, since a denominator can be arbitrarily
//! small (a property revalued days after purchase) and an unreliable number
//! must surface as "no data" rather than an extreme.

use crate::constants::DAYS_PER_YEAR;
use crate::properties::{CashFlowLedger, Property, ValuationHistory};

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use super::PropertyMetrics;

/// Growth rates (CAGR, IRR) at or beyond this magnitude are suppressed.
pub const MAX_RATE_PERCENT: Decimal = dec!(1000);

/// Rental yields at or beyond this magnitude are suppressed.
pub const MAX_YIELD_PERCENT: Decimal = dec!(100);

/// Payback periods at or beyond this many years are not meaningful.
pub const MAX_PAYBACK_YEARS: Decimal = dec!(100);

const DAYS_PER_RENTAL_YEAR: Decimal = dec!(365);
const IRR_TOLERANCE: Decimal = dec!(0.000001);
const IRR_MAX_ITERATIONS: u32 = 100;
const IRR_INITIAL_GUESS: Decimal = dec!(0.1);
const IRR_RATE_FLOOR: Decimal = dec!(-0.9999);
const IRR_RATE_CEILING: Decimal = dec!(10);

/// Absolute value gained since purchase. `None` until a reassessment exists.
pub fn value_growth(history: &ValuationHistory) -> Option<Decimal> {
    history
        .current_estimate()
        .map(|estimate| estimate - history.purchase_price())
}

/// Value growth as a percentage of the purchase price.
pub fn value_growth_percent(history: &ValuationHistory) -> Option<Decimal> {
    let growth = value_growth(history)?;
    let purchase_price = history.purchase_price();
    // The history container rejects non-positive purchase prices, but an
    // unreliable denominator must never reach a division.
    if purchase_price <= Decimal::ZERO {
        return None;
    }
    Some(growth / purchase_price * Decimal::ONE_HUNDRED)
}

/// Point-in-time return on investment. `None` (never zero) while the
/// property has no current estimate.
pub fn roi(history: &ValuationHistory) -> Option<Decimal> {
    value_growth_percent(history)
}

/// Compound annual growth rate from purchase to the latest valuation,
/// as a percentage. `None` for zero-length holding periods and for runaway
/// results from sub-year denominators.
pub fn cagr(history: &ValuationHistory) -> Option<Decimal> {
    let estimate = history.current_estimate()?;
    let purchase_price = history.purchase_price();
    if estimate <= Decimal::ZERO || purchase_price <= Decimal::ZERO {
        return None;
    }

    let days = (history.latest_date() - history.purchase_date()).num_days();
    if days <= 0 {
        return None;
    }
    let years = Decimal::from(days) / DAYS_PER_YEAR;

    let ratio = estimate / purchase_price;
    let rate = ratio.checked_powd(Decimal::ONE / years)? - Decimal::ONE;
    suppress_extreme_rate(rate.checked_mul(Decimal::ONE_HUNDRED)?)
}

/// Internal rate of return over the property's full signed cash-flow series:
/// the purchase as the t0 outflow, every ledger event at its date, and the
/// current estimate as a terminal notional inflow.
///
/// Solved by Newton-Raphson with a bisection fallback, bounded at
/// [`IRR_MAX_ITERATIONS`] iterations and [`IRR_TOLERANCE`] NPV tolerance.
/// Returns `None` on non-convergence, on a series without a sign change, and
/// on a series with fewer than two distinct dated entries. A ledger with no
/// real cash events also yields `None`: purchase plus terminal estimate
/// alone is CAGR territory, not a flow-based rate.
pub fn irr(history: &ValuationHistory, ledger: &CashFlowLedger) -> Option<Decimal> {
    let estimate = history.current_estimate()?;
    if ledger.is_empty() {
        return None;
    }

    let t0 = history.purchase_date();
    let mut flows: Vec<(Decimal, Decimal)> =
        vec![(Decimal::ZERO, -history.purchase_price())];
    for event in ledger.events() {
        flows.push((years_since(t0, event.date), event.signed_amount()));
    }
    flows.push((years_since(t0, history.latest_date()), estimate));

    irr_from_flows(&flows)
}

/// IRR (as a percentage) of a raw signed cash-flow series given as
/// `(years since t0, amount)` pairs. Exposed separately from [`irr`] so the
/// solver can be exercised against series with a known analytic rate.
pub fn irr_from_flows(flows: &[(Decimal, Decimal)]) -> Option<Decimal> {
    let mut distinct_dates: Vec<Decimal> = flows.iter().map(|(t, _)| *t).collect();
    distinct_dates.sort();
    distinct_dates.dedup();
    if distinct_dates.len() < 2 {
        return None;
    }

    let has_outflow = flows.iter().any(|(_, cf)| *cf < Decimal::ZERO);
    let has_inflow = flows.iter().any(|(_, cf)| *cf > Decimal::ZERO);
    if !has_outflow || !has_inflow {
        return None;
    }

    let rate = newton_irr(flows).or_else(|| bisect_irr(flows))?;
    suppress_extreme_rate(rate.checked_mul(Decimal::ONE_HUNDRED)?)
}

/// First point in time at which cumulative net cash flow recovers the
/// purchase outflow, in years since purchase, linearly interpolated between
/// the bracketing dated cumulative-sum points. `None` when the flow never
/// turns positive or when the result is non-positive or implausibly large.
pub fn payback_period_years(
    history: &ValuationHistory,
    ledger: &CashFlowLedger,
) -> Option<Decimal> {
    let t0 = history.purchase_date();
    let mut prev_t = Decimal::ZERO;
    let mut prev_cumulative = -history.purchase_price();

    for event in ledger.events() {
        let t = years_since(t0, event.date);
        let cumulative = prev_cumulative + event.signed_amount();
        if prev_cumulative < Decimal::ZERO && cumulative >= Decimal::ZERO {
            let span = cumulative - prev_cumulative;
            let payback = if t <= prev_t || span <= Decimal::ZERO {
                t
            } else {
                prev_t + (-prev_cumulative / span) * (t - prev_t)
            };
            if payback <= Decimal::ZERO || payback >= MAX_PAYBACK_YEARS {
                return None;
            }
            return Some(payback);
        }
        prev_t = t;
        prev_cumulative = cumulative;
    }

    None
}

/// Annualized rental income as a percentage of the current basis
/// (estimate when present, purchase price otherwise). The basis comes from
/// the valuation history, the same estimate source the growth metrics read,
/// so one metrics record never mixes the history with the denormalized
/// property row.
pub fn rental_yield(property: &Property, history: &ValuationHistory) -> Option<Decimal> {
    let annual_income = forecast_annual_income(property)?;
    let basis = history.current_basis();
    if basis <= Decimal::ZERO {
        return None;
    }
    let yield_percent = annual_income / basis * Decimal::ONE_HUNDRED;
    if yield_percent.abs() >= MAX_YIELD_PERCENT {
        return None;
    }
    Some(yield_percent)
}

/// Expected annual rental income: ADR x 365 x occupancy.
pub fn forecast_annual_income(property: &Property) -> Option<Decimal> {
    let adr = property.expected_adr?;
    let occupancy = property.expected_occupancy?;
    Some(adr * DAYS_PER_RENTAL_YEAR * occupancy / Decimal::ONE_HUNDRED)
}

/// Assembles the full metrics record for one property. Unrounded; callers
/// round at the display boundary.
pub fn calculate_property_metrics(
    property: &Property,
    history: &ValuationHistory,
    ledger: &CashFlowLedger,
) -> PropertyMetrics {
    PropertyMetrics {
        property_id: property.id.clone(),
        roi: roi(history),
        value_growth: value_growth(history),
        value_growth_percent: value_growth_percent(history),
        cagr: cagr(history),
        irr: irr(history, ledger),
        payback_period_years: payback_period_years(history, ledger),
        yield_percent: rental_yield(property, history),
        forecast_annual_income: forecast_annual_income(property),
    }
}

fn years_since(t0: chrono::NaiveDate, date: chrono::NaiveDate) -> Decimal {
    Decimal::from((date - t0).num_days()) / DAYS_PER_YEAR
}

fn suppress_extreme_rate(percent: Decimal) -> Option<Decimal> {
    if percent.abs() >= MAX_RATE_PERCENT {
        return None;
    }
    Some(percent)
}

/// NPV of the series at the given rate. `None` when the rate puts the
/// discount base at or below zero, or on decimal overflow (the `Decimal`
/// analogue of a NaN/Infinity guard).
fn npv(flows: &[(Decimal, Decimal)], rate: Decimal) -> Option<Decimal> {
    let base = Decimal::ONE + rate;
    if base <= Decimal::ZERO {
        return None;
    }
    let mut total = Decimal::ZERO;
    for (t, cash_flow) in flows {
        let discount = base.checked_powd(-*t)?;
        total = total.checked_add(cash_flow.checked_mul(discount)?)?;
    }
    Some(total)
}

/// dNPV/dr of the series at the given rate.
fn npv_derivative(flows: &[(Decimal, Decimal)], rate: Decimal) -> Option<Decimal> {
    let base = Decimal::ONE + rate;
    if base <= Decimal::ZERO {
        return None;
    }
    let mut total = Decimal::ZERO;
    for (t, cash_flow) in flows {
        let discount = base.checked_powd(-*t - Decimal::ONE)?;
        let term = cash_flow.checked_mul(*t)?.checked_mul(discount)?;
        total = total.checked_sub(term)?;
    }
    Some(total)
}

fn newton_irr(flows: &[(Decimal, Decimal)]) -> Option<Decimal> {
    let mut rate = IRR_INITIAL_GUESS;
    for _ in 0..IRR_MAX_ITERATIONS {
        let value = npv(flows, rate)?;
        if value.abs() < IRR_TOLERANCE {
            return Some(rate);
        }
        let derivative = npv_derivative(flows, rate)?;
        if derivative.abs() < IRR_TOLERANCE {
            return None;
        }
        let next = rate.checked_sub(value.checked_div(derivative)?)?;
        if next <= IRR_RATE_FLOOR || next >= IRR_RATE_CEILING {
            return None;
        }
        rate = next;
    }
    None
}

fn bisect_irr(flows: &[(Decimal, Decimal)]) -> Option<Decimal> {
    // Deep-discount rates can overflow the discount factor for long series;
    // pull the bracket inward until NPV is finite at both ends.
    let (mut lo, mut npv_lo) = [IRR_RATE_FLOOR, dec!(-0.9), dec!(-0.5), Decimal::ZERO]
        .into_iter()
        .find_map(|bound| npv(flows, bound).map(|value| (bound, value)))?;
    let (mut hi, npv_hi) = [IRR_RATE_CEILING, dec!(5), dec!(2), Decimal::ONE]
        .into_iter()
        .find_map(|bound| npv(flows, bound).map(|value| (bound, value)))?;
    if lo >= hi {
        return None;
    }
    if npv_lo.abs() < IRR_TOLERANCE {
        return Some(lo);
    }
    if npv_hi.abs() < IRR_TOLERANCE {
        return Some(hi);
    }
    if npv_lo.is_sign_positive() == npv_hi.is_sign_positive() {
        return None;
    }

    let two = dec!(2);
    for _ in 0..IRR_MAX_ITERATIONS {
        let mid = (lo + hi) / two;
        let npv_mid = npv(flows, mid)?;
        if npv_mid.abs() < IRR_TOLERANCE {
            return Some(mid);
        }
        if npv_mid.is_sign_positive() == npv_lo.is_sign_positive() {
            lo = mid;
            npv_lo = npv_mid;
        } else {
            hi = mid;
        }
    }
    None
}
