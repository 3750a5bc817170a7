//! Amortization math: EMI, schedules, and prepayment simulations.
//!
//! Every function here is total. Degenerate inputs (non-positive
//! principal, zero tenure) yield zero rather than an error, and a
//! non-positive rate falls back to straight-line division; range
//! validation of public-facing inputs happens at the service boundary.

use serde::{Deserialize, Serialize};
use std::io::Write;

/// Round to currency precision (2 decimal places).
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Equated monthly installment for a loan.
///
/// The zero-rate branch returns the exact straight-line division so that
/// `emi * tenure == principal` holds without rounding drift; the
/// amortizing branch rounds to currency precision.
pub fn calculate_emi(principal: f64, annual_rate_pct: f64, tenure_months: u32) -> f64 {
    if principal <= 0.0 || tenure_months == 0 {
        return 0.0;
    }
    if annual_rate_pct <= 0.0 {
        return principal / f64::from(tenure_months);
    }
    let monthly_rate = annual_rate_pct / 1200.0;
    let power_term = (1.0 + monthly_rate).powi(tenure_months as i32);
    round2(principal * monthly_rate * power_term / (power_term - 1.0))
}

/// Total interest paid over the full tenure at the given installment.
pub fn total_interest(principal: f64, emi: f64, tenure_months: u32) -> f64 {
    emi * f64::from(tenure_months) - principal
}

/// One month's row of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub month: u32,
    pub emi: f64,
    pub principal_component: f64,
    pub interest_component: f64,
    pub balance: f64,
}

/// Month-by-month breakdown of a loan into principal and interest.
///
/// The running balance carries full precision between months; only the
/// emitted rows are rounded, with the displayed balance floored at zero.
pub fn schedule(principal: f64, annual_rate_pct: f64, tenure_months: u32) -> Vec<ScheduleEntry> {
    let emi = calculate_emi(principal, annual_rate_pct, tenure_months);
    if emi <= 0.0 {
        return Vec::new();
    }
    let monthly_rate = if annual_rate_pct > 0.0 {
        annual_rate_pct / 1200.0
    } else {
        0.0
    };

    let mut balance = principal;
    let mut rows = Vec::with_capacity(tenure_months as usize);
    for month in 1..=tenure_months {
        let interest_component = balance * monthly_rate;
        let principal_component = emi - interest_component;
        balance -= principal_component;
        rows.push(ScheduleEntry {
            month,
            emi: round2(emi),
            principal_component: round2(principal_component),
            interest_component: round2(interest_component),
            balance: round2(balance.max(0.0)),
        });
    }
    rows
}

/// Outcome of prepaying a lump sum partway through a loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentOutcome {
    pub original_total_payment: f64,
    pub new_tenure_months: u32,
    pub months_saved: u32,
    pub interest_saved: f64,
    pub balance_after_prepayment: f64,
}

/// Simulate a lump-sum prepayment at `prepay_month` and re-solve the
/// remaining tenure.
///
/// Keeps the original installment and shortens the tenure: with a
/// non-zero rate the payoff month comes from the closed-form logarithmic
/// formula, at zero rate from linear division. A prepayment that clears
/// the balance ends the loan at `prepay_month`. All outputs clamp at
/// non-negative.
pub fn prepayment_savings(
    principal: f64,
    annual_rate_pct: f64,
    tenure_months: u32,
    prepay_amount: f64,
    prepay_month: u32,
) -> PrepaymentOutcome {
    let emi = calculate_emi(principal, annual_rate_pct, tenure_months);
    let original_total = emi * f64::from(tenure_months);
    if emi <= 0.0 {
        return PrepaymentOutcome {
            original_total_payment: 0.0,
            new_tenure_months: 0,
            months_saved: 0,
            interest_saved: 0.0,
            balance_after_prepayment: 0.0,
        };
    }

    let monthly_rate = if annual_rate_pct > 0.0 {
        annual_rate_pct / 1200.0
    } else {
        0.0
    };

    let mut balance = principal;
    for _ in 0..prepay_month.min(tenure_months) {
        let interest = balance * monthly_rate;
        balance -= emi - interest;
    }

    let new_balance = (balance - prepay_amount).max(0.0);
    let new_tenure = if new_balance <= 0.0 {
        prepay_month
    } else if monthly_rate > 0.0 {
        let payoff = (1.0 + new_balance * monthly_rate / emi).ln() / (1.0 + monthly_rate).ln();
        payoff.ceil() as u32 + prepay_month
    } else {
        (new_balance / emi).ceil() as u32 + prepay_month
    };

    let interest_saved = f64::from(tenure_months.saturating_sub(new_tenure)) * emi;

    PrepaymentOutcome {
        original_total_payment: round2(original_total),
        new_tenure_months: new_tenure,
        months_saved: tenure_months.saturating_sub(new_tenure),
        interest_saved: round2(interest_saved.max(0.0)),
        balance_after_prepayment: round2(new_balance),
    }
}

/// Write a schedule as CSV for export from the CLI.
pub fn write_schedule_csv<W: Write>(rows: &[ScheduleEntry], writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    for row in rows {
        out.serialize(row)?;
    }
    out.flush().map_err(csv::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emi_matches_standard_formula() {
        // 100_000 at 10% over 12 months is a well-known 8_791.59.
        let emi = calculate_emi(100_000.0, 10.0, 12);
        assert!((emi - 8_791.59).abs() < 0.01, "unexpected emi {emi}");
    }

    #[test]
    fn zero_rate_is_exact_straight_line() {
        assert_eq!(calculate_emi(120_000.0, 0.0, 12), 10_000.0);
        assert_eq!(calculate_emi(1_000.0, 0.0, 3), 1_000.0 / 3.0);
    }

    #[test]
    fn degenerate_inputs_yield_zero() {
        assert_eq!(calculate_emi(0.0, 10.0, 12), 0.0);
        assert_eq!(calculate_emi(-5.0, 10.0, 12), 0.0);
        assert_eq!(calculate_emi(100_000.0, 10.0, 0), 0.0);
    }

    #[test]
    fn schedule_amortizes_to_zero() {
        let rows = schedule(500_000.0, 12.0, 24);
        assert_eq!(rows.len(), 24);
        assert_eq!(rows.last().map(|row| row.month), Some(24));

        let final_balance = rows.last().map(|row| row.balance).unwrap();
        assert!(final_balance < 1.0, "residual balance {final_balance}");

        let principal_paid: f64 = rows.iter().map(|row| row.principal_component).sum();
        assert!(
            (principal_paid - 500_000.0).abs() < 1.0,
            "principal drift {principal_paid}"
        );
    }

    #[test]
    fn schedule_interest_declines_monotonically() {
        let rows = schedule(200_000.0, 9.5, 18);
        for pair in rows.windows(2) {
            assert!(pair[1].interest_component <= pair[0].interest_component);
        }
    }

    #[test]
    fn prepayment_shortens_tenure_and_saves_interest() {
        let outcome = prepayment_savings(1_000_000.0, 10.0, 120, 200_000.0, 12);
        assert!(outcome.new_tenure_months < 120);
        assert_eq!(
            outcome.months_saved,
            120 - outcome.new_tenure_months
        );
        assert!(outcome.interest_saved > 0.0);
        assert!(outcome.balance_after_prepayment > 0.0);
    }

    #[test]
    fn prepayment_clearing_balance_closes_loan_at_prepay_month() {
        let outcome = prepayment_savings(100_000.0, 10.0, 24, 1_000_000.0, 6);
        assert_eq!(outcome.new_tenure_months, 6);
        assert_eq!(outcome.months_saved, 18);
        assert_eq!(outcome.balance_after_prepayment, 0.0);
    }

    #[test]
    fn prepayment_at_zero_rate_uses_linear_payoff() {
        let outcome = prepayment_savings(120_000.0, 0.0, 12, 30_000.0, 6);
        // 60_000 outstanding after 6 months, minus 30_000, at 10_000/month.
        assert_eq!(outcome.new_tenure_months, 9);
        assert_eq!(outcome.months_saved, 3);
    }

    #[test]
    fn schedule_csv_contains_header_and_all_rows() {
        let rows = schedule(50_000.0, 8.0, 6);
        let mut buffer = Vec::new();
        write_schedule_csv(&rows, &mut buffer).expect("csv writes");
        let text = String::from_utf8(buffer).expect("utf8 csv");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("month,emi"));
    }
}
