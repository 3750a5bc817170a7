use super::common::*;
use crate::lending::amortization;
use crate::lending::domain::{LoanId, LoanRecord, LoanRequest};
use crate::lending::scoring::{decide, CreditScorer, RejectionReason};
use chrono::NaiveDate;

fn request(amount: f64, rate: f64, tenure: u32) -> LoanRequest {
    LoanRequest {
        amount,
        interest_rate_pct: rate,
        tenure_months: tenure,
    }
}

#[test]
fn prime_scores_keep_the_requested_rate() {
    let result = decide(55, &request(100_000.0, 10.0, 12), 100_000.0, 0.0, &policy());

    assert!(result.approved);
    assert_eq!(result.corrected_interest_rate, 10.0);
    assert_eq!(
        result.monthly_installment,
        amortization::calculate_emi(100_000.0, 10.0, 12)
    );
    assert!(result.reason.is_none());
}

#[test]
fn standard_band_raises_rate_to_twelve_percent() {
    let result = decide(40, &request(100_000.0, 8.0, 12), 100_000.0, 0.0, &policy());

    assert!(result.approved);
    assert_eq!(result.corrected_interest_rate, 12.0);
    // Installment recomputed at the floored rate, not the requested one.
    assert_eq!(
        result.monthly_installment,
        amortization::calculate_emi(100_000.0, 12.0, 12)
    );
}

#[test]
fn standard_band_never_lowers_a_higher_requested_rate() {
    let result = decide(40, &request(100_000.0, 15.0, 12), 100_000.0, 0.0, &policy());

    assert!(result.approved);
    assert_eq!(result.corrected_interest_rate, 15.0);
    assert_eq!(
        result.monthly_installment,
        amortization::calculate_emi(100_000.0, 15.0, 12)
    );
}

#[test]
fn subprime_band_raises_rate_to_sixteen_percent() {
    let result = decide(25, &request(100_000.0, 8.0, 12), 100_000.0, 0.0, &policy());

    assert!(result.approved);
    assert_eq!(result.corrected_interest_rate, 16.0);
    assert_eq!(
        result.monthly_installment,
        amortization::calculate_emi(100_000.0, 16.0, 12)
    );
}

#[test]
fn band_cutoffs_are_exclusive_on_the_lower_edge() {
    // Exactly 50 falls into the standard band, exactly 10 is rejected.
    let at_fifty = decide(50, &request(100_000.0, 8.0, 12), 100_000.0, 0.0, &policy());
    assert!(at_fifty.approved);
    assert_eq!(at_fifty.corrected_interest_rate, 12.0);

    let at_ten = decide(10, &request(100_000.0, 8.0, 12), 100_000.0, 0.0, &policy());
    assert!(!at_ten.approved);
    assert_eq!(at_ten.reason, Some(RejectionReason::ScoreTooLow));
}

#[test]
fn rock_bottom_scores_are_rejected_at_the_requested_rate() {
    let result = decide(5, &request(100_000.0, 9.0, 12), 100_000.0, 0.0, &policy());

    assert!(!result.approved);
    assert_eq!(result.corrected_interest_rate, 9.0);
    assert_eq!(
        result.reason.as_ref().map(RejectionReason::message),
        Some("Credit score too low".to_string())
    );
}

#[test]
fn affordability_gate_rejects_regardless_of_score() {
    // 8_791.59 requested against a 5_000 ceiling (half of 10_000).
    let result = decide(95, &request(100_000.0, 10.0, 12), 10_000.0, 0.0, &policy());

    assert!(!result.approved);
    assert_eq!(result.corrected_interest_rate, 10.0);
    assert_eq!(
        result.monthly_installment,
        amortization::calculate_emi(100_000.0, 10.0, 12)
    );
    assert_eq!(
        result.reason.as_ref().map(RejectionReason::message),
        Some("EMI exceeds 50% of monthly salary".to_string())
    );
}

#[test]
fn committed_installments_count_against_the_cap() {
    // The new installment alone fits, but existing obligations tip it over.
    let result = decide(
        95,
        &request(100_000.0, 10.0, 12),
        40_000.0,
        15_000.0,
        &policy(),
    );

    assert!(!result.approved);
    assert!(matches!(
        result.reason,
        Some(RejectionReason::EmiCapExceeded { .. })
    ));
}

#[test]
fn scorer_check_eligibility_ties_score_to_decision() {
    let scorer = CreditScorer::new(policy());
    let result = scorer.check_eligibility(
        &customer(100_000.0, 1_000_000.0),
        &clean_history(),
        &request(200_000.0, 10.0, 24),
        as_of(),
    );

    assert!(result.approved);
    assert_eq!(result.credit_score, 91);
    assert_eq!(result.corrected_interest_rate, 10.0);
}

#[test]
fn frozen_score_flows_through_to_rejection() {
    let scorer = CreditScorer::new(policy());
    let running = LoanRecord::open(
        LoanId(9),
        500_000.0,
        10.0,
        60,
        NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date"),
    );
    // Income is high enough that only the frozen score can reject.
    let result = scorer.check_eligibility(
        &customer(500_000.0, 10_000.0),
        &[running],
        &request(50_000.0, 10.0, 12),
        as_of(),
    );

    assert!(!result.approved);
    assert_eq!(result.credit_score, 0);
    assert_eq!(result.reason, Some(RejectionReason::ScoreTooLow));
}
