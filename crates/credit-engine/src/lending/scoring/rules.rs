use chrono::{Datelike, NaiveDate};

use super::super::domain::{CustomerProfile, LoanRecord};
use super::config::ScoringPolicy;
use super::{ScoreComponent, ScoreFactor};

/// Compute the four weighted sub-scores for a customer's loan history.
///
/// Each raw value lands in [0, 100]; the caller applies the weights and
/// clamps the combined result. Band upper bounds are inclusive, and the
/// low-end shape of the count-based bands is deliberately non-monotonic
/// (a short history outranks no history) -- preserved as written in the
/// lending policy.
pub(crate) fn score_components(
    customer: &CustomerProfile,
    loans: &[LoanRecord],
    as_of: NaiveDate,
    policy: &ScoringPolicy,
) -> Vec<ScoreComponent> {
    vec![
        payment_history(loans, policy),
        loan_count(loans, policy),
        recent_activity(loans, as_of, policy),
        loan_volume(customer, loans, policy),
    ]
}

/// Ratio of installments paid on time to installments owed, scaled to
/// [0, 100]. A customer with no history scores a neutral 50.
fn payment_history(loans: &[LoanRecord], policy: &ScoringPolicy) -> ScoreComponent {
    let total_emis: u32 = loans.iter().map(|loan| loan.tenure_months).sum();
    let paid_on_time: u32 = loans.iter().map(|loan| loan.emis_paid_on_time).sum();

    let (raw, notes) = if total_emis == 0 {
        (50.0, "no repayment history, neutral default".to_string())
    } else {
        let ratio = f64::from(paid_on_time) / f64::from(total_emis);
        (
            ratio * 100.0,
            format!("{paid_on_time} of {total_emis} installments paid on time"),
        )
    };

    ScoreComponent {
        factor: ScoreFactor::PaymentHistory,
        raw,
        weight: policy.payment_history_weight,
        notes,
    }
}

fn loan_count(loans: &[LoanRecord], policy: &ScoringPolicy) -> ScoreComponent {
    let count = loans.len();
    let raw = match count {
        0 => 80.0,
        1..=2 => 90.0,
        3..=5 => 70.0,
        6..=10 => 50.0,
        _ => 20.0,
    };

    ScoreComponent {
        factor: ScoreFactor::LoanCount,
        raw,
        weight: policy.loan_count_weight,
        notes: format!("{count} loan(s) on record"),
    }
}

fn recent_activity(
    loans: &[LoanRecord],
    as_of: NaiveDate,
    policy: &ScoringPolicy,
) -> ScoreComponent {
    let opened_this_year = loans
        .iter()
        .filter(|loan| loan.start_date.year() == as_of.year())
        .count();
    let raw = match opened_this_year {
        0 => 80.0,
        1 => 90.0,
        2 => 60.0,
        3 => 30.0,
        _ => 10.0,
    };

    ScoreComponent {
        factor: ScoreFactor::RecentActivity,
        raw,
        weight: policy.recent_activity_weight,
        notes: format!("{} loan(s) opened in {}", opened_this_year, as_of.year()),
    }
}

/// Total historical principal measured against the approved limit. Band
/// edges are inclusive: a ratio of exactly 0.3 still scores 100.
fn loan_volume(
    customer: &CustomerProfile,
    loans: &[LoanRecord],
    policy: &ScoringPolicy,
) -> ScoreComponent {
    let total_principal: f64 = loans.iter().map(|loan| loan.principal).sum();

    let (raw, notes) = if customer.approved_limit == 0.0 {
        (50.0, "no approved limit on file, neutral default".to_string())
    } else {
        let ratio = total_principal / customer.approved_limit;
        let raw = if ratio <= 0.3 {
            100.0
        } else if ratio <= 0.5 {
            80.0
        } else if ratio <= 0.7 {
            60.0
        } else if ratio <= 1.0 {
            40.0
        } else {
            10.0
        };
        (raw, format!("borrowed {ratio:.2}x of the approved limit"))
    };

    ScoreComponent {
        factor: ScoreFactor::LoanVolume,
        raw,
        weight: policy.loan_volume_weight,
        notes,
    }
}
