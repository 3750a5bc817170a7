use serde::ser::Serializer;
use serde::Serialize;

use super::super::amortization;
use super::super::domain::LoanRequest;
use super::config::ScoringPolicy;

/// Why a loan request was turned down. Serializes as the user-facing
/// message so callers can render it directly.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    EmiCapExceeded { cap: f64 },
    ScoreTooLow,
}

impl RejectionReason {
    pub fn message(&self) -> String {
        match self {
            RejectionReason::EmiCapExceeded { cap } => {
                format!("EMI exceeds {}% of monthly salary", cap * 100.0)
            }
            RejectionReason::ScoreTooLow => "Credit score too low".to_string(),
        }
    }
}

impl Serialize for RejectionReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message())
    }
}

/// Verdict on a requested loan: approval, the rate actually applied, and
/// the installment computed at that rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityResult {
    pub approved: bool,
    pub credit_score: u8,
    pub corrected_interest_rate: f64,
    pub monthly_installment: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectionReason>,
}

/// Decide a loan request given the customer's credit score.
///
/// The affordability gate runs first and reports the uncorrected
/// requested rate when it rejects. Past the gate, score bands are tried
/// in descending order and the first match wins; a band's rate floor
/// only raises the rate, never lowers it, and a raised rate means the
/// installment is recomputed before being returned.
pub fn decide(
    score: u8,
    request: &LoanRequest,
    monthly_income: f64,
    committed_installments: f64,
    policy: &ScoringPolicy,
) -> EligibilityResult {
    let requested_emi = amortization::calculate_emi(
        request.amount,
        request.interest_rate_pct,
        request.tenure_months,
    );

    if committed_installments + requested_emi > policy.emi_income_cap * monthly_income {
        return EligibilityResult {
            approved: false,
            credit_score: score,
            corrected_interest_rate: request.interest_rate_pct,
            monthly_installment: requested_emi,
            reason: Some(RejectionReason::EmiCapExceeded {
                cap: policy.emi_income_cap,
            }),
        };
    }

    match score {
        s if s > policy.prime_score_cutoff => EligibilityResult {
            approved: true,
            credit_score: score,
            corrected_interest_rate: request.interest_rate_pct,
            monthly_installment: requested_emi,
            reason: None,
        },
        s if s > policy.standard_score_cutoff => {
            approve_with_floor(score, request, requested_emi, policy.standard_rate_floor)
        }
        s if s > policy.subprime_score_cutoff => {
            approve_with_floor(score, request, requested_emi, policy.subprime_rate_floor)
        }
        _ => EligibilityResult {
            approved: false,
            credit_score: score,
            corrected_interest_rate: request.interest_rate_pct,
            monthly_installment: requested_emi,
            reason: Some(RejectionReason::ScoreTooLow),
        },
    }
}

fn approve_with_floor(
    score: u8,
    request: &LoanRequest,
    requested_emi: f64,
    rate_floor: f64,
) -> EligibilityResult {
    let corrected_rate = request.interest_rate_pct.max(rate_floor);
    let monthly_installment = if corrected_rate != request.interest_rate_pct {
        amortization::calculate_emi(request.amount, corrected_rate, request.tenure_months)
    } else {
        requested_emi
    };

    EligibilityResult {
        approved: true,
        credit_score: score,
        corrected_interest_rate: corrected_rate,
        monthly_installment,
        reason: None,
    }
}
