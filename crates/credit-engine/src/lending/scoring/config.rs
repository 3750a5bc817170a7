use serde::{Deserialize, Serialize};

/// Scoring and decisioning knobs: component weights, score-band cutoffs,
/// the rate floors applied per band, and the installment-to-income cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub payment_history_weight: f64,
    pub loan_count_weight: f64,
    pub recent_activity_weight: f64,
    pub loan_volume_weight: f64,
    /// Share of monthly income that total installments may not exceed.
    pub emi_income_cap: f64,
    /// Scores strictly above this approve at the requested rate.
    pub prime_score_cutoff: u8,
    /// Scores strictly above this (and at most prime) approve with the
    /// standard rate floor.
    pub standard_score_cutoff: u8,
    /// Scores strictly above this (and at most standard) approve with the
    /// sub-prime rate floor; at or below, the request is rejected.
    pub subprime_score_cutoff: u8,
    pub standard_rate_floor: f64,
    pub subprime_rate_floor: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            payment_history_weight: 0.30,
            loan_count_weight: 0.20,
            recent_activity_weight: 0.25,
            loan_volume_weight: 0.25,
            emi_income_cap: 0.5,
            prime_score_cutoff: 50,
            standard_score_cutoff: 30,
            subprime_score_cutoff: 10,
            standard_rate_floor: 12.0,
            subprime_rate_floor: 16.0,
        }
    }
}
