mod config;
mod policy;
mod rules;

pub use config::ScoringPolicy;
pub use policy::{decide, EligibilityResult, RejectionReason};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    committed_installments, current_debt, CustomerId, CustomerProfile, LoanRecord, LoanRequest,
};

/// Stateless scorer applying the lending policy to a customer's history.
///
/// Every entry point takes an explicit `as_of` date; nothing in here
/// reads the wall clock, so results are reproducible for any snapshot.
pub struct CreditScorer {
    policy: ScoringPolicy,
}

impl CreditScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score a customer's loan history on the 0-100 scale.
    ///
    /// Active debt beyond the approved limit freezes the score at zero
    /// before any sub-score is computed.
    pub fn score(
        &self,
        customer: &CustomerProfile,
        loans: &[LoanRecord],
        as_of: NaiveDate,
    ) -> ScoreBreakdown {
        if current_debt(loans, as_of) > customer.approved_limit {
            return ScoreBreakdown {
                customer_id: customer.customer_id,
                score: 0,
                risk: RiskBand::for_score(0),
                components: Vec::new(),
                limit_exceeded: true,
            };
        }

        let components = rules::score_components(customer, loans, as_of, &self.policy);
        let weighted: f64 = components
            .iter()
            .map(|component| component.raw * component.weight)
            .sum();
        let score = weighted.round().clamp(0.0, 100.0) as u8;

        ScoreBreakdown {
            customer_id: customer.customer_id,
            score,
            risk: RiskBand::for_score(score),
            components,
            limit_exceeded: false,
        }
    }

    /// Score the customer, then decide the requested loan against their
    /// affordability ceiling and the score bands.
    pub fn check_eligibility(
        &self,
        customer: &CustomerProfile,
        loans: &[LoanRecord],
        request: &LoanRequest,
        as_of: NaiveDate,
    ) -> EligibilityResult {
        let breakdown = self.score(customer, loans, as_of);
        policy::decide(
            breakdown.score,
            request,
            customer.monthly_income,
            committed_installments(loans, as_of),
            &self.policy,
        )
    }
}

/// Factors feeding the composite credit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    PaymentHistory,
    LoanCount,
    RecentActivity,
    LoanVolume,
}

/// Discrete contribution to a credit score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub raw: f64,
    pub weight: f64,
    pub notes: String,
}

/// Composite score plus the component trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub customer_id: CustomerId,
    pub score: u8,
    pub risk: RiskBand,
    pub components: Vec<ScoreComponent>,
    /// Set when active debt exceeded the approved limit and the score was
    /// frozen at zero without computing components.
    pub limit_exceeded: bool,
}

/// Coarse risk label derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            s if s > 80 => RiskBand::Low,
            s if s > 60 => RiskBand::Medium,
            s if s > 40 => RiskBand::High,
            _ => RiskBand::VeryHigh,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Medium => "medium",
            RiskBand::High => "high",
            RiskBand::VeryHigh => "very_high",
        }
    }
}
