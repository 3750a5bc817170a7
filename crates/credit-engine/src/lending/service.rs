use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use super::domain::{CustomerId, CustomerProfile, LoanId, LoanRecord, LoanRequest};
use super::repository::{CustomerStore, LoanStore, RepositoryError};
use super::scoring::{CreditScorer, EligibilityResult, ScoreBreakdown, ScoringPolicy};

/// Service composing the customer store, loan store, and credit scorer.
pub struct LendingService<C, L> {
    customers: Arc<C>,
    loans: Arc<L>,
    scorer: Arc<CreditScorer>,
}

static LOAN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_loan_id() -> LoanId {
    LoanId(LOAN_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

impl<C, L> LendingService<C, L>
where
    C: CustomerStore + 'static,
    L: LoanStore + 'static,
{
    pub fn new(customers: Arc<C>, loans: Arc<L>, policy: ScoringPolicy) -> Self {
        Self {
            customers,
            loans,
            scorer: Arc::new(CreditScorer::new(policy)),
        }
    }

    /// Score a customer's full loan history as of the given date.
    pub fn credit_score(
        &self,
        customer_id: CustomerId,
        as_of: NaiveDate,
    ) -> Result<ScoreBreakdown, ServiceError> {
        let (customer, history) = self.load(customer_id)?;
        Ok(self.scorer.score(&customer, &history, as_of))
    }

    /// Decide a requested loan without recording anything.
    pub fn check_eligibility(
        &self,
        customer_id: CustomerId,
        request: &LoanRequest,
        as_of: NaiveDate,
    ) -> Result<EligibilityResult, ServiceError> {
        validate_request(request)?;
        let (customer, history) = self.load(customer_id)?;
        Ok(self
            .scorer
            .check_eligibility(&customer, &history, request, as_of))
    }

    /// Decide a requested loan and, when approved, open it at the
    /// corrected rate with the decision date as the start date.
    pub fn disburse(
        &self,
        customer_id: CustomerId,
        request: &LoanRequest,
        as_of: NaiveDate,
    ) -> Result<DisbursalOutcome, ServiceError> {
        let eligibility = self.check_eligibility(customer_id, request, as_of)?;

        if !eligibility.approved {
            let message = eligibility
                .reason
                .as_ref()
                .map(|reason| reason.message())
                .unwrap_or_else(|| "Loan not approved".to_string());
            return Ok(DisbursalOutcome {
                loan_id: None,
                customer_id,
                approved: false,
                message,
                monthly_installment: eligibility.monthly_installment,
            });
        }

        let loan = LoanRecord::open(
            next_loan_id(),
            request.amount,
            eligibility.corrected_interest_rate,
            request.tenure_months,
            as_of,
        );
        let stored = self.loans.insert(customer_id, loan)?;

        info!(
            customer_id = customer_id.0,
            loan_id = stored.loan_id.0,
            rate = stored.interest_rate_annual_pct,
            "loan disbursed"
        );

        Ok(DisbursalOutcome {
            loan_id: Some(stored.loan_id),
            customer_id,
            approved: true,
            message: "Loan approved successfully".to_string(),
            monthly_installment: stored.installment_amount,
        })
    }

    fn load(
        &self,
        customer_id: CustomerId,
    ) -> Result<(CustomerProfile, Vec<LoanRecord>), ServiceError> {
        let customer = self
            .customers
            .fetch(customer_id)?
            .ok_or(RepositoryError::NotFound)?;
        let history = self.loans.history(customer_id)?;
        Ok((customer, history))
    }
}

/// Result of a disbursal attempt, approved or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisbursalOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<LoanId>,
    pub customer_id: CustomerId,
    pub approved: bool,
    pub message: String,
    pub monthly_installment: f64,
}

/// Range checks for public-facing loan requests. The math layer itself is
/// total and never validates.
fn validate_request(request: &LoanRequest) -> Result<(), RequestValidationError> {
    if request.amount <= 0.0 {
        return Err(RequestValidationError::NonPositiveAmount);
    }
    if request.tenure_months == 0 || request.tenure_months > 600 {
        return Err(RequestValidationError::TenureOutOfRange {
            tenure_months: request.tenure_months,
        });
    }
    if !(0.0..=100.0).contains(&request.interest_rate_pct) {
        return Err(RequestValidationError::RateOutOfRange {
            rate: request.interest_rate_pct,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestValidationError {
    #[error("loan amount must be positive")]
    NonPositiveAmount,
    #[error("tenure of {tenure_months} months is outside 1..=600")]
    TenureOutOfRange { tenure_months: u32 },
    #[error("interest rate of {rate}% is outside 0..=100")]
    RateOutOfRange { rate: f64 },
}

/// Error raised by the lending service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid loan request: {0}")]
    Validation(#[from] RequestValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
