use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::amortization;
use super::domain::{CustomerId, LoanRequest};
use super::repository::{CustomerStore, LoanStore, RepositoryError};
use super::scoring::RejectionReason;
use super::service::{LendingService, ServiceError};

/// Router builder exposing the scoring and eligibility endpoints.
pub fn lending_router<C, L>(service: Arc<LendingService<C, L>>) -> Router
where
    C: CustomerStore + 'static,
    L: LoanStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/loans/eligibility",
            post(check_eligibility_handler::<C, L>),
        )
        .route("/api/v1/loans", post(disburse_handler::<C, L>))
        .route(
            "/api/v1/customers/:customer_id/credit-score",
            get(credit_score_handler::<C, L>),
        )
        .route("/api/v1/loans/schedule", post(schedule_handler))
        .route("/api/v1/loans/prepayment", post(prepayment_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoanDecisionRequest {
    pub(crate) customer_id: u64,
    pub(crate) loan_amount: f64,
    pub(crate) interest_rate: f64,
    pub(crate) tenure: u32,
    /// Decision date; defaults to today.
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

impl LoanDecisionRequest {
    fn loan_request(&self) -> LoanRequest {
        LoanRequest {
            amount: self.loan_amount,
            interest_rate_pct: self.interest_rate,
            tenure_months: self.tenure,
        }
    }

    fn as_of(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibilityView {
    pub(crate) customer_id: u64,
    pub(crate) approval: bool,
    pub(crate) credit_score: u8,
    pub(crate) interest_rate: f64,
    pub(crate) corrected_interest_rate: f64,
    pub(crate) tenure: u32,
    pub(crate) monthly_installment: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reason: Option<RejectionReason>,
}

pub(crate) async fn check_eligibility_handler<C, L>(
    State(service): State<Arc<LendingService<C, L>>>,
    axum::Json(payload): axum::Json<LoanDecisionRequest>,
) -> Response
where
    C: CustomerStore + 'static,
    L: LoanStore + 'static,
{
    let request = payload.loan_request();
    match service.check_eligibility(CustomerId(payload.customer_id), &request, payload.as_of()) {
        Ok(result) => {
            let view = EligibilityView {
                customer_id: payload.customer_id,
                approval: result.approved,
                credit_score: result.credit_score,
                interest_rate: payload.interest_rate,
                corrected_interest_rate: result.corrected_interest_rate,
                tenure: payload.tenure,
                monthly_installment: result.monthly_installment,
                reason: result.reason,
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn disburse_handler<C, L>(
    State(service): State<Arc<LendingService<C, L>>>,
    axum::Json(payload): axum::Json<LoanDecisionRequest>,
) -> Response
where
    C: CustomerStore + 'static,
    L: LoanStore + 'static,
{
    let request = payload.loan_request();
    match service.disburse(CustomerId(payload.customer_id), &request, payload.as_of()) {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreditScoreQuery {
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) async fn credit_score_handler<C, L>(
    State(service): State<Arc<LendingService<C, L>>>,
    Path(customer_id): Path<u64>,
    Query(query): Query<CreditScoreQuery>,
) -> Response
where
    C: CustomerStore + 'static,
    L: LoanStore + 'static,
{
    let as_of = query.as_of.unwrap_or_else(|| Local::now().date_naive());
    match service.credit_score(CustomerId(customer_id), as_of) {
        Ok(breakdown) => (StatusCode::OK, axum::Json(breakdown)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScheduleRequest {
    pub(crate) principal: f64,
    pub(crate) interest_rate: f64,
    pub(crate) tenure: u32,
}

pub(crate) async fn schedule_handler(
    axum::Json(payload): axum::Json<ScheduleRequest>,
) -> Response {
    let emi = amortization::calculate_emi(payload.principal, payload.interest_rate, payload.tenure);
    let schedule = amortization::schedule(payload.principal, payload.interest_rate, payload.tenure);
    let body = json!({
        "emi": emi,
        "total_interest": amortization::total_interest(payload.principal, emi, payload.tenure),
        "schedule": schedule,
    });
    (StatusCode::OK, axum::Json(body)).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct PrepaymentRequest {
    pub(crate) principal: f64,
    pub(crate) interest_rate: f64,
    pub(crate) tenure: u32,
    pub(crate) prepayment_amount: f64,
    pub(crate) prepayment_month: u32,
}

pub(crate) async fn prepayment_handler(
    axum::Json(payload): axum::Json<PrepaymentRequest>,
) -> Response {
    let outcome = amortization::prepayment_savings(
        payload.principal,
        payload.interest_rate,
        payload.tenure,
        payload.prepayment_amount,
        payload.prepayment_month,
    );
    (StatusCode::OK, axum::Json(outcome)).into_response()
}

fn error_response(error: ServiceError) -> Response {
    match error {
        ServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "customer not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        ServiceError::Validation(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
