//! Lending core: amortization math, credit scoring, and the eligibility
//! decision engine, plus the service facade and HTTP router that expose
//! them.
//!
//! Everything in here computes over caller-supplied snapshots and an
//! explicit `as_of` date. No module reads the wall clock or touches
//! storage directly; persistence sits behind the [`repository`] traits.

pub mod amortization;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use amortization::{PrepaymentOutcome, ScheduleEntry};
pub use domain::{
    committed_installments, current_debt, CustomerId, CustomerProfile, LoanId, LoanRecord,
    LoanRequest,
};
pub use repository::{CustomerStore, LoanStore, RepositoryError};
pub use router::lending_router;
pub use scoring::{
    CreditScorer, EligibilityResult, RejectionReason, RiskBand, ScoreBreakdown, ScoreComponent,
    ScoreFactor, ScoringPolicy,
};
pub use service::{
    DisbursalOutcome, LendingService, RequestValidationError, ServiceError,
};
