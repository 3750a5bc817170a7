use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::lending::domain::{CustomerId, CustomerProfile, LoanId, LoanRecord};
use crate::lending::repository::{CustomerStore, LoanStore, RepositoryError};
use crate::lending::scoring::ScoringPolicy;
use crate::lending::service::LendingService;

/// Fixed evaluation date so current-year and active-window checks are
/// deterministic.
pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

pub(super) fn policy() -> ScoringPolicy {
    ScoringPolicy::default()
}

pub(super) fn customer(monthly_income: f64, approved_limit: f64) -> CustomerProfile {
    CustomerProfile {
        customer_id: CustomerId(42),
        monthly_income,
        approved_limit,
    }
}

/// A fully repaid historical loan whose window closed before `as_of`.
pub(super) fn settled_loan(
    id: u64,
    principal: f64,
    tenure_months: u32,
    emis_paid_on_time: u32,
    start: (i32, u32, u32),
) -> LoanRecord {
    let start_date = NaiveDate::from_ymd_opt(start.0, start.1, start.2).expect("valid date");
    let mut loan = LoanRecord::open(LoanId(id), principal, 10.0, tenure_months, start_date);
    loan.emis_paid_on_time = emis_paid_on_time;
    loan
}

/// Two settled loans: 34 of 36 installments on time, principal totalling
/// exactly 0.3x of a 1_000_000 limit. Scores 91 under the default policy.
/// Seeded ids sit well above the disbursal sequence.
pub(super) fn clean_history() -> Vec<LoanRecord> {
    vec![
        settled_loan(9001, 200_000.0, 24, 24, (2022, 1, 10)),
        settled_loan(9002, 100_000.0, 12, 10, (2023, 3, 5)),
    ]
}

#[derive(Default)]
pub(super) struct MemoryCustomers {
    profiles: Mutex<HashMap<CustomerId, CustomerProfile>>,
}

impl CustomerStore for MemoryCustomers {
    fn insert(&self, profile: CustomerProfile) -> Result<CustomerProfile, RepositoryError> {
        let mut guard = self.profiles.lock().expect("customer mutex poisoned");
        if guard.contains_key(&profile.customer_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(profile.customer_id, profile.clone());
        Ok(profile)
    }

    fn fetch(&self, id: CustomerId) -> Result<Option<CustomerProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("customer mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryLoans {
    loans: Mutex<Vec<(CustomerId, LoanRecord)>>,
}

impl LoanStore for MemoryLoans {
    fn insert(&self, customer: CustomerId, loan: LoanRecord) -> Result<LoanRecord, RepositoryError> {
        let mut guard = self.loans.lock().expect("loan mutex poisoned");
        if guard.iter().any(|(_, stored)| stored.loan_id == loan.loan_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push((customer, loan.clone()));
        Ok(loan)
    }

    fn history(&self, customer: CustomerId) -> Result<Vec<LoanRecord>, RepositoryError> {
        let guard = self.loans.lock().expect("loan mutex poisoned");
        Ok(guard
            .iter()
            .filter(|(owner, _)| *owner == customer)
            .map(|(_, loan)| loan.clone())
            .collect())
    }

    fn fetch(&self, id: LoanId) -> Result<Option<(CustomerId, LoanRecord)>, RepositoryError> {
        let guard = self.loans.lock().expect("loan mutex poisoned");
        Ok(guard
            .iter()
            .find(|(_, loan)| loan.loan_id == id)
            .cloned())
    }
}

/// Store double that always fails, for exercising error paths.
pub(super) struct UnavailableCustomers;

impl CustomerStore for UnavailableCustomers {
    fn insert(&self, _profile: CustomerProfile) -> Result<CustomerProfile, RepositoryError> {
        Err(RepositoryError::Unavailable("customers offline".to_string()))
    }

    fn fetch(&self, _id: CustomerId) -> Result<Option<CustomerProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("customers offline".to_string()))
    }
}

/// Service over fresh in-memory stores, seeded with the given customer
/// and history.
pub(super) fn build_service(
    profile: CustomerProfile,
    history: Vec<LoanRecord>,
) -> (
    Arc<LendingService<MemoryCustomers, MemoryLoans>>,
    Arc<MemoryCustomers>,
    Arc<MemoryLoans>,
) {
    let customers = Arc::new(MemoryCustomers::default());
    let loans = Arc::new(MemoryLoans::default());
    let customer_id = profile.customer_id;
    customers.insert(profile).expect("seed customer");
    for loan in history {
        loans.insert(customer_id, loan).expect("seed loan");
    }
    let service = Arc::new(LendingService::new(customers.clone(), loans.clone(), policy()));
    (service, customers, loans)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("json body")
}
