use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use credit_engine::config::LendingConfig;
use credit_engine::lending::{
    CustomerId, CustomerProfile, CustomerStore, LoanId, LoanRecord, LoanStore, RepositoryError,
    ScoringPolicy,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCustomerStore {
    profiles: Arc<Mutex<HashMap<CustomerId, CustomerProfile>>>,
}

impl CustomerStore for InMemoryCustomerStore {
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryLoanStore {
    loans: Arc<Mutex<Vec<(CustomerId, LoanRecord)>>>,
}

impl LoanStore for InMemoryLoanStore {
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
        Ok(guard.iter().find(|(_, loan)| loan.loan_id == id).cloned())
    }
}

/// Product scoring policy with the deployment-tunable knobs applied.
pub(crate) fn scoring_policy(lending: &LendingConfig) -> ScoringPolicy {
    ScoringPolicy {
        emi_income_cap: lending.emi_income_cap,
        ..ScoringPolicy::default()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
