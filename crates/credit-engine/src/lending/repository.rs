use super::domain::{CustomerId, CustomerProfile, LoanId, LoanRecord};

/// Customer lookup abstraction so the service module can be exercised in
/// isolation; production adapters live with the serving layer.
pub trait CustomerStore: Send + Sync {
    fn insert(&self, profile: CustomerProfile) -> Result<CustomerProfile, RepositoryError>;
    fn fetch(&self, id: CustomerId) -> Result<Option<CustomerProfile>, RepositoryError>;
}

/// Loan history storage abstraction.
pub trait LoanStore: Send + Sync {
    fn insert(&self, customer: CustomerId, loan: LoanRecord) -> Result<LoanRecord, RepositoryError>;
    /// All loans ever recorded for the customer, active or not.
    fn history(&self, customer: CustomerId) -> Result<Vec<LoanRecord>, RepositoryError>;
    fn fetch(&self, id: LoanId) -> Result<Option<(CustomerId, LoanRecord)>, RepositoryError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
