use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::amortization;

/// Identifier wrapper for registered customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub u64);

/// Identifier wrapper for disbursed loans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoanId(pub u64);

/// Customer snapshot consumed by the scorer. The approved limit is a
/// pre-computed affordability ceiling owned by the customer store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_id: CustomerId,
    pub monthly_income: f64,
    pub approved_limit: f64,
}

/// Immutable snapshot of a past or running loan supplied for scoring.
///
/// `installment_amount` and `end_date` are derived at open time and never
/// recomputed afterwards; the record is treated as a historical fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan_id: LoanId,
    pub principal: f64,
    pub tenure_months: u32,
    pub interest_rate_annual_pct: f64,
    pub installment_amount: f64,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl LoanRecord {
    /// Open a new loan starting at `start_date`, deriving the installment
    /// from the amortization formula and the end date from the tenure.
    pub fn open(
        loan_id: LoanId,
        principal: f64,
        interest_rate_annual_pct: f64,
        tenure_months: u32,
        start_date: NaiveDate,
    ) -> Self {
        let installment_amount =
            amortization::calculate_emi(principal, interest_rate_annual_pct, tenure_months);
        Self {
            loan_id,
            principal,
            tenure_months,
            interest_rate_annual_pct,
            installment_amount,
            emis_paid_on_time: 0,
            start_date,
            end_date: loan_end_date(start_date, tenure_months),
        }
    }

    /// A loan is active while `as_of` sits inside its window, inclusive on
    /// both ends.
    pub fn is_active(&self, as_of: NaiveDate) -> bool {
        self.start_date <= as_of && as_of <= self.end_date
    }

    /// Whole months elapsed since the start, not counting a month until
    /// its payment day has been reached.
    fn months_elapsed(&self, as_of: NaiveDate) -> u32 {
        let mut months = (as_of.year() - self.start_date.year()) * 12
            + (as_of.month() as i32 - self.start_date.month() as i32);
        if as_of.day() < self.start_date.day() {
            months -= 1;
        }
        months.max(0) as u32
    }

    /// Installments still owed as of the given date. Zero for loans whose
    /// window has closed or not yet opened.
    pub fn repayments_remaining(&self, as_of: NaiveDate) -> u32 {
        if !self.is_active(as_of) {
            return 0;
        }
        self.tenure_months.saturating_sub(self.months_elapsed(as_of))
    }

    /// Remaining installment obligation on this loan.
    pub fn outstanding_debt(&self, as_of: NaiveDate) -> f64 {
        self.installment_amount * f64::from(self.repayments_remaining(as_of))
    }
}

/// End date of a loan opened on `start_date` with the given tenure.
pub fn loan_end_date(start_date: NaiveDate, tenure_months: u32) -> NaiveDate {
    start_date
        .checked_add_months(Months::new(tenure_months))
        .unwrap_or(NaiveDate::MAX)
}

/// A requested loan under eligibility evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub amount: f64,
    pub interest_rate_pct: f64,
    pub tenure_months: u32,
}

/// Sum of remaining installment obligations across a customer's active
/// loans. This is the figure compared against the approved limit.
pub fn current_debt(loans: &[LoanRecord], as_of: NaiveDate) -> f64 {
    loans
        .iter()
        .filter(|loan| loan.is_active(as_of))
        .map(|loan| loan.outstanding_debt(as_of))
        .sum()
}

/// Sum of monthly installments currently committed across active loans.
pub fn committed_installments(loans: &[LoanRecord], as_of: NaiveDate) -> f64 {
    loans
        .iter()
        .filter(|loan| loan.is_active(as_of))
        .map(|loan| loan.installment_amount)
        .sum()
}
