use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::infra::{parse_date, InMemoryCustomerStore, InMemoryLoanStore};
use credit_engine::error::AppError;
use credit_engine::lending::{
    amortization, CustomerId, CustomerProfile, CustomerStore, LendingService, LoanId, LoanRecord,
    LoanRequest, LoanStore, ScoringPolicy,
};

#[derive(Args, Debug)]
pub(crate) struct ScheduleArgs {
    /// Loan principal
    #[arg(long)]
    pub(crate) principal: f64,
    /// Annual interest rate in percent
    #[arg(long)]
    pub(crate) interest_rate: f64,
    /// Tenure in months
    #[arg(long)]
    pub(crate) tenure: u32,
    /// Write the schedule to this CSV file instead of printing every row
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct PrepaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub(crate) principal: f64,
    /// Annual interest rate in percent
    #[arg(long)]
    pub(crate) interest_rate: f64,
    /// Tenure in months
    #[arg(long)]
    pub(crate) tenure: u32,
    /// Lump sum prepaid
    #[arg(long)]
    pub(crate) amount: f64,
    /// Month at which the lump sum is paid
    #[arg(long)]
    pub(crate) month: u32,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) fn run_schedule(args: ScheduleArgs) -> Result<(), AppError> {
    let emi = amortization::calculate_emi(args.principal, args.interest_rate, args.tenure);
    let rows = amortization::schedule(args.principal, args.interest_rate, args.tenure);

    println!(
        "EMI {:.2} over {} months, total interest {:.2}",
        emi,
        args.tenure,
        amortization::total_interest(args.principal, emi, args.tenure)
    );

    if let Some(path) = args.csv {
        let file = File::create(&path)?;
        amortization::write_schedule_csv(&rows, file)?;
        println!("schedule written to {}", path.display());
        return Ok(());
    }

    println!("month  emi         principal   interest    balance");
    for row in &rows {
        println!(
            "{:>5}  {:>10.2}  {:>10.2}  {:>10.2}  {:>10.2}",
            row.month, row.emi, row.principal_component, row.interest_component, row.balance
        );
    }
    Ok(())
}

pub(crate) fn run_prepayment(args: PrepaymentArgs) -> Result<(), AppError> {
    let outcome = amortization::prepayment_savings(
        args.principal,
        args.interest_rate,
        args.tenure,
        args.amount,
        args.month,
    );

    println!(
        "prepaying {:.2} in month {} shortens the loan to {} months ({} saved)",
        args.amount, args.month, outcome.new_tenure_months, outcome.months_saved
    );
    println!(
        "interest saved {:.2}, balance after prepayment {:.2}",
        outcome.interest_saved, outcome.balance_after_prepayment
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let customers = Arc::new(InMemoryCustomerStore::default());
    let loans = Arc::new(InMemoryLoanStore::default());
    seed(&*customers, &*loans, as_of);
    let service = Arc::new(LendingService::new(
        customers,
        loans,
        ScoringPolicy::default(),
    ));

    for customer_id in [CustomerId(1), CustomerId(2)] {
        let breakdown = service.credit_score(customer_id, as_of)?;
        println!(
            "customer {} scores {} ({} risk){}",
            customer_id.0,
            breakdown.score,
            breakdown.risk.label(),
            if breakdown.limit_exceeded {
                ", active debt beyond the approved limit"
            } else {
                ""
            }
        );
        for component in &breakdown.components {
            println!(
                "  {:?}: {:.1} x {:.2} -- {}",
                component.factor, component.raw, component.weight, component.notes
            );
        }
    }

    let request = LoanRequest {
        amount: 250_000.0,
        interest_rate_pct: 9.0,
        tenure_months: 36,
    };
    let outcome = service.disburse(CustomerId(1), &request, as_of)?;
    println!(
        "customer 1 requests {:.0} over {} months: {}",
        request.amount, request.tenure_months, outcome.message
    );
    if let Some(loan_id) = outcome.loan_id {
        println!(
            "  loan {} opened at {:.2}/month",
            loan_id.0, outcome.monthly_installment
        );
    }

    Ok(())
}

fn seed(customers: &InMemoryCustomerStore, loans: &InMemoryLoanStore, as_of: NaiveDate) {
    let steady = CustomerProfile {
        customer_id: CustomerId(1),
        monthly_income: 100_000.0,
        approved_limit: 1_000_000.0,
    };
    let stretched = CustomerProfile {
        customer_id: CustomerId(2),
        monthly_income: 60_000.0,
        approved_limit: 50_000.0,
    };
    customers.insert(steady).expect("seed customer");
    customers.insert(stretched).expect("seed customer");

    // Settled history for the steady borrower.
    let mut settled = LoanRecord::open(
        LoanId(9001),
        200_000.0,
        10.0,
        24,
        as_of - chrono::Months::new(30),
    );
    settled.emis_paid_on_time = 24;
    loans.insert(CustomerId(1), settled).expect("seed loan");

    // A large running loan that pushes the stretched borrower past their
    // approved limit.
    let running = LoanRecord::open(
        LoanId(9002),
        800_000.0,
        11.0,
        60,
        as_of - chrono::Months::new(6),
    );
    loans.insert(CustomerId(2), running).expect("seed loan");
}
