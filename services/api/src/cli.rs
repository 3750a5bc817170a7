use crate::demo::{run_demo, run_prepayment, run_schedule, DemoArgs, PrepaymentArgs, ScheduleArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Engine",
    about = "Run the credit scoring and loan-eligibility service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Standalone loan calculators
    Loan {
        #[command(subcommand)]
        command: LoanCommand,
    },
    /// Run an end-to-end CLI demo covering scoring and eligibility
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum LoanCommand {
    /// Print an amortization schedule, optionally exporting it as CSV
    Schedule(ScheduleArgs),
    /// Simulate a lump-sum prepayment partway through a loan
    Prepayment(PrepaymentArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Loan {
            command: LoanCommand::Schedule(args),
        } => run_schedule(args),
        Command::Loan {
            command: LoanCommand::Prepayment(args),
        } => run_prepayment(args),
        Command::Demo(args) => run_demo(args),
    }
}
