//! Life-plan projection CLI
//!
//! Command-line interface for running household projections, mortgage
//! payments and education cost schedules

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use lifeplan_projection::education::{
    compute_schedule, CollegeTier, EducationCostTable, KindergartenTier, SchoolTier, TierSelections,
};
use lifeplan_projection::housing::{HousingCosts, LoanTerms, RepaymentMethod};
use lifeplan_projection::projection::{ProjectionConfig, SimulationRequest, SimulationResult};
use lifeplan_projection::records::load_record_store;
use lifeplan_projection::ScenarioRunner;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRepaymentMethod {
    EqualPayment,
    EqualPrincipal,
}

impl From<CliRepaymentMethod> for RepaymentMethod {
    fn from(value: CliRepaymentMethod) -> Self {
        match value {
            CliRepaymentMethod::EqualPayment => RepaymentMethod::EqualPayment,
            CliRepaymentMethod::EqualPrincipal => RepaymentMethod::EqualPrincipal,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliKindergartenTier {
    None,
    Public,
    Private,
}

impl From<CliKindergartenTier> for KindergartenTier {
    fn from(value: CliKindergartenTier) -> Self {
        match value {
            CliKindergartenTier::None => KindergartenTier::None,
            CliKindergartenTier::Public => KindergartenTier::Public,
            CliKindergartenTier::Private => KindergartenTier::Private,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliSchoolTier {
    None,
    Public,
    Private,
}

impl From<CliSchoolTier> for SchoolTier {
    fn from(value: CliSchoolTier) -> Self {
        match value {
            CliSchoolTier::None => SchoolTier::None,
            CliSchoolTier::Public => SchoolTier::Public,
            CliSchoolTier::Private => SchoolTier::Private,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCollegeTier {
    None,
    National,
    PrivateLiberal,
    PrivateScience,
    JuniorCollege,
    Vocational,
}

impl From<CliCollegeTier> for CollegeTier {
    fn from(value: CliCollegeTier) -> Self {
        match value {
            CliCollegeTier::None => CollegeTier::None,
            CliCollegeTier::National => CollegeTier::National,
            CliCollegeTier::PrivateLiberal => CollegeTier::PrivateLiberal,
            CliCollegeTier::PrivateScience => CollegeTier::PrivateScience,
            CliCollegeTier::JuniorCollege => CollegeTier::JuniorCollege,
            CliCollegeTier::Vocational => CollegeTier::Vocational,
        }
    }
}

#[derive(Parser)]
#[command(name = "lifeplan", version, about = "Household life-plan projections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project income, expenses and cumulative balance year by year
    Project {
        /// Directory containing incomes.csv, expenses.csv and itemized.json
        #[arg(long, default_value = lifeplan_projection::records::loader::DEFAULT_RECORDS_PATH)]
        records: PathBuf,
        /// Simulation request JSON
        #[arg(long)]
        request: PathBuf,
        /// Per-year CSV output
        #[arg(long, default_value = "projection_output.csv")]
        output: PathBuf,
        /// Skip per-record details
        #[arg(long)]
        summary_only: bool,
    },
    /// Monthly mortgage payment and total monthly housing cost
    Mortgage {
        /// Principal borrowed
        #[arg(long, required_unless_present = "purchase_price", conflicts_with = "purchase_price")]
        loan_amount: Option<f64>,
        /// Purchase price; the loan is the price minus the down payment
        #[arg(long)]
        purchase_price: Option<f64>,
        #[arg(long, default_value_t = 0.0, requires = "purchase_price")]
        down_payment: f64,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        term_years: u32,
        #[arg(long, value_enum, default_value_t = CliRepaymentMethod::EqualPayment)]
        method: CliRepaymentMethod,
        #[arg(long, default_value_t = 0.0)]
        property_tax: f64,
        #[arg(long, default_value_t = 0.0)]
        management_fee: f64,
        #[arg(long, default_value_t = 0.0)]
        repair_reserve: f64,
        #[arg(long, default_value_t = 0.0)]
        fire_insurance: f64,
    },
    /// Education cost schedule for one child
    Education {
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: NaiveDate,
        #[arg(long, value_enum, default_value_t = CliKindergartenTier::None)]
        kindergarten: CliKindergartenTier,
        #[arg(long, value_enum, default_value_t = CliSchoolTier::Public)]
        elementary: CliSchoolTier,
        #[arg(long, value_enum, default_value_t = CliSchoolTier::Public)]
        junior_high: CliSchoolTier,
        #[arg(long, value_enum, default_value_t = CliSchoolTier::Public)]
        high_school: CliSchoolTier,
        #[arg(long, value_enum, default_value_t = CliCollegeTier::None)]
        college: CliCollegeTier,
        /// Cost table CSV overriding the built-in costs
        #[arg(long)]
        costs: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Project { records, request, output, summary_only } => {
            run_project(&records, &request, &output, summary_only)
        }
        Command::Mortgage {
            loan_amount,
            purchase_price,
            down_payment,
            rate,
            term_years,
            method,
            property_tax,
            management_fee,
            repair_reserve,
            fire_insurance,
        } => {
            let loan = match (loan_amount, purchase_price) {
                (Some(amount), _) => LoanTerms {
                    loan_amount: amount,
                    interest_rate: rate,
                    term_years,
                    repayment_method: method.into(),
                },
                (None, price) => LoanTerms::from_purchase(
                    price.unwrap_or_default(),
                    down_payment,
                    rate,
                    term_years,
                    method.into(),
                ),
            };
            let costs = HousingCosts {
                property_tax_monthly: property_tax,
                management_fee_monthly: management_fee,
                repair_reserve_monthly: repair_reserve,
                fire_insurance_monthly: fire_insurance,
                ..HousingCosts::owned_with_loan(loan)
            };
            print_housing(&costs);
            Ok(())
        }
        Command::Education {
            birth_date,
            kindergarten,
            elementary,
            junior_high,
            high_school,
            college,
            costs,
        } => {
            let selections = TierSelections {
                kindergarten: kindergarten.into(),
                elementary: elementary.into(),
                junior_high: junior_high.into(),
                high_school: high_school.into(),
                college: college.into(),
            };
            let table = match costs {
                Some(path) => EducationCostTable::from_csv_path(&path)
                    .with_context(|| format!("loading cost table {}", path.display()))?,
                None => EducationCostTable::default(),
            };
            run_education(birth_date, &selections, &table);
            Ok(())
        }
    }
}

fn print_housing(costs: &HousingCosts) {
    if let Some(loan) = &costs.loan {
        println!("Loan amount:     {:.0}", loan.loan_amount);
    }
    let payment = costs.mortgage_monthly();
    println!("Monthly payment: {:.0}", payment);
    println!("Annual payment:  {:.0}", payment * 12.0);
    println!("Monthly housing: {:.0}", costs.monthly_total());
}

fn run_project(records: &Path, request: &Path, output: &Path, summary_only: bool) -> Result<()> {
    let store = load_record_store(records)
        .with_context(|| format!("loading records from {}", records.display()))?;
    let request = SimulationRequest::from_json_path(request)
        .with_context(|| format!("reading request {}", request.display()))?;

    let config = ProjectionConfig {
        detailed_output: !summary_only,
        ..Default::default()
    };
    let runner = ScenarioRunner::with_config(store, config);
    let result = runner.run(&request)?;

    print_projection(&result);
    write_projection_csv(output, &result)?;
    println!("\nFull results written to: {}", output.display());
    Ok(())
}

fn print_projection(result: &SimulationResult) {
    println!(
        "{:>6} {:>4} {:>14} {:>14} {:>14} {:>16}",
        "Year", "Age", "Income", "Expenses", "Balance", "Cumulative"
    );
    println!("{}", "-".repeat(74));

    for row in &result.rows {
        println!(
            "{:>6} {:>4} {:>14.0} {:>14.0} {:>14.0} {:>16.0}",
            row.year, row.age, row.total_income, row.total_expenses, row.balance, row.cumulative_balance
        );
    }

    let summary = &result.summary;
    println!("\nSummary:");
    println!("  Total Years: {}", summary.total_years);
    println!("  Total Income: {:.0}", summary.total_income);
    println!("  Total Expenses: {:.0}", summary.total_expenses);
    println!("  Final Cumulative Balance: {:.0}", summary.final_cumulative_balance);
    println!("  Average Annual Balance: {:.0}", summary.avg_annual_balance);

    if let Some((year, low)) = result.lowest_cumulative_balance() {
        if low < 0.0 {
            println!("  Lowest Cumulative Balance: {:.0} ({})", low, year);
        }
    }
}

fn write_projection_csv(path: &Path, result: &SimulationResult) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;

    writeln!(file, "Year,Age,Income,Expenses,Balance,CumulativeBalance")?;
    for row in &result.rows {
        writeln!(
            file,
            "{},{},{:.2},{:.2},{:.2},{:.2}",
            row.year, row.age, row.total_income, row.total_expenses, row.balance, row.cumulative_balance
        )?;
    }

    Ok(())
}

fn run_education(birth_date: NaiveDate, selections: &TierSelections, table: &EducationCostTable) {
    let schedule = compute_schedule(birth_date, selections, table);

    println!("{:<14} {:<16} {:>10} {:>6} {:>6} {:>12}", "Stage", "Tier", "Monthly", "From", "To", "Total");
    println!("{}", "-".repeat(70));
    for stage in &schedule {
        println!(
            "{:<14} {:<16} {:>10.0} {:>6} {:>6} {:>12.0}",
            stage.stage.as_str(),
            stage.tier,
            stage.monthly_cost,
            stage.start_year,
            stage.end_year,
            stage.total_cost()
        );
    }

    let total: f64 = schedule.iter().map(|s| s.total_cost()).sum();
    println!("\nTotal education cost: {:.0}", total);
}
