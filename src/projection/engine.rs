//! Core projection engine for yearly household cashflow projections

use log::{debug, info};

use super::cashflows::{ExpenseDetail, IncomeDetail, ProjectionSummary, SimulationResult, YearRow};
use super::request::SimulationRequest;
use super::state::ProjectionState;
use crate::error::{ProjectionError, ProjectionResult};
use crate::records::{ExpenseRecord, ExpenseTerms, IncomeRecord, IncomeTerms, RecordId, ResolvedRecords};

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Whether to record per-record income/expense details on each row
    pub detailed_output: bool,

    /// Log years whose balance is negative
    pub log_deficit_years: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            detailed_output: true,
            log_deficit_years: true,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project every year of the request over an already-resolved snapshot.
    ///
    /// Records absent from the snapshot simply do not contribute. A record
    /// that cannot be evaluated aborts the run with
    /// [`ProjectionError::ComputationFault`].
    pub fn run(&self, request: &SimulationRequest, records: &ResolvedRecords) -> ProjectionResult<SimulationResult> {
        let window = request.validate()?;
        info!(
            "Projection start: {}-{} ({} years), base age {}, {} income / {} expense records",
            window.start_year,
            window.end_year,
            window.year_count(),
            window.base_age,
            records.incomes().len(),
            records.expenses().len()
        );

        let mut state = ProjectionState::new(&window);
        let mut rows = Vec::new();

        loop {
            let row = self.calculate_year(records, &mut state)?;
            rows.push(row);
            if !state.advance_year() {
                break;
            }
        }

        let summary = ProjectionSummary::from_state(&state);
        info!(
            "Projection complete: {}-{}, final cumulative balance {:.0}",
            window.start_year, window.end_year, summary.final_cumulative_balance
        );

        Ok(SimulationResult { rows, summary })
    }

    /// Calculate income, expenses and balance for the state's current year
    fn calculate_year(&self, records: &ResolvedRecords, state: &mut ProjectionState) -> ProjectionResult<YearRow> {
        let year = state.year;
        let mut row = YearRow::new(year, state.age);

        for record in records.incomes().iter().filter(|r| r.window.contains(year)) {
            let amount = annual_income(record, year)?;
            debug!("{} {} income {}: {:.0}", year, record.kind().as_str(), record.id, amount);
            row.total_income += amount;
            if self.config.detailed_output {
                row.income_details.push(IncomeDetail {
                    kind: record.kind(),
                    record_id: record.id,
                    name: record.name.clone(),
                    amount,
                });
            }
        }

        for record in records.expenses().iter().filter(|r| r.window.contains(year)) {
            let amount = annual_expense(record, year)?;
            debug!("{} {} expense {}: {:.0}", year, record.kind().as_str(), record.id, amount);
            row.total_expenses += amount;
            if self.config.detailed_output {
                row.expense_details.push(ExpenseDetail {
                    kind: record.kind(),
                    record_id: record.id,
                    name: record.name.clone(),
                    amount,
                });
            }
        }

        row.balance = state.record_year(row.total_income, row.total_expenses);
        row.cumulative_balance = state.cumulative_balance;

        if self.config.log_deficit_years && row.balance < 0.0 {
            info!(
                "Negative balance in {}: income {:.0}, expenses {:.0}, balance {:.0}",
                year, row.total_income, row.total_expenses, row.balance
            );
        }

        Ok(row)
    }
}

/// Project with the default configuration
pub fn run_projection(request: &SimulationRequest, records: &ResolvedRecords) -> ProjectionResult<SimulationResult> {
    ProjectionEngine::default().run(request, records)
}

/// Identifies the record under evaluation so a bad figure can be reported
struct Evaluation {
    year: i32,
    category: &'static str,
    record_id: RecordId,
}

impl Evaluation {
    fn fault(&self, reason: String) -> ProjectionError {
        ProjectionError::ComputationFault {
            year: self.year,
            category: self.category,
            record_id: self.record_id,
            reason,
        }
    }

    /// Stored amounts must be finite and non-negative
    fn amount(&self, field: &str, value: f64) -> ProjectionResult<f64> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(self.fault(format!("{} is invalid ({})", field, value)))
        }
    }

    /// Rates may be negative but must be finite
    fn rate(&self, field: &str, value: f64) -> ProjectionResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.fault(format!("{} is invalid ({})", field, value)))
        }
    }

    fn result(&self, value: f64) -> ProjectionResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.fault(format!("annual amount overflowed ({})", value)))
        }
    }
}

/// Compounding factor for a percentage rate over `years_passed` years
fn growth_factor(rate_pct: f64, years_passed: u32) -> f64 {
    let base = 1.0 + rate_pct / 100.0;
    match i32::try_from(years_passed) {
        Ok(n) => base.powi(n),
        Err(_) => base.powf(f64::from(years_passed)),
    }
}

/// Apply an optional ceiling; a non-positive cap means no ceiling
fn apply_cap(annual: f64, cap: Option<f64>) -> f64 {
    match cap {
        Some(limit) if limit > 0.0 => annual.min(limit),
        _ => annual,
    }
}

/// Annual income from one record in `year`. The caller ensures the record's
/// window contains `year`.
pub fn annual_income(record: &IncomeRecord, year: i32) -> ProjectionResult<f64> {
    let eval = Evaluation {
        year,
        category: record.kind().as_str(),
        record_id: record.id,
    };
    let years_passed = record.window.years_passed(year);

    let annual = match record.terms {
        IncomeTerms::Salary { monthly_amount, annual_bonus, increase_rate, cap } => {
            let factor = growth_factor(eval.rate("increase_rate", increase_rate)?, years_passed);
            let monthly = eval.amount("monthly_amount", monthly_amount)? * factor;
            let bonus = eval.amount("annual_bonus", annual_bonus)? * factor;
            apply_cap(monthly * 12.0 + bonus, cap_limit(&eval, cap)?)
        }
        IncomeTerms::Sidejob { monthly_amount, increase_rate, cap }
        | IncomeTerms::Business { monthly_amount, increase_rate, cap } => {
            let factor = growth_factor(eval.rate("increase_rate", increase_rate)?, years_passed);
            let monthly = eval.amount("monthly_amount", monthly_amount)? * factor;
            apply_cap(monthly * 12.0, cap_limit(&eval, cap)?)
        }
        IncomeTerms::Investment { annual_amount, annual_return_rate } => {
            let factor = growth_factor(eval.rate("annual_return_rate", annual_return_rate)?, years_passed);
            eval.amount("annual_amount", annual_amount)? * factor
        }
        IncomeTerms::Pension { annual_amount } | IncomeTerms::Other { annual_amount } => {
            eval.amount("annual_amount", annual_amount)?
        }
    };

    eval.result(annual)
}

fn cap_limit(eval: &Evaluation, cap: Option<f64>) -> ProjectionResult<Option<f64>> {
    cap.map(|limit| eval.rate("annual_income_cap", limit)).transpose()
}

/// Annual expense from one record in `year`. The caller ensures the record's
/// window contains `year`.
pub fn annual_expense(record: &ExpenseRecord, year: i32) -> ProjectionResult<f64> {
    let eval = Evaluation {
        year,
        category: record.kind().as_str(),
        record_id: record.id,
    };

    let annual = match record.terms {
        ExpenseTerms::Living { monthly_total_amount, inflation_rate } => {
            let factor = growth_factor(
                eval.rate("inflation_rate", inflation_rate)?,
                record.window.years_passed(year),
            );
            eval.amount("monthly_total_amount", monthly_total_amount)? * 12.0 * factor
        }
        ExpenseTerms::Housing { monthly_total_amount } | ExpenseTerms::Insurance { monthly_total_amount } => {
            eval.amount("monthly_total_amount", monthly_total_amount)? * 12.0
        }
        ExpenseTerms::Education { monthly_amount, .. } => eval.amount("monthly_amount", monthly_amount)? * 12.0,
        ExpenseTerms::Event { amount, .. } => eval.amount("amount", amount)?,
    };

    eval.result(annual)
}
