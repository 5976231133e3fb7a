//! Yearly cashflow output structures for projections

use serde::{Deserialize, Serialize};

use super::state::ProjectionState;
use crate::records::{ExpenseKind, IncomeKind, RecordId};

/// One income record's contribution to a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeDetail {
    #[serde(rename = "type")]
    pub kind: IncomeKind,
    pub record_id: RecordId,
    pub name: String,
    pub amount: f64,
}

/// One expense record's contribution to a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDetail {
    #[serde(rename = "type")]
    pub kind: ExpenseKind,
    pub record_id: RecordId,
    pub name: String,
    pub amount: f64,
}

/// A single row of projection output for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRow {
    pub year: i32,
    pub age: u32,
    pub total_income: f64,
    pub total_expenses: f64,
    /// Income minus expenses for this year
    pub balance: f64,
    pub cumulative_balance: f64,
    pub income_details: Vec<IncomeDetail>,
    pub expense_details: Vec<ExpenseDetail>,
}

impl YearRow {
    pub fn new(year: i32, age: u32) -> Self {
        Self {
            year,
            age,
            total_income: 0.0,
            total_expenses: 0.0,
            balance: 0.0,
            cumulative_balance: 0.0,
            income_details: Vec::new(),
            expense_details: Vec::new(),
        }
    }

    /// Income contributed by one category this year
    pub fn income_by_kind(&self, kind: IncomeKind) -> f64 {
        self.income_details
            .iter()
            .filter(|d| d.kind == kind)
            .map(|d| d.amount)
            .sum()
    }

    /// Expenses contributed by one category this year
    pub fn expense_by_kind(&self, kind: ExpenseKind) -> f64 {
        self.expense_details
            .iter()
            .filter(|d| d.kind == kind)
            .map(|d| d.amount)
            .sum()
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub final_cumulative_balance: f64,
    pub avg_annual_balance: f64,
}

impl ProjectionSummary {
    pub fn from_state(state: &ProjectionState) -> Self {
        Self {
            total_years: state.years_projected,
            total_income: state.total_income,
            total_expenses: state.total_expenses,
            final_cumulative_balance: state.cumulative_balance,
            avg_annual_balance: state.avg_annual_balance(),
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Yearly rows in ascending year order
    pub rows: Vec<YearRow>,
    pub summary: ProjectionSummary,
}

impl SimulationResult {
    /// Years whose own balance is negative
    pub fn deficit_years(&self) -> Vec<i32> {
        self.rows
            .iter()
            .filter(|r| r.balance < 0.0)
            .map(|r| r.year)
            .collect()
    }

    /// Lowest point of the cumulative balance, with the year it occurs
    pub fn lowest_cumulative_balance(&self) -> Option<(i32, f64)> {
        self.rows
            .iter()
            .map(|r| (r.year, r.cumulative_balance))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn row(&self, year: i32) -> Option<&YearRow> {
        self.rows.iter().find(|r| r.year == year)
    }
}
