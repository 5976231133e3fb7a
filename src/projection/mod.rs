//! Projection engine for yearly household income/expense projections

mod state;
mod engine;
mod cashflows;
mod request;

pub use state::ProjectionState;
pub use engine::{annual_expense, annual_income, run_projection, ProjectionConfig, ProjectionEngine};
pub use cashflows::{ExpenseDetail, IncomeDetail, ProjectionSummary, SimulationResult, YearRow};
pub use request::{ProjectionWindow, SimulationRequest};
