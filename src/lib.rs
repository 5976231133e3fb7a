//! Life-plan projection - year-by-year household cashflow projection engine
//!
//! This library provides:
//! - Multi-year income/expense projection with growth, inflation and income caps
//! - Mortgage amortization feeding fixed monthly housing costs
//! - Age-banded education cost schedules from a child's birth date
//! - Record loading and batch scenario runs

pub mod error;
pub mod records;
pub mod housing;
pub mod education;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{LoadError, ProjectionError};
pub use records::{ExpenseRecord, IncomeRecord, RecordResolver, RecordStore, ResolvedRecords};
pub use housing::{compute_monthly_payment, LoanTerms, RepaymentMethod};
pub use education::{compute_education_schedule, EducationPlan, StageCost, TierSelections};
pub use projection::{run_projection, ProjectionEngine, SimulationRequest, SimulationResult, YearRow};
pub use scenario::ScenarioRunner;
