//! Scenario runner for batch projections
//!
//! Holds one record store and projects many requests against it. Each run
//! takes its own snapshot and accumulator, so requests are projected in
//! parallel without coordination.

use rayon::prelude::*;

use crate::error::ProjectionResult;
use crate::projection::{ProjectionConfig, ProjectionEngine, SimulationRequest, SimulationResult};
use crate::records::{RecordStore, ResolvedRecords};

/// Pre-loaded scenario runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(store);
///
/// // Compare retiring at different years
/// let requests: Vec<_> = [2050, 2055, 2060].iter().map(|&end| ...).collect();
/// let results = runner.run_batch(&requests);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    store: RecordStore,
    config: ProjectionConfig,
}

impl ScenarioRunner {
    /// Create runner with the default projection config
    pub fn new(store: RecordStore) -> Self {
        Self::with_config(store, ProjectionConfig::default())
    }

    pub fn with_config(store: RecordStore, config: ProjectionConfig) -> Self {
        Self { store, config }
    }

    /// Resolve and project a single request
    pub fn run(&self, request: &SimulationRequest) -> ProjectionResult<SimulationResult> {
        let records = ResolvedRecords::snapshot(request, &self.store);
        ProjectionEngine::new(self.config.clone()).run(request, &records)
    }

    /// Project several requests in parallel. Results are in request order;
    /// one failing request does not affect the others.
    pub fn run_batch(&self, requests: &[SimulationRequest]) -> Vec<ProjectionResult<SimulationResult>> {
        requests.par_iter().map(|request| self.run(request)).collect()
    }

    /// Get reference to the record store for inspection
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Get mutable reference to the record store for edits between runs
    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ActivationWindow, ExpenseKind, ExpenseRecord, IncomeKind, IncomeRecord};

    fn test_store() -> RecordStore {
        let window = ActivationWindow::new(2025, 2060).unwrap();
        let mut store = RecordStore::new();
        store.insert_income(IncomeRecord::salary(1, "Main job", window, 350_000.0, 700_000.0, 2.0, None));
        store.insert_expense(ExpenseRecord::living(1, "Household", window, 250_000.0, 1.0));
        store
    }

    fn test_request(end_year: i32) -> SimulationRequest {
        let mut request = SimulationRequest::new(30, 2025, end_year);
        request.select_income(IncomeKind::Salary, 1);
        request.select_expense(ExpenseKind::Living, 1);
        request
    }

    #[test]
    fn test_scenario_runner_batch() {
        let runner = ScenarioRunner::new(test_store());
        let requests: Vec<_> = [2030, 2040, 2050].iter().map(|&end| test_request(end)).collect();

        let results = runner.run_batch(&requests);
        assert_eq!(results.len(), 3);

        let lengths: Vec<_> = results.iter().map(|r| r.as_ref().unwrap().rows.len()).collect();
        assert_eq!(lengths, vec![6, 16, 26]);

        // Longer horizon accumulates more surplus
        let final_2030 = results[0].as_ref().unwrap().summary.final_cumulative_balance;
        let final_2050 = results[2].as_ref().unwrap().summary.final_cumulative_balance;
        assert!(final_2050 > final_2030);
    }

    #[test]
    fn test_batch_isolates_failures() {
        let runner = ScenarioRunner::new(test_store());
        let requests = vec![test_request(2030), SimulationRequest::default(), test_request(2035)];

        let results = runner.run_batch(&requests);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_batch_matches_sequential() {
        let runner = ScenarioRunner::new(test_store());
        let requests: Vec<_> = (2030..2040).map(test_request).collect();

        let parallel = runner.run_batch(&requests);
        for (request, result) in requests.iter().zip(parallel) {
            assert_eq!(runner.run(request).unwrap(), result.unwrap());
        }
    }

    #[test]
    fn test_education_plan_feeds_projection() {
        use crate::education::{CollegeTier, EducationCostTable, EducationPlan, TierSelections};
        use chrono::NaiveDate;

        let mut store = test_store();
        let plan = EducationPlan::new(
            "Ichiro",
            NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
            TierSelections { college: CollegeTier::National, ..Default::default() },
        );
        let first_id = store.max_expense_id(ExpenseKind::Education) + 1;
        let records = plan.expense_records(first_id, &EducationCostTable::default());
        let ids: Vec<_> = records.iter().map(|r| r.id.0).collect();
        store.extend_expenses(records);

        let mut request = SimulationRequest::new(30, 2025, 2045);
        for id in ids {
            request.select_expense(ExpenseKind::Education, id);
        }
        let result = ScenarioRunner::new(store).run(&request).unwrap();

        // Elementary starts at age 6
        assert_eq!(result.row(2025).unwrap().expense_by_kind(ExpenseKind::Education), 0.0);
        assert_eq!(result.row(2026).unwrap().expense_by_kind(ExpenseKind::Education), 27_000.0 * 12.0);
        assert_eq!(result.row(2041).unwrap().expense_by_kind(ExpenseKind::Education), 45_000.0 * 12.0);
        assert_eq!(result.row(2042).unwrap().expense_by_kind(ExpenseKind::Education), 0.0);
    }

    #[test]
    fn test_shipped_sample_request() {
        use crate::records::load_record_store;
        use std::path::Path;

        let store = load_record_store(Path::new("data/records")).expect("Failed to load records");
        let request = SimulationRequest::from_json_path(Path::new("data/request.json"))
            .expect("Failed to read request");
        let result = ScenarioRunner::new(store).run(&request).unwrap();

        assert_eq!(result.rows.len(), 51);
        assert_eq!(result.rows.first().unwrap().age, 35);
        assert_eq!(result.rows.last().unwrap().age, 85);
        assert!(result.row(2030).unwrap().expense_by_kind(ExpenseKind::Event) >= 3_000_000.0);
    }

    #[test]
    fn test_deleted_record_skipped_between_runs() {
        let mut runner = ScenarioRunner::new(test_store());
        let request = test_request(2030);
        let before = runner.run(&request).unwrap();

        runner.store_mut().remove_expense(ExpenseKind::Living, crate::records::RecordId(1));
        let after = runner.run(&request).unwrap();

        assert!(after.summary.total_expenses == 0.0);
        assert!(after.summary.final_cumulative_balance > before.summary.final_cumulative_balance);
    }
}
