//! Simulation request parameters and their validation

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadResult, ProjectionError, ProjectionResult};
use crate::records::{ExpenseKind, IncomeKind, RecordId};

/// A projection request as received from the caller.
///
/// The top-level parameters are optional here so that a missing value can be
/// reported as a validation failure rather than a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Age in `start_year`
    pub base_age: Option<u32>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    #[serde(default)]
    pub selected_incomes: BTreeMap<IncomeKind, Vec<RecordId>>,
    #[serde(default)]
    pub selected_expenses: BTreeMap<ExpenseKind, Vec<RecordId>>,
}

/// Validated projection horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionWindow {
    pub base_age: u32,
    pub start_year: i32,
    pub end_year: i32,
}

impl ProjectionWindow {
    /// Number of projected years, both ends inclusive
    pub fn year_count(&self) -> usize {
        if self.start_year > self.end_year {
            0
        } else {
            self.end_year.abs_diff(self.start_year) as usize + 1
        }
    }
}

impl SimulationRequest {
    pub fn new(base_age: u32, start_year: i32, end_year: i32) -> Self {
        Self {
            base_age: Some(base_age),
            start_year: Some(start_year),
            end_year: Some(end_year),
            ..Default::default()
        }
    }

    pub fn select_income(&mut self, kind: IncomeKind, id: u32) -> &mut Self {
        self.selected_incomes.entry(kind).or_default().push(RecordId(id));
        self
    }

    pub fn select_expense(&mut self, kind: ExpenseKind, id: u32) -> &mut Self {
        self.selected_expenses.entry(kind).or_default().push(RecordId(id));
        self
    }

    /// Check the top-level parameters: all present, and `start_year < end_year`
    pub fn validate(&self) -> ProjectionResult<ProjectionWindow> {
        let base_age = self
            .base_age
            .ok_or_else(|| ProjectionError::Validation("base_age is required".into()))?;
        let start_year = self
            .start_year
            .ok_or_else(|| ProjectionError::Validation("start_year is required".into()))?;
        let end_year = self
            .end_year
            .ok_or_else(|| ProjectionError::Validation("end_year is required".into()))?;

        if start_year >= end_year {
            return Err(ProjectionError::Validation(format!(
                "start_year ({}) must be before end_year ({})",
                start_year, end_year
            )));
        }

        // Age in end_year must be representable
        let span = end_year.abs_diff(start_year);
        if base_age.checked_add(span).is_none() {
            return Err(ProjectionError::Validation(format!(
                "base_age {} over {} years exceeds the supported age range",
                base_age, span
            )));
        }

        Ok(ProjectionWindow { base_age, start_year, end_year })
    }

    pub fn from_json_str(json: &str) -> LoadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path(path: &Path) -> LoadResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_rejected() {
        let request = SimulationRequest {
            base_age: Some(35),
            start_year: Some(2025),
            ..Default::default()
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err, ProjectionError::Validation("end_year is required".into()));
    }

    #[test]
    fn test_start_must_precede_end() {
        assert!(SimulationRequest::new(35, 2030, 2030).validate().is_err());
        assert!(SimulationRequest::new(35, 2031, 2030).validate().is_err());

        let window = SimulationRequest::new(35, 2025, 2030).validate().unwrap();
        assert_eq!(window.year_count(), 6);
    }

    #[test]
    fn test_unrepresentable_final_age_rejected() {
        let err = SimulationRequest::new(u32::MAX, 2025, 2026).validate().unwrap_err();
        assert!(matches!(err, ProjectionError::Validation(_)));

        // Ending exactly at the top of the range is fine
        let window = SimulationRequest::new(u32::MAX - 1, 2025, 2026).validate().unwrap();
        assert_eq!(window.year_count(), 2);
    }

    #[test]
    fn test_extreme_years_counted() {
        let window = SimulationRequest::new(30, i32::MIN, i32::MIN + 1).validate().unwrap();
        assert_eq!(window.year_count(), 2);

        let window = SimulationRequest::new(0, i32::MIN, i32::MAX).validate().unwrap();
        assert_eq!(window.year_count(), u32::MAX as usize + 1);

        let inverted = ProjectionWindow { base_age: 0, start_year: 2030, end_year: 2025 };
        assert_eq!(inverted.year_count(), 0);
    }

    #[test]
    fn test_parse_json_request() {
        let json = r#"{
            "base_age": 35,
            "start_year": 2025,
            "end_year": 2065,
            "selected_incomes": {"salary": [1, 2], "pension": [1]},
            "selected_expenses": {"living": [1]}
        }"#;
        let request = SimulationRequest::from_json_str(json).unwrap();
        assert_eq!(request.base_age, Some(35));
        assert_eq!(request.selected_incomes[&IncomeKind::Salary], vec![RecordId(1), RecordId(2)]);
        assert_eq!(request.selected_expenses.len(), 1);
    }

    #[test]
    fn test_json_without_selections() {
        let request = SimulationRequest::from_json_str(r#"{"start_year": 2025, "end_year": 2030}"#).unwrap();
        assert!(request.selected_incomes.is_empty());
        assert!(request.validate().is_err());
    }
}
