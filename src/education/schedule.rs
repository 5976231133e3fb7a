//! Education expense schedule from a child's birth date and tier choices

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::costs::EducationCostTable;
use super::tiers::{EducationStage, TierSelections};
use crate::records::{ActivationWindow, ExpenseRecord, ExpenseTerms};

/// One time-bounded monthly education cost stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCost {
    pub stage: EducationStage,
    /// Selected tier name (`public`, `private_science`, ...)
    pub tier: &'static str,
    pub monthly_cost: f64,
    pub start_year: i32,
    pub end_year: i32,
}

impl StageCost {
    /// Total cost over the whole stage
    pub fn total_cost(&self) -> f64 {
        self.monthly_cost * 12.0 * (self.end_year - self.start_year + 1) as f64
    }
}

/// Build the schedule against a specific cost table.
///
/// A stage is emitted only when its tier is not a "none" selection, its
/// monthly cost is positive and its window falls in positive years.
pub fn compute_schedule(
    birth_date: NaiveDate,
    selections: &TierSelections,
    table: &EducationCostTable,
) -> Vec<StageCost> {
    let birth_year = birth_date.year();

    let candidates = [
        (
            EducationStage::Kindergarten,
            (!selections.kindergarten.is_none()).then(|| selections.kindergarten.as_str()),
            table.kindergarten(selections.kindergarten),
            EducationStage::Kindergarten.age_band(),
        ),
        (
            EducationStage::Elementary,
            (!selections.elementary.is_none()).then(|| selections.elementary.as_str()),
            table.school(EducationStage::Elementary, selections.elementary),
            EducationStage::Elementary.age_band(),
        ),
        (
            EducationStage::JuniorHigh,
            (!selections.junior_high.is_none()).then(|| selections.junior_high.as_str()),
            table.school(EducationStage::JuniorHigh, selections.junior_high),
            EducationStage::JuniorHigh.age_band(),
        ),
        (
            EducationStage::HighSchool,
            (!selections.high_school.is_none()).then(|| selections.high_school.as_str()),
            table.school(EducationStage::HighSchool, selections.high_school),
            EducationStage::HighSchool.age_band(),
        ),
        (
            EducationStage::College,
            (!selections.college.is_none()).then(|| selections.college.as_str()),
            table.college(selections.college),
            {
                let (first_age, _) = EducationStage::College.age_band();
                (first_age, first_age + selections.college.years() - 1)
            },
        ),
    ];

    candidates
        .into_iter()
        .filter_map(|(stage, tier, monthly_cost, (first_age, last_age))| {
            let tier = tier?;
            let start_year = birth_year + first_age;
            let end_year = birth_year + last_age;
            (monthly_cost > 0.0 && start_year > 0 && end_year > 0).then_some(StageCost {
                stage,
                tier,
                monthly_cost,
                start_year,
                end_year,
            })
        })
        .collect()
}

/// Schedule using the built-in cost table
pub fn compute_education_schedule(birth_date: NaiveDate, selections: &TierSelections) -> Vec<StageCost> {
    compute_schedule(birth_date, selections, &EducationCostTable::default())
}

/// A child's education plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationPlan {
    pub child_name: String,
    pub child_birth_date: NaiveDate,
    #[serde(default)]
    pub selections: TierSelections,
}

impl EducationPlan {
    pub fn new(child_name: impl Into<String>, child_birth_date: NaiveDate, selections: TierSelections) -> Self {
        Self {
            child_name: child_name.into(),
            child_birth_date,
            selections,
        }
    }

    pub fn schedule(&self, table: &EducationCostTable) -> Vec<StageCost> {
        compute_schedule(self.child_birth_date, &self.selections, table)
    }

    /// Education expense records for every scheduled stage, with consecutive
    /// ids starting at `first_id`
    pub fn expense_records(&self, first_id: u32, table: &EducationCostTable) -> Vec<ExpenseRecord> {
        self.schedule(table)
            .into_iter()
            .zip(first_id..)
            .filter_map(|(cost, id)| {
                let window = ActivationWindow::new(cost.start_year, cost.end_year)?;
                Some(ExpenseRecord::new(
                    id,
                    format!("{} {} {}", self.child_name, cost.tier, cost.stage.as_str()),
                    window,
                    ExpenseTerms::Education {
                        stage: cost.stage,
                        monthly_amount: cost.monthly_cost,
                    },
                ))
            })
            .collect()
    }
}
