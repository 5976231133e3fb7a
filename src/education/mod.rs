//! Education cost schedules derived from a child's birth date

mod tiers;
mod costs;
mod schedule;

pub use tiers::{CollegeTier, EducationStage, KindergartenTier, SchoolTier, TierSelections};
pub use costs::{CollegeCosts, EducationCostTable, TierCosts, DEFAULT_COST_TABLE_PATH};
pub use schedule::{compute_education_schedule, compute_schedule, EducationPlan, StageCost};
