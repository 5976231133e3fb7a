//! Monthly education cost table by stage and tier
//!
//! Defaults are national averages in yen per month. A CSV with
//! `stage,tier,monthly_cost` rows can override individual entries.

use std::path::Path;

use log::debug;

use super::tiers::{CollegeTier, EducationStage, KindergartenTier, SchoolTier};
use crate::error::{LoadError, LoadResult};

/// Default location of the cost table override
pub const DEFAULT_COST_TABLE_PATH: &str = "data/tables/education_costs.csv";

/// Public/private cost pair for one stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierCosts {
    pub public: f64,
    pub private: f64,
}

impl TierCosts {
    pub fn get(&self, tier: SchoolTier) -> f64 {
        match tier {
            SchoolTier::None => 0.0,
            SchoolTier::Public => self.public,
            SchoolTier::Private => self.private,
        }
    }
}

/// Post-secondary costs by tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollegeCosts {
    pub national: f64,
    pub private_liberal: f64,
    pub private_science: f64,
    pub junior_college: f64,
    pub vocational: f64,
}

/// Monthly cost for every stage/tier combination
#[derive(Debug, Clone, PartialEq)]
pub struct EducationCostTable {
    pub kindergarten: TierCosts,
    pub elementary: TierCosts,
    pub junior_high: TierCosts,
    pub high_school: TierCosts,
    pub college: CollegeCosts,
}

impl Default for EducationCostTable {
    fn default() -> Self {
        Self {
            kindergarten: TierCosts { public: 22_000.0, private: 48_000.0 },
            elementary: TierCosts { public: 27_000.0, private: 130_000.0 },
            junior_high: TierCosts { public: 40_000.0, private: 110_000.0 },
            high_school: TierCosts { public: 35_000.0, private: 70_000.0 },
            college: CollegeCosts {
                national: 45_000.0,
                private_liberal: 75_000.0,
                private_science: 95_000.0,
                junior_college: 60_000.0,
                vocational: 80_000.0,
            },
        }
    }
}

impl EducationCostTable {
    pub fn kindergarten(&self, tier: KindergartenTier) -> f64 {
        match tier {
            KindergartenTier::None => 0.0,
            KindergartenTier::Public => self.kindergarten.public,
            KindergartenTier::Private => self.kindergarten.private,
        }
    }

    /// Cost for one of the public/private stages; kindergarten and college
    /// have their own lookups
    pub fn school(&self, stage: EducationStage, tier: SchoolTier) -> f64 {
        match stage {
            EducationStage::Elementary => self.elementary.get(tier),
            EducationStage::JuniorHigh => self.junior_high.get(tier),
            EducationStage::HighSchool => self.high_school.get(tier),
            EducationStage::Kindergarten => self.kindergarten.get(tier),
            EducationStage::College => 0.0,
        }
    }

    pub fn college(&self, tier: CollegeTier) -> f64 {
        match tier {
            CollegeTier::None => 0.0,
            CollegeTier::National => self.college.national,
            CollegeTier::PrivateLiberal => self.college.private_liberal,
            CollegeTier::PrivateScience => self.college.private_science,
            CollegeTier::JuniorCollege => self.college.junior_college,
            CollegeTier::Vocational => self.college.vocational,
        }
    }

    /// Load the default table, then apply overrides from a CSV file
    pub fn from_csv_path(path: &Path) -> LoadResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load the default table, then apply overrides from any reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> LoadResult<Self> {
        let mut table = Self::default();
        let mut csv_reader = csv::Reader::from_reader(reader);

        for result in csv_reader.deserialize() {
            let row: CostRow = result?;
            table.set(&row.stage, &row.tier, row.monthly_cost)?;
        }

        debug!("Loaded education cost table: {:?}", table);
        Ok(table)
    }

    fn set(&mut self, stage: &str, tier: &str, monthly_cost: f64) -> LoadResult<()> {
        let stage = EducationStage::parse(stage).ok_or_else(|| LoadError::UnknownValue {
            field: "education stage",
            value: stage.to_string(),
        })?;
        let unknown_tier = || LoadError::UnknownValue {
            field: "school tier",
            value: tier.to_string(),
        };

        let slot = match stage {
            EducationStage::College => match CollegeTier::parse(tier) {
                Some(CollegeTier::National) => &mut self.college.national,
                Some(CollegeTier::PrivateLiberal) => &mut self.college.private_liberal,
                Some(CollegeTier::PrivateScience) => &mut self.college.private_science,
                Some(CollegeTier::JuniorCollege) => &mut self.college.junior_college,
                Some(CollegeTier::Vocational) => &mut self.college.vocational,
                Some(CollegeTier::None) | None => return Err(unknown_tier()),
            },
            _ => {
                let costs = match stage {
                    EducationStage::Kindergarten => &mut self.kindergarten,
                    EducationStage::Elementary => &mut self.elementary,
                    EducationStage::JuniorHigh => &mut self.junior_high,
                    _ => &mut self.high_school,
                };
                match SchoolTier::parse(tier) {
                    Some(SchoolTier::Public) => &mut costs.public,
                    Some(SchoolTier::Private) => &mut costs.private,
                    Some(SchoolTier::None) | None => return Err(unknown_tier()),
                }
            }
        };

        *slot = monthly_cost;
        Ok(())
    }
}

#[derive(Debug, serde::Deserialize)]
struct CostRow {
    stage: String,
    tier: String,
    monthly_cost: f64,
}
