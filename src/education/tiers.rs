//! Education stages and the school tiers selectable for each

use serde::{Deserialize, Serialize};

/// The five education stages, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationStage {
    Kindergarten,
    Elementary,
    JuniorHigh,
    HighSchool,
    College,
}

impl EducationStage {
    pub const ALL: [EducationStage; 5] = [
        EducationStage::Kindergarten,
        EducationStage::Elementary,
        EducationStage::JuniorHigh,
        EducationStage::HighSchool,
        EducationStage::College,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EducationStage::Kindergarten => "kindergarten",
            EducationStage::Elementary => "elementary",
            EducationStage::JuniorHigh => "junior_high",
            EducationStage::HighSchool => "high_school",
            EducationStage::College => "college",
        }
    }

    /// Parse a stage name; accepts the short forms `junior` and `high`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "junior" => Some(EducationStage::JuniorHigh),
            "high" => Some(EducationStage::HighSchool),
            other => Self::ALL.into_iter().find(|s| s.as_str() == other),
        }
    }

    /// First and last age attended (inclusive). College length depends on
    /// the tier, so this is the four-year band.
    pub fn age_band(&self) -> (i32, i32) {
        match self {
            EducationStage::Kindergarten => (3, 5),
            EducationStage::Elementary => (6, 11),
            EducationStage::JuniorHigh => (12, 14),
            EducationStage::HighSchool => (15, 17),
            EducationStage::College => (18, 21),
        }
    }
}

/// Kindergarten / nursery selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindergartenTier {
    /// Not enrolled
    #[default]
    None,
    Public,
    Private,
}

impl KindergartenTier {
    /// Stage not taken
    pub fn is_none(&self) -> bool {
        matches!(self, KindergartenTier::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KindergartenTier::None => "none",
            KindergartenTier::Public => "public",
            KindergartenTier::Private => "private",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(KindergartenTier::None),
            "public" => Some(KindergartenTier::Public),
            "private" => Some(KindergartenTier::Private),
            _ => None,
        }
    }
}

/// Selection for the compulsory and high-school stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolTier {
    /// Stage left out of the plan (home schooling, abroad, already finished)
    None,
    #[default]
    Public,
    Private,
}

impl SchoolTier {
    /// Stage not taken
    pub fn is_none(&self) -> bool {
        matches!(self, SchoolTier::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolTier::None => "none",
            SchoolTier::Public => "public",
            SchoolTier::Private => "private",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(SchoolTier::None),
            "public" => Some(SchoolTier::Public),
            "private" => Some(SchoolTier::Private),
            _ => None,
        }
    }
}

/// Post-secondary selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollegeTier {
    /// Does not continue after high school
    #[default]
    None,
    National,
    PrivateLiberal,
    PrivateScience,
    JuniorCollege,
    Vocational,
}

impl CollegeTier {
    /// Stage not taken
    pub fn is_none(&self) -> bool {
        matches!(self, CollegeTier::None)
    }

    pub const ALL: [CollegeTier; 6] = [
        CollegeTier::None,
        CollegeTier::National,
        CollegeTier::PrivateLiberal,
        CollegeTier::PrivateScience,
        CollegeTier::JuniorCollege,
        CollegeTier::Vocational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollegeTier::None => "none",
            CollegeTier::National => "national",
            CollegeTier::PrivateLiberal => "private_liberal",
            CollegeTier::PrivateScience => "private_science",
            CollegeTier::JuniorCollege => "junior_college",
            CollegeTier::Vocational => "vocational",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    /// Junior colleges and vocational schools run two years instead of four
    pub fn years(&self) -> i32 {
        match self {
            CollegeTier::JuniorCollege | CollegeTier::Vocational => 2,
            _ => 4,
        }
    }
}

/// One tier choice per stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TierSelections {
    pub kindergarten: KindergartenTier,
    pub elementary: SchoolTier,
    pub junior_high: SchoolTier,
    pub high_school: SchoolTier,
    pub college: CollegeTier,
}
