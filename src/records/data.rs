//! Income and expense record structures
//!
//! Each record kind carries only the fields its projection rule needs, so the
//! "which figure compounds at which rate" policy lives in one exhaustive match
//! inside the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::education::EducationStage;

/// Opaque record identifier, unique within its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u32);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive `[start_year, end_year]` range during which a record contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationWindow {
    pub start_year: i32,
    pub end_year: i32,
}

impl ActivationWindow {
    /// Build a window, rejecting `start_year > end_year`
    pub fn new(start_year: i32, end_year: i32) -> Option<Self> {
        (start_year <= end_year).then_some(Self { start_year, end_year })
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start_year <= year && year <= self.end_year
    }

    /// Whole years elapsed since the window opened (0 in the first year and
    /// for any earlier year)
    pub fn years_passed(&self, year: i32) -> u32 {
        if year <= self.start_year {
            0
        } else {
            year.abs_diff(self.start_year)
        }
    }
}

/// The six income categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeKind {
    Salary,
    Sidejob,
    Business,
    Investment,
    Pension,
    Other,
}

impl IncomeKind {
    pub const ALL: [IncomeKind; 6] = [
        IncomeKind::Salary,
        IncomeKind::Sidejob,
        IncomeKind::Business,
        IncomeKind::Investment,
        IncomeKind::Pension,
        IncomeKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeKind::Salary => "salary",
            IncomeKind::Sidejob => "sidejob",
            IncomeKind::Business => "business",
            IncomeKind::Investment => "investment",
            IncomeKind::Pension => "pension",
            IncomeKind::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

/// The five expense categories, in the order a year's expenses are summed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseKind {
    Living,
    Housing,
    Education,
    Insurance,
    Event,
}

impl ExpenseKind {
    pub const ALL: [ExpenseKind; 5] = [
        ExpenseKind::Living,
        ExpenseKind::Housing,
        ExpenseKind::Education,
        ExpenseKind::Insurance,
        ExpenseKind::Event,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseKind::Living => "living",
            ExpenseKind::Housing => "housing",
            ExpenseKind::Insurance => "insurance",
            ExpenseKind::Education => "education",
            ExpenseKind::Event => "event",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

/// Life event categories for one-off expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Marriage,
    Birth,
    Car,
    Moving,
    Care,
    Funeral,
    Travel,
    Other,
}

impl EventCategory {
    pub fn parse(value: &str) -> Option<Self> {
        let category = match value {
            "marriage" => EventCategory::Marriage,
            "birth" => EventCategory::Birth,
            "car" => EventCategory::Car,
            "moving" => EventCategory::Moving,
            "care" => EventCategory::Care,
            "funeral" => EventCategory::Funeral,
            "travel" => EventCategory::Travel,
            "other" => EventCategory::Other,
            _ => return None,
        };
        Some(category)
    }
}

/// Per-kind income terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IncomeTerms {
    /// Monthly pay and bonus both compound at `increase_rate`
    Salary {
        monthly_amount: f64,
        annual_bonus: f64,
        increase_rate: f64,
        cap: Option<f64>,
    },
    Sidejob {
        monthly_amount: f64,
        increase_rate: f64,
        cap: Option<f64>,
    },
    Business {
        monthly_amount: f64,
        increase_rate: f64,
        cap: Option<f64>,
    },
    /// Compounds the stored annual figure, not the monthly one
    Investment {
        annual_amount: f64,
        annual_return_rate: f64,
    },
    /// Flat every active year
    Pension { annual_amount: f64 },
    /// Flat every active year
    Other { annual_amount: f64 },
}

impl IncomeTerms {
    pub fn kind(&self) -> IncomeKind {
        match self {
            IncomeTerms::Salary { .. } => IncomeKind::Salary,
            IncomeTerms::Sidejob { .. } => IncomeKind::Sidejob,
            IncomeTerms::Business { .. } => IncomeKind::Business,
            IncomeTerms::Investment { .. } => IncomeKind::Investment,
            IncomeTerms::Pension { .. } => IncomeKind::Pension,
            IncomeTerms::Other { .. } => IncomeKind::Other,
        }
    }
}

/// A stored income record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: RecordId,
    pub name: String,
    pub window: ActivationWindow,
    pub terms: IncomeTerms,
}

impl IncomeRecord {
    pub fn new(id: u32, name: impl Into<String>, window: ActivationWindow, terms: IncomeTerms) -> Self {
        Self {
            id: RecordId(id),
            name: name.into(),
            window,
            terms,
        }
    }

    /// Salary record; `cap` of `None` means no ceiling
    pub fn salary(
        id: u32,
        name: impl Into<String>,
        window: ActivationWindow,
        monthly_amount: f64,
        annual_bonus: f64,
        increase_rate: f64,
        cap: Option<f64>,
    ) -> Self {
        Self::new(id, name, window, IncomeTerms::Salary {
            monthly_amount,
            annual_bonus,
            increase_rate,
            cap,
        })
    }

    /// Investment income. The annual figure is fixed at creation time as
    /// `monthly_amount * 12` and compounds from there.
    pub fn investment(
        id: u32,
        name: impl Into<String>,
        window: ActivationWindow,
        monthly_amount: f64,
        annual_return_rate: f64,
    ) -> Self {
        Self::new(id, name, window, IncomeTerms::Investment {
            annual_amount: monthly_amount * 12.0,
            annual_return_rate,
        })
    }

    pub fn pension(id: u32, name: impl Into<String>, window: ActivationWindow, monthly_amount: f64) -> Self {
        Self::new(id, name, window, IncomeTerms::Pension {
            annual_amount: monthly_amount * 12.0,
        })
    }

    pub fn kind(&self) -> IncomeKind {
        self.terms.kind()
    }
}

/// Per-kind expense terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpenseTerms {
    /// The only expense that inflates year over year
    Living {
        monthly_total_amount: f64,
        inflation_rate: f64,
    },
    /// Monthly total already includes the amortized mortgage payment
    Housing { monthly_total_amount: f64 },
    Insurance { monthly_total_amount: f64 },
    Education {
        stage: EducationStage,
        monthly_amount: f64,
    },
    /// `amount` is already an annual figure
    Event { category: EventCategory, amount: f64 },
}

impl ExpenseTerms {
    pub fn kind(&self) -> ExpenseKind {
        match self {
            ExpenseTerms::Living { .. } => ExpenseKind::Living,
            ExpenseTerms::Housing { .. } => ExpenseKind::Housing,
            ExpenseTerms::Insurance { .. } => ExpenseKind::Insurance,
            ExpenseTerms::Education { .. } => ExpenseKind::Education,
            ExpenseTerms::Event { .. } => ExpenseKind::Event,
        }
    }
}

/// A stored expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: RecordId,
    pub name: String,
    pub window: ActivationWindow,
    pub terms: ExpenseTerms,
}

impl ExpenseRecord {
    pub fn new(id: u32, name: impl Into<String>, window: ActivationWindow, terms: ExpenseTerms) -> Self {
        Self {
            id: RecordId(id),
            name: name.into(),
            window,
            terms,
        }
    }

    pub fn living(
        id: u32,
        name: impl Into<String>,
        window: ActivationWindow,
        monthly_total_amount: f64,
        inflation_rate: f64,
    ) -> Self {
        Self::new(id, name, window, ExpenseTerms::Living {
            monthly_total_amount,
            inflation_rate,
        })
    }

    pub fn housing(id: u32, name: impl Into<String>, window: ActivationWindow, monthly_total_amount: f64) -> Self {
        Self::new(id, name, window, ExpenseTerms::Housing { monthly_total_amount })
    }

    pub fn kind(&self) -> ExpenseKind {
        self.terms.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds_inclusive() {
        let window = ActivationWindow::new(2025, 2027).unwrap();
        assert!(!window.contains(2024));
        assert!(window.contains(2025));
        assert!(window.contains(2027));
        assert!(!window.contains(2028));
        assert_eq!(window.years_passed(2026), 1);

        let widest = ActivationWindow::new(i32::MIN, i32::MAX).unwrap();
        assert_eq!(widest.years_passed(i32::MAX), u32::MAX);
        assert_eq!(widest.years_passed(i32::MIN), 0);
    }

    #[test]
    fn test_inverted_window_rejected() {
        assert!(ActivationWindow::new(2030, 2029).is_none());
        assert!(ActivationWindow::new(2030, 2030).is_some());
    }

    #[test]
    fn test_investment_annual_fixed_at_creation() {
        let window = ActivationWindow::new(2025, 2040).unwrap();
        let record = IncomeRecord::investment(1, "Index fund", window, 50_000.0, 4.0);
        match record.terms {
            IncomeTerms::Investment { annual_amount, annual_return_rate } => {
                assert_eq!(annual_amount, 600_000.0);
                assert_eq!(annual_return_rate, 4.0);
            }
            other => panic!("unexpected terms: {:?}", other),
        }
        assert_eq!(record.kind(), IncomeKind::Investment);
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in IncomeKind::ALL {
            assert_eq!(IncomeKind::parse(kind.as_str()), Some(kind));
        }
        for kind in ExpenseKind::ALL {
            assert_eq!(ExpenseKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(IncomeKind::parse("lottery"), None);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&IncomeKind::Sidejob).unwrap();
        assert_eq!(json, "\"sidejob\"");
    }
}
