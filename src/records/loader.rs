//! Load income and expense records from CSV
//!
//! `incomes.csv` columns:
//! `kind,id,name,start_year,end_year,monthly_amount,annual_amount,annual_bonus,growth_rate,has_cap,annual_income_cap`
//!
//! `expenses.csv` columns:
//! `kind,id,name,start_year,end_year,monthly_amount,inflation_rate,stage,category`
//!
//! Columns a kind does not use may be left empty.
//!
//! `itemized.json` holds living, insurance and housing records entered line
//! by line; each is collapsed to its monthly total on load.

use std::path::Path;

use csv::Reader;
use log::debug;

use serde::Deserialize;

use super::{
    ActivationWindow, EventCategory, ExpenseKind, ExpenseRecord, ExpenseTerms, IncomeKind,
    IncomeRecord, IncomeTerms, InsurancePremiums, LivingCostBreakdown, RecordStore,
};
use crate::education::EducationStage;
use crate::housing::HousingCosts;
use crate::error::{LoadError, LoadResult};

/// Default directory holding `incomes.csv` and `expenses.csv`
pub const DEFAULT_RECORDS_PATH: &str = "data/records";

/// Raw CSV row for an income record
#[derive(Debug, serde::Deserialize)]
struct IncomeCsvRow {
    kind: String,
    id: u32,
    name: String,
    start_year: i32,
    end_year: i32,
    monthly_amount: Option<f64>,
    annual_amount: Option<f64>,
    annual_bonus: Option<f64>,
    growth_rate: Option<f64>,
    has_cap: Option<bool>,
    annual_income_cap: Option<f64>,
}

impl IncomeCsvRow {
    fn to_record(self) -> LoadResult<IncomeRecord> {
        let kind = IncomeKind::parse(&self.kind).ok_or_else(|| LoadError::UnknownValue {
            field: "income kind",
            value: self.kind.clone(),
        })?;
        let window = window(self.id, self.start_year, self.end_year)?;

        let growth = self.growth_rate.unwrap_or(0.0);
        let cap = match (self.has_cap.unwrap_or(false), self.annual_income_cap) {
            (true, Some(limit)) => Some(limit),
            _ => None,
        };
        // Flat kinds store an annual figure; derive it from the monthly one when absent
        let annual = self
            .annual_amount
            .or(self.monthly_amount.map(|m| m * 12.0));

        let terms = match kind {
            IncomeKind::Salary => IncomeTerms::Salary {
                monthly_amount: required(self.id, "monthly_amount", self.monthly_amount)?,
                annual_bonus: self.annual_bonus.unwrap_or(0.0),
                increase_rate: growth,
                cap,
            },
            IncomeKind::Sidejob => IncomeTerms::Sidejob {
                monthly_amount: required(self.id, "monthly_amount", self.monthly_amount)?,
                increase_rate: growth,
                cap,
            },
            IncomeKind::Business => IncomeTerms::Business {
                monthly_amount: required(self.id, "monthly_amount", self.monthly_amount)?,
                increase_rate: growth,
                cap,
            },
            IncomeKind::Investment => IncomeTerms::Investment {
                annual_amount: required(self.id, "annual_amount", annual)?,
                annual_return_rate: growth,
            },
            IncomeKind::Pension => IncomeTerms::Pension {
                annual_amount: required(self.id, "annual_amount", annual)?,
            },
            IncomeKind::Other => IncomeTerms::Other {
                annual_amount: required(self.id, "annual_amount", annual)?,
            },
        };

        Ok(IncomeRecord::new(self.id, self.name, window, terms))
    }
}

/// Raw CSV row for an expense record
#[derive(Debug, serde::Deserialize)]
struct ExpenseCsvRow {
    kind: String,
    id: u32,
    name: String,
    start_year: i32,
    end_year: i32,
    monthly_amount: Option<f64>,
    inflation_rate: Option<f64>,
    stage: Option<String>,
    category: Option<String>,
}

impl ExpenseCsvRow {
    fn to_record(self) -> LoadResult<ExpenseRecord> {
        let kind = ExpenseKind::parse(&self.kind).ok_or_else(|| LoadError::UnknownValue {
            field: "expense kind",
            value: self.kind.clone(),
        })?;
        let window = window(self.id, self.start_year, self.end_year)?;
        let monthly = required(self.id, "monthly_amount", self.monthly_amount)?;

        let terms = match kind {
            ExpenseKind::Living => ExpenseTerms::Living {
                monthly_total_amount: monthly,
                inflation_rate: self.inflation_rate.unwrap_or(0.0),
            },
            ExpenseKind::Housing => ExpenseTerms::Housing {
                monthly_total_amount: monthly,
            },
            ExpenseKind::Insurance => ExpenseTerms::Insurance {
                monthly_total_amount: monthly,
            },
            ExpenseKind::Education => {
                let stage = self.stage.as_deref().unwrap_or_default();
                ExpenseTerms::Education {
                    stage: EducationStage::parse(stage).ok_or_else(|| LoadError::UnknownValue {
                        field: "education stage",
                        value: stage.to_string(),
                    })?,
                    monthly_amount: monthly,
                }
            }
            // The amount column holds the annual event cost
            ExpenseKind::Event => {
                let category = self.category.as_deref().unwrap_or("other");
                ExpenseTerms::Event {
                    category: EventCategory::parse(category).ok_or_else(|| LoadError::UnknownValue {
                        field: "event category",
                        value: category.to_string(),
                    })?,
                    amount: monthly,
                }
            }
        };

        Ok(ExpenseRecord::new(self.id, self.name, window, terms))
    }
}

fn window(id: u32, start_year: i32, end_year: i32) -> LoadResult<ActivationWindow> {
    ActivationWindow::new(start_year, end_year).ok_or_else(|| LoadError::InvalidRow {
        id: id.to_string(),
        reason: format!("start_year {} is after end_year {}", start_year, end_year),
    })
}

fn required(id: u32, field: &str, value: Option<f64>) -> LoadResult<f64> {
    value.ok_or_else(|| LoadError::InvalidRow {
        id: id.to_string(),
        reason: format!("missing {}", field),
    })
}

/// Common header of an itemized record
#[derive(Debug, Deserialize)]
struct ItemizedHeader {
    id: u32,
    name: String,
    start_year: i32,
    end_year: i32,
}

#[derive(Debug, Deserialize)]
struct ItemizedLiving {
    #[serde(flatten)]
    header: ItemizedHeader,
    #[serde(default)]
    inflation_rate: f64,
    items: LivingCostBreakdown,
}

#[derive(Debug, Deserialize)]
struct ItemizedInsurance {
    #[serde(flatten)]
    header: ItemizedHeader,
    premiums: InsurancePremiums,
}

#[derive(Debug, Deserialize)]
struct ItemizedHousing {
    #[serde(flatten)]
    header: ItemizedHeader,
    costs: HousingCosts,
}

/// Raw contents of `itemized.json`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ItemizedFile {
    living: Vec<ItemizedLiving>,
    insurance: Vec<ItemizedInsurance>,
    housing: Vec<ItemizedHousing>,
}

impl ItemizedFile {
    fn to_records(self) -> LoadResult<Vec<ExpenseRecord>> {
        let mut records = Vec::new();

        for entry in self.living {
            let h = entry.header;
            let window = window(h.id, h.start_year, h.end_year)?;
            records.push(ExpenseRecord::living(
                h.id,
                h.name,
                window,
                entry.items.monthly_total(),
                entry.inflation_rate,
            ));
        }

        for entry in self.insurance {
            let h = entry.header;
            let window = window(h.id, h.start_year, h.end_year)?;
            records.push(ExpenseRecord::new(h.id, h.name, window, ExpenseTerms::Insurance {
                monthly_total_amount: entry.premiums.monthly_total(),
            }));
        }

        for entry in self.housing {
            let h = entry.header;
            let window = window(h.id, h.start_year, h.end_year)?;
            records.push(entry.costs.to_record(h.id, h.name, window));
        }

        Ok(records)
    }
}

/// Load itemized expense records from a JSON file
pub fn load_itemized_expenses<P: AsRef<Path>>(path: P) -> LoadResult<Vec<ExpenseRecord>> {
    let file = std::fs::File::open(path)?;
    load_itemized_expenses_from_reader(file)
}

/// Load itemized expense records from any reader
pub fn load_itemized_expenses_from_reader<R: std::io::Read>(reader: R) -> LoadResult<Vec<ExpenseRecord>> {
    let file: ItemizedFile = serde_json::from_reader(reader)?;
    file.to_records()
}

/// Load income records from a CSV file
pub fn load_incomes<P: AsRef<Path>>(path: P) -> LoadResult<Vec<IncomeRecord>> {
    let file = std::fs::File::open(path)?;
    load_incomes_from_reader(file)
}

/// Load income records from any reader
pub fn load_incomes_from_reader<R: std::io::Read>(reader: R) -> LoadResult<Vec<IncomeRecord>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let row: IncomeCsvRow = result?;
        records.push(row.to_record()?);
    }

    Ok(records)
}

/// Load expense records from a CSV file
pub fn load_expenses<P: AsRef<Path>>(path: P) -> LoadResult<Vec<ExpenseRecord>> {
    let file = std::fs::File::open(path)?;
    load_expenses_from_reader(file)
}

/// Load expense records from any reader
pub fn load_expenses_from_reader<R: std::io::Read>(reader: R) -> LoadResult<Vec<ExpenseRecord>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let row: ExpenseCsvRow = result?;
        records.push(row.to_record()?);
    }

    Ok(records)
}

/// Load `incomes.csv`, `expenses.csv` and `itemized.json` from a directory
/// into a store. Any of the files may be absent.
pub fn load_record_store(dir: &Path) -> LoadResult<RecordStore> {
    let mut store = RecordStore::new();

    let incomes_path = dir.join("incomes.csv");
    if incomes_path.exists() {
        store.extend_incomes(load_incomes(&incomes_path)?);
    }

    let expenses_path = dir.join("expenses.csv");
    if expenses_path.exists() {
        store.extend_expenses(load_expenses(&expenses_path)?);
    }

    let itemized_path = dir.join("itemized.json");
    if itemized_path.exists() {
        store.extend_expenses(load_itemized_expenses(&itemized_path)?);
    }

    debug!(
        "Loaded {} income and {} expense records from {}",
        store.income_count(),
        store.expense_count(),
        dir.display()
    );

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INCOMES: &str = "\
kind,id,name,start_year,end_year,monthly_amount,annual_amount,annual_bonus,growth_rate,has_cap,annual_income_cap
salary,1,Main job,2025,2050,300000,,600000,3.0,true,4000000
sidejob,1,Writing,2025,2030,50000,,,1.0,false,
investment,1,Index fund,2025,2060,,600000,,4.0,,
pension,1,National pension,2060,2080,65000,,,,,
";

    const EXPENSES: &str = "\
kind,id,name,start_year,end_year,monthly_amount,inflation_rate,stage,category
living,1,Household,2025,2080,200000,2.0,,
housing,1,Condo,2025,2059,120000,,,
education,4,Hanako elementary,2026,2031,27000,,elementary,
event,1,Wedding,2027,2027,3000000,,,marriage
";

    #[test]
    fn test_load_incomes() {
        let records = load_incomes_from_reader(INCOMES.as_bytes()).expect("Failed to load incomes");
        assert_eq!(records.len(), 4);

        match &records[0].terms {
            IncomeTerms::Salary { monthly_amount, annual_bonus, increase_rate, cap } => {
                assert_eq!(*monthly_amount, 300_000.0);
                assert_eq!(*annual_bonus, 600_000.0);
                assert_eq!(*increase_rate, 3.0);
                assert_eq!(*cap, Some(4_000_000.0));
            }
            other => panic!("unexpected terms: {:?}", other),
        }

        // has_cap=false leaves no ceiling
        match &records[1].terms {
            IncomeTerms::Sidejob { cap, .. } => assert_eq!(*cap, None),
            other => panic!("unexpected terms: {:?}", other),
        }

        // Pension annual figure derived from the monthly column
        assert_eq!(records[3].terms, IncomeTerms::Pension { annual_amount: 780_000.0 });
    }

    #[test]
    fn test_load_expenses() {
        let records = load_expenses_from_reader(EXPENSES.as_bytes()).expect("Failed to load expenses");
        assert_eq!(records.len(), 4);
        assert_eq!(records[2].kind(), ExpenseKind::Education);
        assert_eq!(
            records[3].terms,
            ExpenseTerms::Event { category: EventCategory::Marriage, amount: 3_000_000.0 }
        );
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let csv = "\
kind,id,name,start_year,end_year,monthly_amount,annual_amount,annual_bonus,growth_rate,has_cap,annual_income_cap
lottery,1,Jackpot,2025,2025,1,,,,,
";
        let err = load_incomes_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::UnknownValue { field: "income kind", .. }));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let csv = "\
kind,id,name,start_year,end_year,monthly_amount,inflation_rate,stage,category
living,2,Backwards,2030,2025,100000,1.0,,
";
        let err = load_expenses_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { .. }));
    }

    #[test]
    fn test_load_default_records() {
        let store = load_record_store(Path::new(DEFAULT_RECORDS_PATH)).expect("Failed to load records");
        assert_eq!(store.income_count(), 6);
        assert_eq!(store.expense_count(), 12);
        assert_eq!(store.max_expense_id(ExpenseKind::Education), 4);
        assert_eq!(store.max_expense_id(ExpenseKind::Living), 2);
    }

    #[test]
    fn test_itemized_records_collapse_to_totals() {
        use crate::housing::{compute_monthly_payment, RepaymentMethod};
        use crate::records::RecordResolver;
        use crate::records::RecordId;

        let json = r#"{
            "living": [{
                "id": 2, "name": "Itemized household", "start_year": 2025, "end_year": 2060,
                "inflation_rate": 1.0,
                "items": {"food_home": 60000, "utility_electricity": 10000, "phone": 5000}
            }],
            "insurance": [{
                "id": 2, "name": "Family cover", "start_year": 2025, "end_year": 2050,
                "premiums": {"medical": 4000, "life": 8000}
            }],
            "housing": [{
                "id": 2, "name": "House", "start_year": 2025, "end_year": 2059,
                "costs": {
                    "residence_type": "owned_with_loan",
                    "loan": {"loan_amount": 30000000, "interest_rate": 1.5, "term_years": 35,
                             "repayment_method": "equal_payment"},
                    "property_tax_monthly": 10000
                }
            }]
        }"#;
        let records = load_itemized_expenses_from_reader(json.as_bytes()).expect("Failed to load itemized");
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0].terms,
            ExpenseTerms::Living { monthly_total_amount: 75_000.0, inflation_rate: 1.0 }
        );
        assert_eq!(records[1].terms, ExpenseTerms::Insurance { monthly_total_amount: 12_000.0 });

        let mortgage = compute_monthly_payment(30_000_000.0, 1.5, 35, RepaymentMethod::EqualPayment);
        assert_eq!(
            records[2].terms,
            ExpenseTerms::Housing { monthly_total_amount: mortgage + 10_000.0 }
        );

        let mut store = RecordStore::new();
        store.extend_expenses(records);
        assert!(store.expense(ExpenseKind::Housing, RecordId(2)).is_some());
    }

    #[test]
    fn test_itemized_inverted_window_rejected() {
        let json = r#"{"insurance": [{"id": 5, "name": "Bad", "start_year": 2040, "end_year": 2030, "premiums": {}}]}"#;
        let err = load_itemized_expenses_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { .. }));
    }

    #[test]
    fn test_missing_monthly_amount_rejected() {
        let csv = "\
kind,id,name,start_year,end_year,monthly_amount,annual_amount,annual_bonus,growth_rate,has_cap,annual_income_cap
salary,3,No pay,2025,2030,,,,,,
";
        let err = load_incomes_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("missing monthly_amount"));
    }
}
