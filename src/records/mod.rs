//! Income/expense records and the resolution boundary to storage

mod data;
mod breakdown;
mod store;
pub mod loader;

pub use data::{
    ActivationWindow, EventCategory, ExpenseKind, ExpenseRecord, ExpenseTerms, IncomeKind,
    IncomeRecord, IncomeTerms, RecordId,
};
pub use breakdown::{InsurancePremiums, LivingCostBreakdown};
pub use store::{RecordResolver, RecordStore, ResolvedRecords};
pub use loader::{load_expenses, load_incomes, load_itemized_expenses, load_record_store};
