//! Record resolution boundary
//!
//! The persistence layer sits behind [`RecordResolver`]. The engine never
//! queries it directly: a [`ResolvedRecords`] snapshot is taken first and the
//! projection runs over that fixed collection.

use std::collections::HashMap;

use log::info;

use super::{ExpenseKind, ExpenseRecord, IncomeKind, IncomeRecord, RecordId};
use crate::projection::SimulationRequest;

/// Lookup of stored records by category and id
pub trait RecordResolver {
    fn income(&self, kind: IncomeKind, id: RecordId) -> Option<&IncomeRecord>;
    fn expense(&self, kind: ExpenseKind, id: RecordId) -> Option<&ExpenseRecord>;
}

/// In-memory record store keyed by (kind, id)
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    incomes: HashMap<(IncomeKind, RecordId), IncomeRecord>,
    expenses: HashMap<(ExpenseKind, RecordId), ExpenseRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an income record
    pub fn insert_income(&mut self, record: IncomeRecord) {
        self.incomes.insert((record.kind(), record.id), record);
    }

    /// Insert or replace an expense record
    pub fn insert_expense(&mut self, record: ExpenseRecord) {
        self.expenses.insert((record.kind(), record.id), record);
    }

    pub fn extend_incomes<I: IntoIterator<Item = IncomeRecord>>(&mut self, records: I) {
        for record in records {
            self.insert_income(record);
        }
    }

    pub fn extend_expenses<I: IntoIterator<Item = ExpenseRecord>>(&mut self, records: I) {
        for record in records {
            self.insert_expense(record);
        }
    }

    pub fn remove_income(&mut self, kind: IncomeKind, id: RecordId) -> Option<IncomeRecord> {
        self.incomes.remove(&(kind, id))
    }

    pub fn remove_expense(&mut self, kind: ExpenseKind, id: RecordId) -> Option<ExpenseRecord> {
        self.expenses.remove(&(kind, id))
    }

    pub fn income_count(&self) -> usize {
        self.incomes.len()
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    /// Highest expense id in use for a kind (0 if none)
    pub fn max_expense_id(&self, kind: ExpenseKind) -> u32 {
        self.expenses
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, id)| id.0)
            .max()
            .unwrap_or(0)
    }
}

impl RecordResolver for RecordStore {
    fn income(&self, kind: IncomeKind, id: RecordId) -> Option<&IncomeRecord> {
        self.incomes.get(&(kind, id))
    }

    fn expense(&self, kind: ExpenseKind, id: RecordId) -> Option<&ExpenseRecord> {
        self.expenses.get(&(kind, id))
    }
}

/// Immutable snapshot of the records a request selected
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRecords {
    incomes: Vec<IncomeRecord>,
    expenses: Vec<ExpenseRecord>,
}

impl ResolvedRecords {
    /// Build a snapshot from records that are already resolved
    pub fn new(incomes: Vec<IncomeRecord>, expenses: Vec<ExpenseRecord>) -> Self {
        Self { incomes, expenses }
    }

    /// Copy every selected record out of the resolver, in request order.
    ///
    /// Ids with no stored record (deleted between selection and run) are
    /// dropped; the projection treats them as inactive.
    pub fn snapshot(request: &SimulationRequest, resolver: &dyn RecordResolver) -> Self {
        let mut incomes = Vec::new();
        for (&kind, ids) in &request.selected_incomes {
            for &id in ids {
                match resolver.income(kind, id) {
                    Some(record) => incomes.push(record.clone()),
                    None => info!("Selected {} income {} not found, skipping", kind.as_str(), id),
                }
            }
        }

        let mut expenses = Vec::new();
        for (&kind, ids) in &request.selected_expenses {
            for &id in ids {
                match resolver.expense(kind, id) {
                    Some(record) => expenses.push(record.clone()),
                    None => info!("Selected {} expense {} not found, skipping", kind.as_str(), id),
                }
            }
        }

        Self { incomes, expenses }
    }

    pub fn incomes(&self) -> &[IncomeRecord] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty()
    }
}
