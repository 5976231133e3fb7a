//! Monthly housing cost derivation for housing records

use serde::{Deserialize, Serialize};

use super::amortization::LoanTerms;
use crate::records::{ActivationWindow, ExpenseRecord};

/// How the household occupies its home
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidenceType {
    Rental,
    OwnedWithLoan,
    OwnedWithoutLoan,
}

/// Housing cost inputs as entered for one residence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingCosts {
    pub residence_type: ResidenceType,
    #[serde(default)]
    pub rent_monthly: f64,
    #[serde(default)]
    pub loan: Option<LoanTerms>,
    #[serde(default)]
    pub property_tax_monthly: f64,
    #[serde(default)]
    pub management_fee_monthly: f64,
    #[serde(default)]
    pub repair_reserve_monthly: f64,
    #[serde(default)]
    pub fire_insurance_monthly: f64,
}

impl HousingCosts {
    pub fn rental(rent_monthly: f64) -> Self {
        Self {
            residence_type: ResidenceType::Rental,
            rent_monthly,
            loan: None,
            property_tax_monthly: 0.0,
            management_fee_monthly: 0.0,
            repair_reserve_monthly: 0.0,
            fire_insurance_monthly: 0.0,
        }
    }

    pub fn owned_with_loan(loan: LoanTerms) -> Self {
        Self {
            residence_type: ResidenceType::OwnedWithLoan,
            loan: Some(loan),
            ..Self::rental(0.0)
        }
    }

    /// Mortgage payment; only an owned-with-loan residence carries one
    pub fn mortgage_monthly(&self) -> f64 {
        match (self.residence_type, &self.loan) {
            (ResidenceType::OwnedWithLoan, Some(loan)) => loan.monthly_payment(),
            _ => 0.0,
        }
    }

    /// Total monthly housing cost. Rentals pay rent only; owners pay the
    /// mortgage plus the recurring ownership costs.
    pub fn monthly_total(&self) -> f64 {
        match self.residence_type {
            ResidenceType::Rental => self.rent_monthly,
            ResidenceType::OwnedWithLoan | ResidenceType::OwnedWithoutLoan => {
                self.mortgage_monthly()
                    + self.property_tax_monthly
                    + self.management_fee_monthly
                    + self.repair_reserve_monthly
                    + self.fire_insurance_monthly
            }
        }
    }

    /// Housing expense record carrying the derived monthly total
    pub fn to_record(&self, id: u32, name: impl Into<String>, window: ActivationWindow) -> ExpenseRecord {
        ExpenseRecord::housing(id, name, window, self.monthly_total())
    }
}
