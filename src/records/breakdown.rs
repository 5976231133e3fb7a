//! Itemized monthly costs that collapse into a single record total
//!
//! Living and insurance records are entered line by line; only the summed
//! monthly figure reaches the projection.

use serde::{Deserialize, Serialize};

/// Monthly living costs by line item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivingCostBreakdown {
    pub food_home: f64,
    pub food_outside: f64,
    pub utility_electricity: f64,
    pub utility_gas: f64,
    pub utility_water: f64,
    pub subscription_services: f64,
    pub internet: f64,
    pub phone: f64,
    pub household_goods: f64,
    pub hygiene: f64,
    pub clothing: f64,
    pub beauty: f64,
    pub child_food: f64,
    pub child_clothing: f64,
    pub child_medical: f64,
    pub child_other: f64,
    pub transport: f64,
    pub entertainment: f64,
    pub pet_costs: f64,
    pub other_expenses: f64,
}

impl LivingCostBreakdown {
    pub fn monthly_total(&self) -> f64 {
        [
            self.food_home,
            self.food_outside,
            self.utility_electricity,
            self.utility_gas,
            self.utility_water,
            self.subscription_services,
            self.internet,
            self.phone,
            self.household_goods,
            self.hygiene,
            self.clothing,
            self.beauty,
            self.child_food,
            self.child_clothing,
            self.child_medical,
            self.child_other,
            self.transport,
            self.entertainment,
            self.pet_costs,
            self.other_expenses,
        ]
        .iter()
        .sum()
    }
}

/// Monthly insurance premiums by policy type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsurancePremiums {
    pub medical: f64,
    pub cancer: f64,
    pub life: f64,
    pub income_protection: f64,
    pub accident: f64,
    pub liability: f64,
    pub fire: f64,
    pub long_term_care: f64,
    pub other: f64,
}

impl InsurancePremiums {
    pub fn monthly_total(&self) -> f64 {
        [
            self.medical,
            self.cancer,
            self.life,
            self.income_protection,
            self.accident,
            self.liability,
            self.fire,
            self.long_term_care,
            self.other,
        ]
        .iter()
        .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_living_total_sums_line_items() {
        let living = LivingCostBreakdown {
            food_home: 60_000.0,
            food_outside: 15_000.0,
            utility_electricity: 9_000.0,
            internet: 5_000.0,
            child_food: 11_000.0,
            ..Default::default()
        };
        assert_eq!(living.monthly_total(), 100_000.0);
    }

    #[test]
    fn test_missing_items_default_to_zero() {
        let premiums: InsurancePremiums =
            serde_json::from_str(r#"{"medical": 3000, "life": 7000}"#).unwrap();
        assert_eq!(premiums.monthly_total(), 10_000.0);
        assert_eq!(LivingCostBreakdown::default().monthly_total(), 0.0);
    }
}
