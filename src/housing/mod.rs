//! Housing costs: mortgage amortization and monthly totals

mod amortization;
mod costs;

pub use amortization::{compute_monthly_payment, LoanTerms, RepaymentMethod};
pub use costs::{HousingCosts, ResidenceType};
