//! Running state for a single projection run

use super::request::ProjectionWindow;

/// Accumulator threaded through the year loop. Owned by one run; never
/// shared between runs.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Year currently being projected
    pub year: i32,

    /// Age in the current year
    pub age: u32,

    /// Sum of annual balances up to and including the current year
    pub cumulative_balance: f64,

    /// Income summed over projected years
    pub total_income: f64,

    /// Expenses summed over projected years
    pub total_expenses: f64,

    /// Number of years projected so far
    pub years_projected: u64,

    start_year: i32,
    end_year: i32,
    base_age: u32,
}

impl ProjectionState {
    /// State positioned on the first projected year
    pub fn new(window: &ProjectionWindow) -> Self {
        Self {
            year: window.start_year,
            age: window.base_age,
            cumulative_balance: 0.0,
            total_income: 0.0,
            total_expenses: 0.0,
            years_projected: 0,
            start_year: window.start_year,
            end_year: window.end_year,
            base_age: window.base_age,
        }
    }

    /// Move to the following year. Returns `false`, leaving the state on
    /// the last year, once `end_year` has been reached.
    pub fn advance_year(&mut self) -> bool {
        if self.year >= self.end_year {
            return false;
        }
        self.year += 1;
        self.age = self.base_age.saturating_add(self.year.abs_diff(self.start_year));
        true
    }

    /// Fold one year's totals into the running figures, returning the
    /// year's balance
    pub fn record_year(&mut self, income: f64, expenses: f64) -> f64 {
        let balance = income - expenses;
        self.cumulative_balance += balance;
        self.total_income += income;
        self.total_expenses += expenses;
        self.years_projected += 1;
        balance
    }

    /// Mean annual balance, 0 before any year is projected
    pub fn avg_annual_balance(&self) -> f64 {
        if self.years_projected == 0 {
            0.0
        } else {
            (self.total_income - self.total_expenses) / self.years_projected as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> ProjectionWindow {
        ProjectionWindow { base_age: 40, start_year: 2025, end_year: 2027 }
    }

    #[test]
    fn test_age_tracks_year() {
        let mut state = ProjectionState::new(&window());
        assert_eq!((state.year, state.age), (2025, 40));
        assert!(state.advance_year());
        assert_eq!((state.year, state.age), (2026, 41));
        assert!(state.advance_year());
        assert!(!state.advance_year());
        assert_eq!((state.year, state.age), (2027, 42));
    }

    #[test]
    fn test_range_edges_do_not_overflow() {
        let low = ProjectionWindow { base_age: 30, start_year: i32::MIN, end_year: i32::MIN + 1 };
        let mut state = ProjectionState::new(&low);
        assert_eq!(state.year, i32::MIN);
        assert!(state.advance_year());
        assert_eq!((state.year, state.age), (i32::MIN + 1, 31));

        let high = ProjectionWindow { base_age: u32::MAX - 1, start_year: i32::MAX - 1, end_year: i32::MAX };
        let mut state = ProjectionState::new(&high);
        assert!(state.advance_year());
        assert_eq!((state.year, state.age), (i32::MAX, u32::MAX));
        assert!(!state.advance_year());
        assert_eq!(state.year, i32::MAX);
    }

    #[test]
    fn test_cumulative_balance() {
        let mut state = ProjectionState::new(&window());
        assert_eq!(state.record_year(500.0, 200.0), 300.0);
        assert_eq!(state.record_year(100.0, 400.0), -300.0);
        assert_eq!(state.cumulative_balance, 0.0);
        assert_eq!(state.total_income, 600.0);
        assert_eq!(state.avg_annual_balance(), 0.0);
    }

    #[test]
    fn test_empty_average_guarded() {
        let state = ProjectionState::new(&window());
        assert_eq!(state.avg_annual_balance(), 0.0);
    }
}
