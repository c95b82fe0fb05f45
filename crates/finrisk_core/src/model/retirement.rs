//! Retirement projection inputs and results

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::simulation::{PercentileTable, SimulationParameters, SimulationResult};

/// Percentiles reported on the inflation-adjusted distribution
pub const REAL_PERCENTILE_RANKS: [u8; 4] = [25, 50, 75, 90];

/// Annual withdrawal rates tabulated for each real percentile
pub const WITHDRAWAL_RATES: [f64; 3] = [0.03, 0.04, 0.05];

fn default_inflation_rate() -> f64 {
    0.03
}

fn default_iterations() -> usize {
    10_000
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementParameters {
    pub current_age: u8,
    pub retirement_age: u8,
    pub current_savings: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    pub expected_return: f64,
    pub volatility: f64,
    #[serde(default = "default_inflation_rate")]
    pub inflation_rate: f64,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl RetirementParameters {
    /// Years until retirement, `None` when retirement is not in the future
    #[must_use]
    pub fn years_to_retirement(&self) -> Option<u32> {
        self.retirement_age
            .checked_sub(self.current_age)
            .filter(|&years| years > 0)
            .map(u32::from)
    }

    /// Simulation parameters covering the accumulation phase
    #[must_use]
    pub fn simulation_parameters(&self, years: u32) -> SimulationParameters {
        SimulationParameters {
            initial_value: self.current_savings,
            expected_return: self.expected_return,
            volatility: self.volatility,
            time_horizon_years: years,
            iterations: self.iterations,
            monthly_contribution: self.monthly_contribution,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_range("current_age", f64::from(self.current_age), 18.0, 100.0)?;
        ValidationError::check_range(
            "retirement_age",
            f64::from(self.retirement_age),
            18.0,
            100.0,
        )?;
        ValidationError::check_non_negative("current_savings", self.current_savings)?;
        ValidationError::check_non_negative("monthly_contribution", self.monthly_contribution)?;
        ValidationError::check_range("expected_return", self.expected_return, -1.0, 1.0)?;
        ValidationError::check_range("volatility", self.volatility, 0.0, 1.0)?;
        ValidationError::check_range("inflation_rate", self.inflation_rate, -0.5, 1.0)?;
        ValidationError::check_range("iterations", self.iterations as f64, 1_000.0, 100_000.0)
    }
}

/// Annual withdrawal amounts supported by one real portfolio percentile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRow {
    pub percentile: u8,
    pub portfolio_value: f64,
    /// `(rate, annual amount)` for each rate in [`WITHDRAWAL_RATES`]
    pub withdrawals: Vec<(f64, f64)>,
}

impl WithdrawalRow {
    #[must_use]
    pub fn amount_at(&self, rate: f64) -> Option<f64> {
        self.withdrawals
            .iter()
            .find(|(r, _)| (*r - rate).abs() < 1e-9)
            .map(|(_, amount)| *amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementResult {
    /// Nominal projection of the accumulation phase
    pub simulation: SimulationResult,
    pub years_to_retirement: u32,
    /// `(1 + inflation_rate)^years`
    pub inflation_factor: f64,
    pub nominal_expected_value: f64,
    pub real_expected_value: f64,
    pub real_percentiles: PercentileTable,
    pub withdrawal_table: Vec<WithdrawalRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(current_age: u8, retirement_age: u8) -> RetirementParameters {
        RetirementParameters {
            current_age,
            retirement_age,
            current_savings: 50_000.0,
            monthly_contribution: 500.0,
            expected_return: 0.06,
            volatility: 0.12,
            inflation_rate: 0.03,
            iterations: 1_000,
        }
    }

    #[test]
    fn test_years_to_retirement() {
        assert_eq!(params(35, 65).years_to_retirement(), Some(30));
        assert_eq!(params(65, 65).years_to_retirement(), None);
        assert_eq!(params(65, 60).years_to_retirement(), None);
    }

    #[test]
    fn test_simulation_parameters_mapping() {
        let sim = params(40, 60).simulation_parameters(20);
        assert_eq!(sim.initial_value, 50_000.0);
        assert_eq!(sim.time_horizon_years, 20);
        assert_eq!(sim.monthly_contribution, 500.0);
        assert_eq!(sim.iterations, 1_000);
    }

    #[test]
    fn test_inflation_default_from_json() {
        let json = r#"{
            "current_age": 30,
            "retirement_age": 65,
            "current_savings": 10000.0,
            "expected_return": 0.07,
            "volatility": 0.15
        }"#;
        let parsed: RetirementParameters = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.inflation_rate, 0.03);
        assert_eq!(parsed.iterations, 10_000);
        assert_eq!(parsed.monthly_contribution, 0.0);
    }
}
