//! Monte Carlo inputs and results

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Ranks reported in every simulation's percentile table
pub const PERCENTILE_RANKS: [u8; 9] = [1, 5, 10, 25, 50, 75, 90, 95, 99];

fn default_iterations() -> usize {
    10_000
}

/// Inputs of one Monte Carlo projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub initial_value: f64,
    /// Expected annual return as a decimal (0.07 = 7%)
    pub expected_return: f64,
    /// Annual volatility as a decimal
    pub volatility: f64,
    pub time_horizon_years: u32,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub monthly_contribution: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_value: 0.0,
            expected_return: 0.0,
            volatility: 0.0,
            time_horizon_years: 1,
            iterations: default_iterations(),
            monthly_contribution: 0.0,
        }
    }
}

impl SimulationParameters {
    #[must_use]
    pub fn total_months(&self) -> usize {
        self.time_horizon_years as usize * 12
    }

    /// Nominal sum of every contribution made over the horizon
    #[must_use]
    pub fn total_contributions(&self) -> f64 {
        self.monthly_contribution * 12.0 * f64::from(self.time_horizon_years)
    }

    /// Same parameters with a different contribution and iteration count
    #[must_use]
    pub fn with_contribution(self, monthly_contribution: f64, iterations: usize) -> Self {
        Self {
            monthly_contribution,
            iterations,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_non_negative("initial_value", self.initial_value)?;
        ValidationError::check_range("expected_return", self.expected_return, -1.0, 1.0)?;
        ValidationError::check_range("volatility", self.volatility, 0.0, 1.0)?;
        ValidationError::check_range(
            "time_horizon_years",
            f64::from(self.time_horizon_years),
            1.0,
            50.0,
        )?;
        ValidationError::check_range("iterations", self.iterations as f64, 1_000.0, 100_000.0)?;
        ValidationError::check_non_negative("monthly_contribution", self.monthly_contribution)
    }
}

/// Rank to value table, ranks ascending
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentileTable {
    pub entries: Vec<(u8, f64)>,
}

impl PercentileTable {
    #[must_use]
    pub fn get(&self, rank: u8) -> Option<f64> {
        self.entries
            .iter()
            .find(|(r, _)| *r == rank)
            .map(|(_, value)| *value)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, value)| *value)
    }

    /// True when values never decrease as the rank increases
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].1 <= w[1].1)
    }
}

/// Moments of the terminal-value distribution
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub skewness: f64,
    /// Excess kurtosis
    pub kurtosis: f64,
    pub min: f64,
    pub max: f64,
}

/// Complete output of one Monte Carlo run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub parameters: SimulationParameters,
    pub seed: u64,
    /// Terminal value of every path, in path order
    pub terminal_values: Vec<f64>,
    pub summary: SummaryStatistics,
    pub percentiles: PercentileTable,
    /// `initial_value - P5`
    pub var_95: f64,
    /// `initial_value - P1`
    pub var_99: f64,
    /// Mean of terminal values at or below P5
    pub expected_shortfall: f64,
    /// Percentage of paths ending strictly above the initial value
    pub success_probability: f64,
    /// Starting value followed by the value at the end of each year, first path only
    pub yearly_trajectory: Vec<f64>,
    /// Largest peak-to-trough decline of the trajectory, as a percentage
    pub max_drawdown: f64,
    pub total_return: f64,
    pub annualized_return: f64,
    pub return_volatility: f64,
    pub sharpe_ratio: f64,
}

impl SimulationResult {
    #[must_use]
    pub fn expected_value(&self) -> f64 {
        self.summary.mean
    }

    #[must_use]
    pub fn iterations(&self) -> usize {
        self.terminal_values.len()
    }

    /// Compact view suitable for persisting alongside the inputs
    #[must_use]
    pub fn summary_view(&self) -> SimulationSummary {
        SimulationSummary {
            initial_value: self.parameters.initial_value,
            expected_return_pct: self.parameters.expected_return * 100.0,
            volatility_pct: self.parameters.volatility * 100.0,
            time_horizon_years: self.parameters.time_horizon_years,
            iterations: self.iterations(),
            success_probability: self.success_probability,
            expected_final_value: self.summary.mean,
            var_95: self.var_95,
            var_99: self.var_99,
        }
    }

    #[must_use]
    pub fn risk_metrics(&self) -> RiskMetrics {
        RiskMetrics {
            value_at_risk_95: self.var_95,
            value_at_risk_99: self.var_99,
            expected_shortfall: self.expected_shortfall,
            maximum_drawdown: self.max_drawdown,
            volatility_of_returns: self.return_volatility,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub initial_value: f64,
    pub expected_return_pct: f64,
    pub volatility_pct: f64,
    pub time_horizon_years: u32,
    pub iterations: usize,
    pub success_probability: f64,
    pub expected_final_value: f64,
    pub var_95: f64,
    pub var_99: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub value_at_risk_95: f64,
    pub value_at_risk_99: f64,
    pub expected_shortfall: f64,
    pub maximum_drawdown: f64,
    pub volatility_of_returns: f64,
}
