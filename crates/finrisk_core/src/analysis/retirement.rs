//! Retirement projection in today's money

use rand::Rng;

use crate::error::SimulationError;
use crate::model::{
    REAL_PERCENTILE_RANKS, RetirementParameters, RetirementResult, WITHDRAWAL_RATES,
    WithdrawalRow,
};
use crate::simulation::MonteCarloEngine;
use crate::statistics;

#[derive(Debug, Clone, Default)]
pub struct RetirementAnalyzer {
    engine: MonteCarloEngine,
}

impl RetirementAnalyzer {
    #[must_use]
    pub fn new(engine: MonteCarloEngine) -> Self {
        Self { engine }
    }

    /// Project savings up to the retirement age and deflate the outcome.
    ///
    /// Fails with [`SimulationError::InvalidHorizon`] unless the retirement
    /// age is strictly after the current age.
    pub fn analyze(
        &self,
        params: &RetirementParameters,
        seed: u64,
    ) -> Result<RetirementResult, SimulationError> {
        let years = params
            .years_to_retirement()
            .ok_or(SimulationError::InvalidHorizon {
                current_age: params.current_age,
                retirement_age: params.retirement_age,
            })?;

        let simulation = self.engine.run(&params.simulation_parameters(years), seed)?;

        let inflation_factor = (1.0 + params.inflation_rate).powf(f64::from(years));
        let real_values: Vec<f64> = simulation
            .terminal_values
            .iter()
            .map(|v| v / inflation_factor)
            .collect();
        let sorted = statistics::sorted_copy(&real_values);
        let real_percentiles = statistics::percentile_table(&sorted, &REAL_PERCENTILE_RANKS);

        let withdrawal_table = real_percentiles
            .entries
            .iter()
            .map(|&(percentile, portfolio_value)| WithdrawalRow {
                percentile,
                portfolio_value,
                withdrawals: WITHDRAWAL_RATES
                    .iter()
                    .map(|&rate| (rate, portfolio_value * rate))
                    .collect(),
            })
            .collect();

        let real_expected_value = statistics::mean(&real_values);
        tracing::debug!(
            years,
            inflation_factor,
            real_expected_value,
            "Retirement projection complete"
        );

        Ok(RetirementResult {
            years_to_retirement: years,
            inflation_factor,
            nominal_expected_value: simulation.summary.mean,
            real_expected_value,
            real_percentiles,
            withdrawal_table,
            simulation,
        })
    }

    /// Analyze with a master seed drawn from `rng`
    pub fn analyze_with_rng<R: Rng + ?Sized>(
        &self,
        params: &RetirementParameters,
        rng: &mut R,
    ) -> Result<RetirementResult, SimulationError> {
        let seed: u64 = rng.random();
        self.analyze(params, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(current_age: u8, retirement_age: u8) -> RetirementParameters {
        RetirementParameters {
            current_age,
            retirement_age,
            current_savings: 100_000.0,
            monthly_contribution: 0.0,
            expected_return: 0.0,
            volatility: 0.0,
            inflation_rate: 0.03,
            iterations: 100,
        }
    }

    #[test]
    fn test_invalid_horizon() {
        let analyzer = RetirementAnalyzer::default();
        for (current, retire) in [(65, 65), (70, 65)] {
            let err = analyzer.analyze(&params(current, retire), 1).unwrap_err();
            assert_eq!(
                err,
                SimulationError::InvalidHorizon {
                    current_age: current,
                    retirement_age: retire,
                }
            );
        }
    }

    #[test]
    fn test_deflates_flat_portfolio() {
        let result = RetirementAnalyzer::default()
            .analyze(&params(55, 65), 8)
            .unwrap();

        let factor = (1.0 + 0.03_f64).powf(10.0);
        assert_eq!(result.years_to_retirement, 10);
        assert_eq!(result.inflation_factor, factor);
        assert_eq!(result.nominal_expected_value, 100_000.0);
        assert!((result.real_expected_value - 100_000.0 / factor).abs() < 1e-6);

        let ranks: Vec<u8> = result.real_percentiles.entries.iter().map(|(r, _)| *r).collect();
        assert_eq!(ranks, vec![25, 50, 75, 90]);

        assert_eq!(result.withdrawal_table.len(), 4);
        let median = &result.withdrawal_table[1];
        assert_eq!(median.percentile, 50);
        let four_percent = median.amount_at(0.04).unwrap();
        assert!((four_percent - 100_000.0 / factor * 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_withdrawals_scale_with_rate() {
        let mut p = params(40, 60);
        p.expected_return = 0.06;
        p.volatility = 0.12;
        p.monthly_contribution = 500.0;
        let result = RetirementAnalyzer::default().analyze(&p, 21).unwrap();

        assert!(result.real_percentiles.is_monotonic());
        assert!(result.real_expected_value < result.nominal_expected_value);
        for row in &result.withdrawal_table {
            let low = row.amount_at(0.03).unwrap();
            let mid = row.amount_at(0.04).unwrap();
            let high = row.amount_at(0.05).unwrap();
            assert!(low < mid && mid < high);
        }
    }
}
