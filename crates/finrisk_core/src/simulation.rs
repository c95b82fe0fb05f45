//! Monte Carlo portfolio projection
//!
//! Every path compounds monthly: the annual expected return and volatility are
//! converted to `r / 12` and `sigma / sqrt(12)`, one normal draw is taken per
//! month and the value is updated as `value * (1 + draw) + contribution`.
//!
//! The master seed is first scrambled into a stream base; path `i` then owns a
//! `SmallRng` seeded with `base + i`. A run is fully determined by its master
//! seed no matter how paths are spread across threads, and neighbouring master
//! seeds do not share paths.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rand_distr::{Distribution, Normal};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::EngineConfig;
use crate::error::SimulationError;
use crate::model::{PERCENTILE_RANKS, SimulationParameters, SimulationResult};
use crate::statistics;

const MONTHS_PER_YEAR: usize = 12;

/// First path seed of the stream belonging to master seed `seed`
#[must_use]
pub fn stream_base(seed: u64) -> u64 {
    SmallRng::seed_from_u64(seed).random()
}

/// Seed of path `index` under master seed `seed`
#[must_use]
pub fn path_seed(seed: u64, index: usize) -> u64 {
    stream_base(seed).wrapping_add(index as u64)
}

/// Map `0..count` through `f`, on the rayon pool when `parallel` is set and
/// the feature is enabled. Output order always follows the index.
#[cfg(feature = "parallel")]
pub(crate) fn map_indexed<T, F>(parallel: bool, count: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if parallel {
        (0..count).into_par_iter().map(f).collect()
    } else {
        (0..count).map(f).collect()
    }
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_indexed<T, F>(_parallel: bool, count: usize, f: F) -> Vec<T>
where
    F: Fn(usize) -> T,
{
    (0..count).map(f).collect()
}

/// Terminal value of one path plus, when requested, its yearly trajectory
struct PathOutcome {
    terminal: f64,
    trajectory: Vec<f64>,
}

fn simulate_path(
    params: &SimulationParameters,
    monthly: &Normal<f64>,
    seed: u64,
    record_trajectory: bool,
) -> PathOutcome {
    let mut rng = SmallRng::seed_from_u64(seed);
    let months = params.total_months();

    let mut trajectory = Vec::new();
    if record_trajectory {
        trajectory.reserve(params.time_horizon_years as usize + 1);
        trajectory.push(params.initial_value);
    }

    let mut value = params.initial_value;
    for month in 1..=months {
        let r = monthly.sample(&mut rng);
        value = value * (1.0 + r) + params.monthly_contribution;
        if record_trajectory && month % MONTHS_PER_YEAR == 0 {
            trajectory.push(value);
        }
    }

    PathOutcome {
        terminal: value,
        trajectory,
    }
}

#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngine {
    config: EngineConfig,
}

impl MonteCarloEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Monthly return distribution for `params`
    pub fn monthly_distribution(
        params: &SimulationParameters,
    ) -> Result<Normal<f64>, SimulationError> {
        let mean = params.expected_return / MONTHS_PER_YEAR as f64;
        let std_dev = params.volatility / (MONTHS_PER_YEAR as f64).sqrt();
        if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
            return Err(SimulationError::InvalidDistribution { mean, std_dev });
        }
        Normal::new(mean, std_dev)
            .map_err(|_| SimulationError::InvalidDistribution { mean, std_dev })
    }

    fn check_degenerate(params: &SimulationParameters) -> Result<(), SimulationError> {
        if params.iterations == 0 {
            return Err(SimulationError::DegenerateParameters(
                "iterations must be at least 1".to_string(),
            ));
        }
        if params.time_horizon_years == 0 {
            return Err(SimulationError::DegenerateParameters(
                "time horizon must be at least 1 year".to_string(),
            ));
        }
        if !params.initial_value.is_finite() || !params.monthly_contribution.is_finite() {
            return Err(SimulationError::DegenerateParameters(
                "initial value and contribution must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Terminal value of every path, in path order, and the first path's
    /// yearly trajectory
    pub fn simulate_paths(
        &self,
        params: &SimulationParameters,
        seed: u64,
    ) -> Result<(Vec<f64>, Vec<f64>), SimulationError> {
        Self::check_degenerate(params)?;
        let monthly = Self::monthly_distribution(params)?;

        let base = stream_base(seed);
        let outcomes = map_indexed(self.config.parallel, params.iterations, |i| {
            simulate_path(params, &monthly, base.wrapping_add(i as u64), i == 0)
        });

        let mut trajectory = Vec::new();
        let mut terminal_values = Vec::with_capacity(outcomes.len());
        for (i, outcome) in outcomes.into_iter().enumerate() {
            if i == 0 {
                trajectory = outcome.trajectory;
            }
            terminal_values.push(outcome.terminal);
        }

        Ok((terminal_values, trajectory))
    }

    /// Run the projection under master seed `seed`.
    ///
    /// Identical parameters and seed always produce an identical result.
    pub fn run(
        &self,
        params: &SimulationParameters,
        seed: u64,
    ) -> Result<SimulationResult, SimulationError> {
        tracing::debug!(
            initial_value = params.initial_value,
            expected_return = params.expected_return,
            volatility = params.volatility,
            years = params.time_horizon_years,
            iterations = params.iterations,
            seed,
            "Running Monte Carlo simulation"
        );

        let (terminal_values, yearly_trajectory) = self.simulate_paths(params, seed)?;
        let result = self.analyze(params, seed, terminal_values, yearly_trajectory);

        tracing::info!(
            iterations = result.iterations(),
            mean = result.summary.mean,
            success_probability = result.success_probability,
            "Simulation complete"
        );

        Ok(result)
    }

    /// Run with a master seed drawn from `rng`
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        params: &SimulationParameters,
        rng: &mut R,
    ) -> Result<SimulationResult, SimulationError> {
        let seed: u64 = rng.random();
        self.run(params, seed)
    }

    fn analyze(
        &self,
        params: &SimulationParameters,
        seed: u64,
        terminal_values: Vec<f64>,
        yearly_trajectory: Vec<f64>,
    ) -> SimulationResult {
        let initial = params.initial_value;
        let years = params.time_horizon_years;

        let sorted = statistics::sorted_copy(&terminal_values);
        let summary = statistics::summarize(&sorted);
        let percentiles = statistics::percentile_table(&sorted, &PERCENTILE_RANKS);
        let p1 = statistics::percentile(&sorted, 1.0);
        let p5 = statistics::percentile(&sorted, 5.0);

        let (total_return, annualized_return, return_volatility) = if initial > 0.0 {
            let growth = (summary.mean / initial).max(0.0);
            (
                (summary.mean - initial) / initial,
                growth.powf(1.0 / f64::from(years)) - 1.0,
                summary.std_dev / initial,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        SimulationResult {
            parameters: *params,
            seed,
            var_95: initial - p5,
            var_99: initial - p1,
            expected_shortfall: statistics::expected_shortfall(&terminal_values, p5),
            success_probability: statistics::share_percent(&terminal_values, |v| v > initial),
            max_drawdown: statistics::max_drawdown(&yearly_trajectory),
            sharpe_ratio: statistics::sharpe_ratio(
                &terminal_values,
                initial,
                years,
                self.config.risk_free_rate,
            ),
            total_return,
            annualized_return,
            return_volatility,
            summary,
            percentiles,
            terminal_values,
            yearly_trajectory,
        }
    }
}
