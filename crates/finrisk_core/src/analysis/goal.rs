//! Goal achievement analysis
//!
//! Runs one projection, then measures it against a target value: how often
//! the target is reached, by how much it is missed, what return would reach
//! it, and how the odds move with the monthly contribution.

use rand::Rng;

use crate::error::SimulationError;
use crate::model::{
    ContributionSensitivity, GoalParameters, GoalResult, ProbabilityRanges, SimulationParameters,
};
use crate::simulation::{MonteCarloEngine, map_indexed};
use crate::statistics;

#[derive(Debug, Clone, Default)]
pub struct GoalAnalyzer {
    engine: MonteCarloEngine,
}

impl GoalAnalyzer {
    #[must_use]
    pub fn new(engine: MonteCarloEngine) -> Self {
        Self { engine }
    }

    pub fn analyze(&self, params: &GoalParameters, seed: u64) -> Result<GoalResult, SimulationError> {
        let target = params.target_value;
        let simulation = self.engine.run(&params.simulation, seed)?;
        let values = &simulation.terminal_values;

        let goal_success_probability = statistics::share_percent(values, |v| v >= target);

        let shortfalls: Vec<f64> = values.iter().copied().filter(|&v| v < target).collect();
        let (average_shortfall, worst_case_shortfall) = if shortfalls.is_empty() {
            (0.0, 0.0)
        } else {
            let lowest = shortfalls.iter().copied().fold(f64::INFINITY, f64::min);
            (target - statistics::mean(&shortfalls), target - lowest)
        };

        let contribution_sensitivity =
            self.contribution_sensitivity(&params.simulation, target, seed)?;

        tracing::debug!(
            target,
            goal_success_probability,
            average_shortfall,
            "Goal analysis complete"
        );

        Ok(GoalResult {
            target_value: target,
            goal_success_probability,
            average_shortfall,
            worst_case_shortfall,
            required_return: required_return(&params.simulation, target),
            probability_ranges: probability_ranges(values, target),
            contribution_sensitivity,
            simulation,
        })
    }

    /// Analyze with a master seed drawn from `rng`
    pub fn analyze_with_rng<R: Rng + ?Sized>(
        &self,
        params: &GoalParameters,
        rng: &mut R,
    ) -> Result<GoalResult, SimulationError> {
        let seed: u64 = rng.random();
        self.analyze(params, seed)
    }

    /// Re-run the projection at each configured contribution level with the
    /// reduced iteration count.
    ///
    /// Every level shares `seed`, so the paths see the same market draws and
    /// differ only by the contribution.
    pub fn contribution_sensitivity(
        &self,
        params: &SimulationParameters,
        target: f64,
        seed: u64,
    ) -> Result<Vec<ContributionSensitivity>, SimulationError> {
        let config = self.engine.config();
        let levels = &config.contribution_levels;

        map_indexed(config.parallel, levels.len(), |i| {
            let monthly_contribution = levels[i];
            let rerun =
                params.with_contribution(monthly_contribution, config.sensitivity_iterations);
            let (values, _) = self.engine.simulate_paths(&rerun, seed)?;
            Ok(ContributionSensitivity {
                monthly_contribution,
                success_probability: statistics::share_percent(&values, |v| v >= target),
                expected_value: statistics::mean(&values),
            })
        })
        .into_iter()
        .collect()
    }
}

/// Share of paths at or above each multiple of the target
#[must_use]
pub fn probability_ranges(values: &[f64], target: f64) -> ProbabilityRanges {
    let [exceed_150, exceed_125, achieve_target, within_75, within_50] =
        ProbabilityRanges::MULTIPLIERS
            .map(|multiplier| statistics::share_percent(values, |v| v >= target * multiplier));
    ProbabilityRanges {
        exceed_150,
        exceed_125,
        achieve_target,
        within_75,
        within_50,
    }
}

/// Constant annual return that grows the initial value into the target.
///
/// Contributions are handled approximately by subtracting their nominal total
/// from the target before inverting. `None` when there is nothing to grow or
/// the contributions alone already cover the target.
#[must_use]
pub fn required_return(params: &SimulationParameters, target: f64) -> Option<f64> {
    if params.initial_value <= 0.0 || params.time_horizon_years == 0 {
        return None;
    }
    let adjusted_target = if params.monthly_contribution > 0.0 {
        target - params.total_contributions()
    } else {
        target
    };
    if adjusted_target <= 0.0 {
        return None;
    }
    let years = f64::from(params.time_horizon_years);
    Some((adjusted_target / params.initial_value).powf(1.0 / years) - 1.0)
}
