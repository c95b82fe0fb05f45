//! Goal-based projection inputs and results

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::simulation::{SimulationParameters, SimulationResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalParameters {
    #[serde(flatten)]
    pub simulation: SimulationParameters,
    pub target_value: f64,
}

impl GoalParameters {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.simulation.validate()?;
        ValidationError::check_non_negative("target_value", self.target_value)
    }
}

/// Share of paths (percent) reaching each multiple of the target.
///
/// Thresholds rise from `within_50` (0.5x) to `exceed_150` (1.5x), so the
/// values never increase in that direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProbabilityRanges {
    pub exceed_150: f64,
    pub exceed_125: f64,
    pub achieve_target: f64,
    pub within_75: f64,
    pub within_50: f64,
}

impl ProbabilityRanges {
    /// Target multipliers in field order
    pub const MULTIPLIERS: [f64; 5] = [1.5, 1.25, 1.0, 0.75, 0.5];

    #[must_use]
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.exceed_150,
            self.exceed_125,
            self.achieve_target,
            self.within_75,
            self.within_50,
        ]
    }
}

/// Outcome of re-running the projection at one contribution level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionSensitivity {
    pub monthly_contribution: f64,
    pub success_probability: f64,
    pub expected_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalResult {
    pub simulation: SimulationResult,
    pub target_value: f64,
    /// Percentage of paths ending at or above the target
    pub goal_success_probability: f64,
    /// Target minus the mean of the paths that fall short
    pub average_shortfall: f64,
    /// Target minus the lowest terminal value
    pub worst_case_shortfall: f64,
    /// Annual return that grows the initial value into the target, `None`
    /// when the inversion is undefined
    pub required_return: Option<f64>,
    pub probability_ranges: ProbabilityRanges,
    pub contribution_sensitivity: Vec<ContributionSensitivity>,
}
