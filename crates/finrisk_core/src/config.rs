//! Engine configuration
//!
//! `EngineConfig` holds the knobs shared by the Monte Carlo engine and the
//! analyzers layered on it. Every field has a default, so a partial YAML or
//! JSON document is enough:
//!
//! ```ignore
//! let config = EngineConfig {
//!     risk_free_rate: 0.03,
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

fn default_risk_free_rate() -> f64 {
    0.02
}

fn default_sensitivity_iterations() -> usize {
    1_000
}

fn default_contribution_levels() -> Vec<f64> {
    vec![0.0, 100.0, 250.0, 500.0, 1_000.0, 2_000.0]
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Annual risk-free rate used by the Sharpe ratio
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    /// Iterations per contribution level in the goal sensitivity sweep
    #[serde(default = "default_sensitivity_iterations")]
    pub sensitivity_iterations: usize,

    /// Monthly contribution levels swept by the goal analyzer
    #[serde(default = "default_contribution_levels")]
    pub contribution_levels: Vec<f64>,

    /// Spread paths and sweep points across the rayon pool. Has no effect
    /// without the `parallel` feature; results are identical either way.
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            sensitivity_iterations: default_sensitivity_iterations(),
            contribution_levels: default_contribution_levels(),
            parallel: true,
        }
    }
}

impl EngineConfig {
    /// Same configuration with parallel execution switched off
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }
}
