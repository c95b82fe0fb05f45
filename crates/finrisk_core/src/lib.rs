//! Personal-finance risk scoring and portfolio projection
//!
//! This crate provides two independent pipelines:
//! - A deterministic five-factor risk score (liquidity, credit, market,
//!   inflation, protection) feeding an asset allocation recommender
//! - A Monte Carlo projection of portfolio value, with goal achievement and
//!   retirement analyzers layered on top
//!
//! # Example
//!
//! ```ignore
//! use finrisk_core::{MonteCarloEngine, SimulationParameters};
//!
//! let params = SimulationParameters {
//!     initial_value: 10_000.0,
//!     expected_return: 0.07,
//!     volatility: 0.15,
//!     time_horizon_years: 10,
//!     ..Default::default()
//! };
//! let result = MonteCarloEngine::default().run(&params, 42)?;
//! println!("P50 = {:?}", result.percentiles.get(50));
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod allocation;
pub mod analysis;
pub mod config;
pub mod error;
pub mod scoring;
pub mod simulation;
pub mod statistics;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use allocation::AllocationRecommender;
pub use analysis::{GoalAnalyzer, RetirementAnalyzer};
pub use config::EngineConfig;
pub use error::{ScoringError, SimulationError, ValidationError};
pub use model::{
    AllocationPlan, AllocationRecommendation, AssetClass, FinancialGoal, FinancialProfile,
    GoalParameters, GoalResult, RetirementParameters, RetirementResult, RiskFactor, RiskLevel,
    RiskScoreSet, RiskToleranceProfile, SimulationParameters, SimulationResult,
};
pub use scoring::RiskScoringEngine;
pub use simulation::MonteCarloEngine;
