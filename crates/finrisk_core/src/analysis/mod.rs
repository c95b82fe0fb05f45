//! Analyzers layered on the Monte Carlo engine

mod goal;
mod retirement;

pub use goal::{GoalAnalyzer, probability_ranges, required_return};
pub use retirement::RetirementAnalyzer;
