//! Command dispatch and output records
//!
//! Each command loads its document, validates it, calls one engine and returns
//! a serializable record. Printing is left to `main`.

use std::collections::BTreeMap;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use finrisk_core::model::{
    AllocationRecommendation, FinancialGoal, GoalParameters, GoalResult, RetirementParameters,
    RetirementResult, RiskFactor, RiskMetrics, RiskScoreSet, SimulationParameters,
    SimulationResult, SimulationSummary,
};
use finrisk_core::scoring::mitigation_strategies;
use finrisk_core::{
    AllocationRecommender, EngineConfig, GoalAnalyzer, MonteCarloEngine, RetirementAnalyzer,
    RiskLevel, RiskScoringEngine,
};
use jiff::civil::Date;
use rand::Rng;
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::input::{ProfileDocument, load_engine_config, load_yaml};

#[derive(Debug, Serialize)]
pub struct AssessmentOutput {
    pub scores: RiskScoreSet,
    pub mitigation_strategies: BTreeMap<RiskFactor, Vec<&'static str>>,
    /// Questionnaire score of the tolerance profile, when one was given
    pub self_reported_score: Option<u8>,
    pub self_reported_level: Option<RiskLevel>,
}

#[derive(Debug, Serialize)]
pub struct AllocationOutput {
    pub scores: RiskScoreSet,
    pub recommendation: AllocationRecommendation,
}

#[derive(Debug, Serialize)]
pub struct SimulationOutput {
    pub summary: SimulationSummary,
    pub risk_metrics: RiskMetrics,
    pub result: SimulationResult,
}

#[derive(Debug, Serialize)]
pub struct GoalProgressOutput {
    pub goal: FinancialGoal,
    pub today: Date,
    pub progress_percentage: f64,
    pub remaining_amount: f64,
    pub days_remaining: Option<i32>,
    pub monthly_savings_needed: Option<f64>,
    pub is_on_track: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
    Assessment(AssessmentOutput),
    Allocation(AllocationOutput),
    Simulation(SimulationOutput),
    Goal(GoalResult),
    Retirement(RetirementResult),
    GoalProgress(GoalProgressOutput),
}

/// Master seed from the command line, or a fresh one from the thread rng
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let seed: u64 = rand::rng().random();
        tracing::info!(seed, "No seed given, drew one at random");
        seed
    })
}

/// Run the parsed command line
pub fn run(cli: &Cli) -> Result<Output> {
    let config = load_engine_config(cli.config.as_deref())?;
    execute(&cli.command, config, cli.seed)
}

pub fn execute(command: &Command, config: EngineConfig, seed: Option<u64>) -> Result<Output> {
    match command {
        Command::Assess { input } => assess(input).map(Output::Assessment),
        Command::Allocate { input } => allocate(input).map(Output::Allocation),
        Command::Simulate {
            input,
            include_paths,
        } => simulate(input, config, resolve_seed(seed), *include_paths).map(Output::Simulation),
        Command::Goal {
            input,
            include_paths,
        } => goal(input, config, resolve_seed(seed), *include_paths).map(Output::Goal),
        Command::Retirement {
            input,
            include_paths,
        } => retirement(input, config, resolve_seed(seed), *include_paths)
            .map(Output::Retirement),
        Command::GoalProgress {
            input,
            today,
            contribute,
        } => goal_progress(input, *today, *contribute).map(Output::GoalProgress),
    }
}

fn load_profiles(input: &Path) -> Result<ProfileDocument> {
    let doc: ProfileDocument = load_yaml(input)?;
    doc.validate()?;
    Ok(doc)
}

pub fn assess(input: &Path) -> Result<AssessmentOutput> {
    let doc = load_profiles(input)?;
    let scores = RiskScoringEngine::new().assess(
        doc.financial.as_ref(),
        doc.tolerance.as_ref(),
        doc.prior.as_ref(),
    );

    Ok(AssessmentOutput {
        mitigation_strategies: mitigation_strategies(&scores),
        self_reported_score: doc.tolerance.as_ref().map(|t| t.self_reported_score()),
        self_reported_level: doc.tolerance.as_ref().map(|t| t.self_reported_level()),
        scores,
    })
}

pub fn allocate(input: &Path) -> Result<AllocationOutput> {
    let doc = load_profiles(input)?;
    let financial = doc.financial.as_ref();
    let tolerance = doc.tolerance.as_ref();

    let scores = RiskScoringEngine::new().assess(financial, tolerance, doc.prior.as_ref());
    let recommendation = AllocationRecommender::new()
        .recommend(financial, tolerance, &scores)
        .wrap_err("Cannot recommend an allocation")?;

    Ok(AllocationOutput {
        scores,
        recommendation,
    })
}

pub fn simulate(
    input: &Path,
    config: EngineConfig,
    seed: u64,
    include_paths: bool,
) -> Result<SimulationOutput> {
    let params: SimulationParameters = load_yaml(input)?;
    params.validate().wrap_err("Invalid simulation parameters")?;

    let mut result = MonteCarloEngine::new(config).run(&params, seed)?;
    let summary = result.summary_view();
    let risk_metrics = result.risk_metrics();
    if !include_paths {
        result.terminal_values.clear();
    }

    Ok(SimulationOutput {
        summary,
        risk_metrics,
        result,
    })
}

pub fn goal(
    input: &Path,
    config: EngineConfig,
    seed: u64,
    include_paths: bool,
) -> Result<GoalResult> {
    let params: GoalParameters = load_yaml(input)?;
    params.validate().wrap_err("Invalid goal parameters")?;

    let mut result = GoalAnalyzer::new(MonteCarloEngine::new(config)).analyze(&params, seed)?;
    if !include_paths {
        result.simulation.terminal_values.clear();
    }
    Ok(result)
}

pub fn retirement(
    input: &Path,
    config: EngineConfig,
    seed: u64,
    include_paths: bool,
) -> Result<RetirementResult> {
    let params: RetirementParameters = load_yaml(input)?;
    params.validate().wrap_err("Invalid retirement parameters")?;

    let mut result =
        RetirementAnalyzer::new(MonteCarloEngine::new(config)).analyze(&params, seed)?;
    if !include_paths {
        result.simulation.terminal_values.clear();
    }
    Ok(result)
}

pub fn goal_progress(
    input: &Path,
    today: Option<Date>,
    contribute: Option<f64>,
) -> Result<GoalProgressOutput> {
    let mut goal: FinancialGoal = load_yaml(input)?;
    if let Some(amount) = contribute {
        goal = goal.add_contribution(amount);
        tracing::info!(amount, status = ?goal.status, "Recorded contribution");
    }
    let today = today.unwrap_or_else(|| jiff::Zoned::now().date());

    Ok(GoalProgressOutput {
        progress_percentage: goal.progress_percentage(),
        remaining_amount: goal.remaining_amount(),
        days_remaining: goal.days_remaining(today),
        monthly_savings_needed: goal.monthly_savings_needed(today),
        is_on_track: goal.is_on_track(today),
        today,
        goal,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use finrisk_core::model::GoalStatus;

    use super::*;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const HOUSEHOLD: &str = r#"
financial:
  monthly_income: 5000.0
  monthly_expenses: 4000.0
  total_assets: 20000.0
  total_debt: 5000.0
  emergency_fund: 15000.0
  insurance_coverage: 50000.0
"#;

    #[test]
    fn test_assess_household() {
        let file = write_temp(HOUSEHOLD);
        let output = assess(file.path()).unwrap();

        assert_eq!(output.scores.total_risk_score, 4.7);
        assert!(output.self_reported_score.is_none());
        // Market 5.5, inflation 7 and protection 9 are above 5
        let factors: Vec<RiskFactor> = output.mitigation_strategies.keys().copied().collect();
        assert_eq!(
            factors,
            vec![RiskFactor::Market, RiskFactor::Inflation, RiskFactor::Protection]
        );
    }

    #[test]
    fn test_allocate_requires_tolerance() {
        let file = write_temp(HOUSEHOLD);
        assert!(allocate(file.path()).is_err());

        let with_tolerance = format!("{HOUSEHOLD}tolerance:\n  age: 40\n");
        let file = write_temp(&with_tolerance);
        let output = allocate(file.path()).unwrap();
        assert!(output.recommendation.allocation.is_balanced());
    }

    #[test]
    fn test_simulate_is_reproducible_and_trims_paths() {
        let file = write_temp(
            "initial_value: 10000.0\nexpected_return: 0.07\nvolatility: 0.15\ntime_horizon_years: 5\niterations: 1000\n",
        );
        let first = simulate(file.path(), EngineConfig::default(), 42, false).unwrap();
        let second = simulate(file.path(), EngineConfig::default(), 42, true).unwrap();

        assert!(first.result.terminal_values.is_empty());
        assert_eq!(second.result.terminal_values.len(), 1_000);
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.summary.iterations, 1_000);
        assert_eq!(first.risk_metrics.value_at_risk_95, first.result.var_95);
    }

    #[test]
    fn test_simulate_rejects_invalid_parameters() {
        let file = write_temp(
            "initial_value: 10000.0\nexpected_return: 0.07\nvolatility: 2.0\ntime_horizon_years: 5\n",
        );
        assert!(simulate(file.path(), EngineConfig::default(), 1, false).is_err());
    }

    #[test]
    fn test_retirement_invalid_horizon_is_an_error() {
        let file = write_temp(
            "current_age: 65\nretirement_age: 60\ncurrent_savings: 100000.0\nexpected_return: 0.05\nvolatility: 0.1\niterations: 1000\n",
        );
        let err = retirement(file.path(), EngineConfig::default(), 1, false).unwrap_err();
        assert!(err.to_string().contains("invalid retirement horizon"));
    }

    #[test]
    fn test_goal_progress_with_contribution() {
        let file = write_temp(
            "name: Emergency fund\ntarget_amount: 10000.0\ncurrent_amount: 9000.0\ncreated: 2026-01-01\ntarget_date: 2026-12-31\n",
        );
        let output = goal_progress(
            file.path(),
            Some(jiff::civil::date(2026, 6, 1)),
            Some(1_500.0),
        )
        .unwrap();

        assert_eq!(output.goal.status, GoalStatus::Completed);
        assert_eq!(output.remaining_amount, -500.0);
        assert_eq!(output.is_on_track, Some(true));
    }

    #[test]
    fn test_output_serializes_without_wrapper() {
        let file = write_temp(HOUSEHOLD);
        let output = Output::Assessment(assess(file.path()).unwrap());
        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("scores").is_some());
        assert_eq!(json["scores"]["risk_level"], "moderate");
    }
}
