mod allocation;
mod financial_goal;
mod goal;
mod profile;
mod retirement;
mod scores;
mod simulation;

pub use allocation::{
    ALLOCATION_SUM_TOLERANCE, AllocationPlan, AllocationRecommendation, AssetClass,
};
pub use financial_goal::{FinancialGoal, GoalPriority, GoalStatus};
pub use goal::{ContributionSensitivity, GoalParameters, GoalResult, ProbabilityRanges};
pub use profile::{FinancialProfile, InvestmentExperience, RiskTolerance, RiskToleranceProfile};
pub use retirement::{
    REAL_PERCENTILE_RANKS, RetirementParameters, RetirementResult, WITHDRAWAL_RATES,
    WithdrawalRow,
};
pub use scores::{
    FactorBreakdown, MAX_SCORE, RiskFactor, RiskLevel, RiskScoreSet, clamp_score, round_to_tenth,
};
pub use simulation::{
    PERCENTILE_RANKS, PercentileTable, RiskMetrics, SimulationParameters, SimulationResult,
    SimulationSummary, SummaryStatistics,
};
