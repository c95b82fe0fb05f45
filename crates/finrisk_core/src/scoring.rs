//! Multi-factor risk scoring
//!
//! Each factor maps part of a household's finances onto a 0-10 scale where
//! higher means riskier. The five sub-scores are combined with fixed weights
//! (see [`RiskFactor::weight`]) into a total that is rounded to one decimal and
//! classified as low, moderate or high.
//!
//! Scoring never fails. When the financial profile is missing, liquidity,
//! credit and protection fall back to their high-risk defaults and the factor
//! is listed in [`RiskScoreSet::fallbacks`].

use std::collections::BTreeMap;

use crate::error::ScoringError;
use crate::model::{
    FinancialProfile, InvestmentExperience, RiskFactor, RiskScoreSet, RiskTolerance,
    RiskToleranceProfile,
};

/// Score used for a factor whose financial data is missing
#[must_use]
pub const fn fallback_score(factor: RiskFactor) -> f64 {
    match factor {
        RiskFactor::Liquidity => 8.0,
        RiskFactor::Credit => 5.0,
        RiskFactor::Protection => 8.0,
        // Market and inflation always have a base score of their own
        RiskFactor::Market => 5.0,
        RiskFactor::Inflation => 6.0,
    }
}

/// Protection score when there is no income to compare coverage against
const ZERO_INCOME_PROTECTION_SCORE: f64 = 7.0;

/// Pure scoring engine. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScoringEngine;

impl RiskScoringEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Score a profile.
    ///
    /// `prior` is accepted so callers can pass the previous assessment
    /// alongside the inputs; it does not influence the result.
    #[must_use]
    pub fn assess(
        &self,
        financial: Option<&FinancialProfile>,
        tolerance: Option<&RiskToleranceProfile>,
        prior: Option<&RiskScoreSet>,
    ) -> RiskScoreSet {
        if let Some(prior) = prior {
            tracing::debug!(
                prior_total = prior.total_risk_score,
                "Reassessing profile with a previous score on record"
            );
        }

        let mut fallbacks = Vec::new();
        let mut or_fallback = |result: Result<f64, ScoringError>, factor: RiskFactor| {
            result.unwrap_or_else(|err| {
                tracing::warn!(%factor, error = %err, "Using high-risk default score");
                fallbacks.push(factor);
                fallback_score(factor)
            })
        };

        let liquidity = or_fallback(liquidity_risk(financial), RiskFactor::Liquidity);
        let credit = or_fallback(credit_risk(financial), RiskFactor::Credit);
        let market = market_risk(financial, tolerance);
        let inflation = inflation_risk(financial, tolerance);
        let protection = or_fallback(protection_risk(financial, tolerance), RiskFactor::Protection);

        let mut scores = RiskScoreSet::from_scores(liquidity, credit, market, inflation, protection);
        scores.fallbacks = fallbacks;

        tracing::debug!(
            liquidity = scores.liquidity,
            credit = scores.credit,
            market = scores.market,
            inflation = scores.inflation,
            protection = scores.protection,
            total = scores.total_risk_score,
            level = %scores.risk_level,
            "Risk assessment complete"
        );

        scores
    }
}

fn require(financial: Option<&FinancialProfile>, factor: RiskFactor) -> Result<&FinancialProfile, ScoringError> {
    financial.ok_or(ScoringError::MissingData { factor })
}

/// Emergency-fund coverage, nudged up by thin or negative cash flow
pub fn liquidity_risk(financial: Option<&FinancialProfile>) -> Result<f64, ScoringError> {
    let financial = require(financial, RiskFactor::Liquidity)?;

    let months = financial.emergency_fund_months();
    let mut score = if months >= 6.0 {
        1.0
    } else if months >= 3.0 {
        3.0
    } else if months >= 1.0 {
        6.0
    } else {
        9.0
    };

    let surplus = financial.monthly_surplus();
    if surplus < 0.0 {
        score += 1.0;
    } else if surplus < financial.monthly_expenses * 0.1 {
        score += 0.5;
    }

    Ok(f64::min(score, 10.0))
}

/// Debt-to-income bucket plus a debt-service penalty
pub fn credit_risk(financial: Option<&FinancialProfile>) -> Result<f64, ScoringError> {
    let financial = require(financial, RiskFactor::Credit)?;

    let ratio = financial.debt_to_income_ratio();
    let mut score = if ratio <= 0.20 {
        1.0
    } else if ratio <= 0.40 {
        3.0
    } else if ratio <= 0.60 {
        6.0
    } else {
        9.0
    };

    if financial.monthly_income > 0.0 && financial.total_debt / financial.annual_income() > 0.5 {
        score += 1.0;
    }

    Ok(f64::min(score, 10.0))
}

/// Stated tolerance, experience and horizon, adjusted by how large the asset
/// base is relative to income
#[must_use]
pub fn market_risk(
    financial: Option<&FinancialProfile>,
    tolerance: Option<&RiskToleranceProfile>,
) -> f64 {
    let mut score = fallback_score(RiskFactor::Market);

    if let Some(profile) = tolerance {
        score = match profile.risk_tolerance.unwrap_or_default() {
            RiskTolerance::Conservative => 3.0,
            RiskTolerance::Moderate => 5.0,
            RiskTolerance::Aggressive => 7.0,
        };

        match profile.investment_experience {
            Some(InvestmentExperience::Beginner) => score += 1.0,
            Some(InvestmentExperience::Advanced) => score -= 1.0,
            Some(InvestmentExperience::Intermediate) | None => {}
        }

        match profile.time_horizon {
            Some(years) if years < 3 => score += 1.0,
            Some(years) if years > 10 => score -= 1.0,
            _ => {}
        }
    }

    if let Some(financial) = financial {
        let asset_to_income = financial.total_assets / f64::max(financial.annual_income(), 1.0);
        if asset_to_income > 5.0 {
            score -= 0.5;
        } else if asset_to_income < 1.0 {
            score += 0.5;
        }
    }

    score.clamp(0.0, 10.0)
}

/// Cash-heavy balance sheets and older savers lose more to inflation
#[must_use]
pub fn inflation_risk(
    financial: Option<&FinancialProfile>,
    tolerance: Option<&RiskToleranceProfile>,
) -> f64 {
    let mut score = fallback_score(RiskFactor::Inflation);

    if let Some(financial) = financial {
        let cash_ratio = financial.emergency_fund / f64::max(financial.total_assets, 1.0);
        if cash_ratio > 0.5 {
            score += 1.0;
        } else if cash_ratio < 0.1 {
            score -= 1.0;
        }
    }

    if let Some(age) = tolerance.and_then(|p| p.age) {
        if age < 35 {
            score -= 1.0;
        } else if age > 55 {
            score += 1.0;
        }
    }

    score.clamp(0.0, 10.0)
}

/// Insurance coverage as a multiple of annual income
pub fn protection_risk(
    financial: Option<&FinancialProfile>,
    tolerance: Option<&RiskToleranceProfile>,
) -> Result<f64, ScoringError> {
    let financial = require(financial, RiskFactor::Protection)?;

    let annual_income = financial.annual_income();
    if annual_income == 0.0 {
        return Ok(ZERO_INCOME_PROTECTION_SCORE);
    }

    let coverage = financial.insurance_coverage / annual_income;
    let mut score = if coverage >= 10.0 {
        1.0
    } else if coverage >= 5.0 {
        3.0
    } else if coverage >= 2.0 {
        6.0
    } else {
        9.0
    };

    // Prime years for dependents
    if let Some(age) = tolerance.and_then(|p| p.age)
        && (25..=45).contains(&age)
    {
        score += 0.5;
    }

    Ok(f64::min(score, 10.0))
}

/// Concrete actions for every factor scoring above 5
#[must_use]
pub fn mitigation_strategies(scores: &RiskScoreSet) -> BTreeMap<RiskFactor, Vec<&'static str>> {
    RiskFactor::ALL
        .iter()
        .filter(|&&factor| scores.score(factor) > 5.0)
        .map(|&factor| (factor, strategies_for(factor).to_vec()))
        .collect()
}

fn strategies_for(factor: RiskFactor) -> &'static [&'static str; 4] {
    match factor {
        RiskFactor::Liquidity => &[
            "Build emergency fund to cover 3-6 months of expenses",
            "Consider high-yield savings account for emergency fund",
            "Reduce discretionary spending to improve cash flow",
            "Consider side income sources for additional cash flow",
        ],
        RiskFactor::Credit => &[
            "Focus on debt reduction, starting with highest interest rates",
            "Consider debt consolidation if beneficial",
            "Avoid taking on additional debt",
            "Improve credit score through timely payments",
        ],
        RiskFactor::Market => &[
            "Diversify investment portfolio across asset classes",
            "Consider dollar-cost averaging for regular investments",
            "Review and rebalance portfolio regularly",
            "Avoid emotional investment decisions",
        ],
        RiskFactor::Inflation => &[
            "Consider inflation-protected securities (TIPS)",
            "Invest in real assets like real estate or commodities",
            "Maintain some equity exposure for long-term growth",
            "Review and adjust investment strategy regularly",
        ],
        RiskFactor::Protection => &[
            "Review and increase life insurance coverage",
            "Consider disability insurance for income protection",
            "Ensure adequate health insurance coverage",
            "Review beneficiaries on all accounts and policies",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RiskLevel;

    fn sample_financial() -> FinancialProfile {
        FinancialProfile {
            monthly_income: 5_000.0,
            monthly_expenses: 4_000.0,
            total_assets: 20_000.0,
            total_debt: 5_000.0,
            emergency_fund: 15_000.0,
            insurance_coverage: 50_000.0,
        }
    }

    #[test]
    fn test_liquidity_buckets() {
        let mut profile = sample_financial();

        profile.emergency_fund = 24_000.0; // 6 months
        assert_eq!(liquidity_risk(Some(&profile)), Ok(1.0));

        profile.emergency_fund = 4_000.0; // 1 month
        assert_eq!(liquidity_risk(Some(&profile)), Ok(6.0));

        profile.emergency_fund = 0.0;
        assert_eq!(liquidity_risk(Some(&profile)), Ok(9.0));
    }

    #[test]
    fn test_liquidity_cash_flow_adjustments() {
        let mut profile = sample_financial();
        profile.emergency_fund = 0.0;

        // Deficit
        profile.monthly_expenses = 6_000.0;
        assert_eq!(liquidity_risk(Some(&profile)), Ok(10.0));

        // Surplus below 10% of expenses
        profile.monthly_expenses = 4_800.0;
        assert_eq!(liquidity_risk(Some(&profile)), Ok(9.5));
    }

    #[test]
    fn test_credit_debt_service_penalty() {
        let mut profile = sample_financial();

        profile.total_debt = 33_000.0; // 0.55 of annual income
        assert_eq!(credit_risk(Some(&profile)), Ok(7.0));

        profile.total_debt = 60_000.0; // 1.0
        assert_eq!(credit_risk(Some(&profile)), Ok(10.0));

        profile.total_debt = 20_000.0; // 0.33
        assert_eq!(credit_risk(Some(&profile)), Ok(3.0));
    }

    #[test]
    fn test_credit_zero_income_is_lowest_bucket() {
        let profile = FinancialProfile {
            total_debt: 100_000.0,
            ..Default::default()
        };
        assert_eq!(credit_risk(Some(&profile)), Ok(1.0));
    }

    #[test]
    fn test_market_with_tolerance_profile() {
        let profile = RiskToleranceProfile {
            risk_tolerance: Some(RiskTolerance::Aggressive),
            investment_experience: Some(InvestmentExperience::Beginner),
            time_horizon: Some(2),
            ..Default::default()
        };
        // 7 + 1 + 1 + 0.5 (assets below one year of income)
        assert_eq!(market_risk(Some(&sample_financial()), Some(&profile)), 9.5);

        let seasoned = RiskToleranceProfile {
            risk_tolerance: Some(RiskTolerance::Conservative),
            investment_experience: Some(InvestmentExperience::Advanced),
            time_horizon: Some(25),
            ..Default::default()
        };
        let wealthy = FinancialProfile {
            total_assets: 400_000.0,
            ..sample_financial()
        };
        // 3 - 1 - 1 - 0.5
        assert_eq!(market_risk(Some(&wealthy), Some(&seasoned)), 0.5);
    }

    #[test]
    fn test_market_unspecified_tolerance_defaults_to_moderate() {
        let profile = RiskToleranceProfile::default();
        assert_eq!(market_risk(None, Some(&profile)), 5.0);
        assert_eq!(market_risk(None, None), 5.0);
    }

    #[test]
    fn test_inflation_age_adjustment() {
        let young = RiskToleranceProfile {
            age: Some(28),
            ..Default::default()
        };
        let older = RiskToleranceProfile {
            age: Some(60),
            ..Default::default()
        };
        let financial = sample_financial(); // cash ratio 0.75

        assert_eq!(inflation_risk(Some(&financial), Some(&young)), 6.0);
        assert_eq!(inflation_risk(Some(&financial), Some(&older)), 8.0);
        assert_eq!(inflation_risk(None, None), 6.0);
    }

    #[test]
    fn test_protection_buckets_and_age() {
        let mut financial = sample_financial();
        let mid_career = RiskToleranceProfile {
            age: Some(40),
            ..Default::default()
        };

        financial.insurance_coverage = 600_000.0; // 10x
        assert_eq!(protection_risk(Some(&financial), None), Ok(1.0));
        assert_eq!(protection_risk(Some(&financial), Some(&mid_career)), Ok(1.5));

        financial.insurance_coverage = 150_000.0; // 2.5x
        assert_eq!(protection_risk(Some(&financial), None), Ok(6.0));
    }

    #[test]
    fn test_protection_zero_income() {
        let financial = FinancialProfile {
            insurance_coverage: 1_000_000.0,
            ..Default::default()
        };
        assert_eq!(protection_risk(Some(&financial), None), Ok(7.0));
    }

    #[test]
    fn test_missing_financial_profile_uses_defaults() {
        let scores = RiskScoringEngine::new().assess(None, None, None);

        assert_eq!(scores.liquidity, 8.0);
        assert_eq!(scores.credit, 5.0);
        assert_eq!(scores.market, 5.0);
        assert_eq!(scores.inflation, 6.0);
        assert_eq!(scores.protection, 8.0);
        assert_eq!(
            scores.fallbacks,
            vec![
                RiskFactor::Liquidity,
                RiskFactor::Credit,
                RiskFactor::Protection
            ]
        );
        // 2.0 + 1.0 + 1.25 + 0.9 + 1.2
        assert_eq!(scores.total_risk_score, 6.4);
        assert_eq!(scores.risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn test_prior_assessment_does_not_change_scores() {
        let engine = RiskScoringEngine::new();
        let financial = sample_financial();
        let first = engine.assess(Some(&financial), None, None);
        let second = engine.assess(Some(&financial), None, Some(&first));
        assert_eq!(first, second);
    }

    #[test]
    fn test_mitigation_strategies_threshold() {
        let scores = RiskScoreSet::from_scores(5.0, 5.5, 1.0, 9.0, 2.0);
        let strategies = mitigation_strategies(&scores);

        assert_eq!(
            strategies.keys().copied().collect::<Vec<_>>(),
            vec![RiskFactor::Credit, RiskFactor::Inflation]
        );
        assert_eq!(strategies[&RiskFactor::Credit].len(), 4);
    }
}
