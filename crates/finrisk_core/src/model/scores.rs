//! Risk sub-scores, their weights and the derived risk level

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound of every sub-score and of the weighted total
pub const MAX_SCORE: f64 = 10.0;

/// The five risk dimensions of the weighted model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Liquidity,
    Credit,
    Market,
    Inflation,
    Protection,
}

impl RiskFactor {
    pub const ALL: [RiskFactor; 5] = [
        RiskFactor::Liquidity,
        RiskFactor::Credit,
        RiskFactor::Market,
        RiskFactor::Inflation,
        RiskFactor::Protection,
    ];

    /// Fixed weight in the total score. The weights sum to exactly 1.0.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            RiskFactor::Liquidity => 0.25,
            RiskFactor::Credit => 0.20,
            RiskFactor::Market => 0.25,
            RiskFactor::Inflation => 0.15,
            RiskFactor::Protection => 0.15,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            RiskFactor::Liquidity => "liquidity",
            RiskFactor::Credit => "credit",
            RiskFactor::Market => "market",
            RiskFactor::Inflation => "inflation",
            RiskFactor::Protection => "protection",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            RiskFactor::Liquidity => "Risk of not having enough liquid assets for emergencies",
            RiskFactor::Credit => "Risk related to debt levels and creditworthiness",
            RiskFactor::Market => "Risk from market volatility and investment losses",
            RiskFactor::Inflation => "Risk of purchasing power erosion due to inflation",
            RiskFactor::Protection => "Risk from inadequate insurance coverage",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse classification of a 0-10 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// `<= 3` is low, `<= 7` moderate, anything above is high
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score <= 3.0 {
            RiskLevel::Low
        } else if score <= 7.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => f.write_str("low"),
            RiskLevel::Moderate => f.write_str("moderate"),
            RiskLevel::High => f.write_str("high"),
        }
    }
}

/// One row of the explainability breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub factor: RiskFactor,
    pub score: f64,
    pub weight: f64,
    pub weighted_score: f64,
    pub description: String,
}

/// Output of the risk scoring engine.
///
/// Sub-scores are clamped to `[0, 10]`; `total_risk_score` is the weighted sum
/// rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreSet {
    pub liquidity: f64,
    pub credit: f64,
    pub market: f64,
    pub inflation: f64,
    pub protection: f64,
    pub total_risk_score: f64,
    pub risk_level: RiskLevel,
    pub breakdown: Vec<FactorBreakdown>,
    pub recommendations: Vec<String>,
    /// Factors that used their high-risk default because data was missing
    #[serde(default)]
    pub fallbacks: Vec<RiskFactor>,
}

impl RiskScoreSet {
    /// Build a score set from raw sub-scores, clamping each one and deriving
    /// the total, level, breakdown and recommendations.
    #[must_use]
    pub fn from_scores(
        liquidity: f64,
        credit: f64,
        market: f64,
        inflation: f64,
        protection: f64,
    ) -> Self {
        let mut set = Self {
            liquidity: clamp_score(liquidity),
            credit: clamp_score(credit),
            market: clamp_score(market),
            inflation: clamp_score(inflation),
            protection: clamp_score(protection),
            total_risk_score: 0.0,
            risk_level: RiskLevel::Low,
            breakdown: Vec::new(),
            recommendations: Vec::new(),
            fallbacks: Vec::new(),
        };

        set.total_risk_score = round_to_tenth(set.weighted_sum());
        set.risk_level = RiskLevel::from_score(set.total_risk_score);
        set.breakdown = set.build_breakdown();
        set.recommendations = set.build_recommendations();
        set
    }

    #[must_use]
    pub fn score(&self, factor: RiskFactor) -> f64 {
        match factor {
            RiskFactor::Liquidity => self.liquidity,
            RiskFactor::Credit => self.credit,
            RiskFactor::Market => self.market,
            RiskFactor::Inflation => self.inflation,
            RiskFactor::Protection => self.protection,
        }
    }

    /// Unrounded sum of sub-score times weight
    #[must_use]
    pub fn weighted_sum(&self) -> f64 {
        RiskFactor::ALL
            .iter()
            .map(|&factor| self.score(factor) * factor.weight())
            .sum()
    }

    fn build_breakdown(&self) -> Vec<FactorBreakdown> {
        RiskFactor::ALL
            .iter()
            .map(|&factor| {
                let score = self.score(factor);
                FactorBreakdown {
                    factor,
                    score,
                    weight: factor.weight(),
                    weighted_score: score * factor.weight(),
                    description: factor.description().to_string(),
                }
            })
            .collect()
    }

    fn build_recommendations(&self) -> Vec<String> {
        RiskFactor::ALL
            .iter()
            .filter(|&&factor| self.score(factor) > 6.0)
            .map(|&factor| {
                match factor {
                    RiskFactor::Liquidity => "Build emergency fund to cover 3-6 months of expenses",
                    RiskFactor::Credit => "Reduce debt levels and improve debt-to-income ratio",
                    RiskFactor::Market => "Diversify investments and consider lower-risk assets",
                    RiskFactor::Inflation => "Consider inflation-protected investments",
                    RiskFactor::Protection => "Review and increase insurance coverage",
                }
                .to_string()
            })
            .collect()
    }
}

#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return MAX_SCORE;
    }
    score.clamp(0.0, MAX_SCORE)
}

/// Round half away from zero to one decimal place
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = RiskFactor::ALL.iter().map(|f| f.weight()).sum();
        assert_eq!(sum, 1.0);
    }

    #[test]
    fn test_risk_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(3.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(3.1), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(7.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(7.1), RiskLevel::High);
    }

    #[test]
    fn test_from_scores_clamps_and_totals() {
        let set = RiskScoreSet::from_scores(12.0, -3.0, 5.0, 5.0, 5.0);
        assert_eq!(set.liquidity, 10.0);
        assert_eq!(set.credit, 0.0);
        // 2.5 + 0 + 1.25 + 0.75 + 0.75
        assert_eq!(set.total_risk_score, 5.3);
        assert_eq!(set.risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn test_breakdown_and_recommendations() {
        let set = RiskScoreSet::from_scores(9.0, 1.0, 6.5, 6.0, 7.0);

        assert_eq!(set.breakdown.len(), 5);
        let liquidity = &set.breakdown[0];
        assert_eq!(liquidity.factor, RiskFactor::Liquidity);
        assert_eq!(liquidity.weight, 0.25);
        assert_eq!(liquidity.weighted_score, 2.25);

        // Only scores strictly above 6 produce a recommendation, in factor order
        assert_eq!(
            set.recommendations,
            vec![
                "Build emergency fund to cover 3-6 months of expenses".to_string(),
                "Diversify investments and consider lower-risk assets".to_string(),
                "Review and increase insurance coverage".to_string(),
            ]
        );
    }

    #[test]
    fn test_serialized_level_is_lowercase() {
        let json = serde_json::to_string(&RiskLevel::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");
    }
}
