//! Target asset allocation

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::scores::RiskLevel;

/// Tolerance allowed on the sum of an allocation after rounding
pub const ALLOCATION_SUM_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Stocks,
    Bonds,
    Cash,
    RealEstate,
}

impl AssetClass {
    pub const ALL: [AssetClass; 4] = [
        AssetClass::Stocks,
        AssetClass::Bonds,
        AssetClass::Cash,
        AssetClass::RealEstate,
    ];
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetClass::Stocks => f.write_str("stocks"),
            AssetClass::Bonds => f.write_str("bonds"),
            AssetClass::Cash => f.write_str("cash"),
            AssetClass::RealEstate => f.write_str("real_estate"),
        }
    }
}

/// Asset class to percentage of the portfolio. Percentages sum to 100.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationPlan {
    weights: BTreeMap<AssetClass, f64>,
}

impl AllocationPlan {
    #[must_use]
    pub fn new(weights: BTreeMap<AssetClass, f64>) -> Self {
        Self { weights }
    }

    /// Percentage held in `class`, 0 if the class is absent
    #[must_use]
    pub fn get(&self, class: AssetClass) -> f64 {
        self.weights.get(&class).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, f64)> + '_ {
        self.weights.iter().map(|(&class, &pct)| (class, pct))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Whether the percentages sum to 100 within the rounding tolerance
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        (self.total() - 100.0).abs() <= ALLOCATION_SUM_TOLERANCE
    }
}

/// Allocation plus the reasons behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecommendation {
    pub allocation: AllocationPlan,
    pub risk_level: RiskLevel,
    pub total_risk_score: f64,
    /// One sentence per triggered rule, in rule order
    pub rationale: Vec<String>,
}
