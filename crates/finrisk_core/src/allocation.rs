//! Asset allocation recommender
//!
//! Starts from a base table for the assessed risk level, blends it with the
//! "bonds equal age" rule of thumb, applies targeted nudges for high liquidity
//! and inflation risk, then renormalizes so the buckets sum to 100.

use std::collections::BTreeMap;

use crate::error::ScoringError;
use crate::model::{
    AllocationPlan, AllocationRecommendation, AssetClass, FinancialProfile, RiskLevel,
    RiskScoreSet, RiskToleranceProfile, round_to_tenth,
};

/// Sub-score above which a factor triggers its allocation rule
const NUDGE_THRESHOLD: f64 = 7.0;

/// Cap on the age used for the bond target
const MAX_BOND_TARGET: u8 = 70;

/// Stocks, bonds, cash, real estate for a risk level
#[must_use]
pub fn base_allocation(level: RiskLevel) -> BTreeMap<AssetClass, f64> {
    let (stocks, bonds, cash, real_estate) = match level {
        RiskLevel::Low => (30.0, 50.0, 15.0, 5.0),
        RiskLevel::Moderate => (60.0, 30.0, 5.0, 5.0),
        RiskLevel::High => (80.0, 15.0, 3.0, 2.0),
    };
    BTreeMap::from([
        (AssetClass::Stocks, stocks),
        (AssetClass::Bonds, bonds),
        (AssetClass::Cash, cash),
        (AssetClass::RealEstate, real_estate),
    ])
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationRecommender;

impl AllocationRecommender {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Recommend a target allocation.
    ///
    /// Both profiles must be present; the financial profile is only used
    /// through `scores`, but a recommendation without it would rest on
    /// fallback scores.
    pub fn recommend(
        &self,
        financial: Option<&FinancialProfile>,
        tolerance: Option<&RiskToleranceProfile>,
        scores: &RiskScoreSet,
    ) -> Result<AllocationRecommendation, ScoringError> {
        if financial.is_none() {
            return Err(ScoringError::InsufficientData {
                reason: "financial profile required",
            });
        }
        let tolerance = tolerance.ok_or(ScoringError::InsufficientData {
            reason: "risk tolerance profile required",
        })?;

        let mut weights = base_allocation(scores.risk_level);

        if let Some(age) = tolerance.age {
            let bond_target = f64::from(age.min(MAX_BOND_TARGET));
            let stock_target = 100.0 - bond_target;
            adjust(&mut weights, AssetClass::Bonds, |bonds| (bonds + bond_target) / 2.0);
            adjust(&mut weights, AssetClass::Stocks, |stocks| (stocks + stock_target) / 2.0);
        }

        let liquidity_nudge = scores.liquidity > NUDGE_THRESHOLD;
        if liquidity_nudge {
            adjust(&mut weights, AssetClass::Cash, |v| v + 5.0);
            adjust(&mut weights, AssetClass::Stocks, |v| v - 3.0);
            adjust(&mut weights, AssetClass::Bonds, |v| v - 2.0);
        }

        let inflation_nudge = scores.inflation > NUDGE_THRESHOLD;
        if inflation_nudge {
            adjust(&mut weights, AssetClass::RealEstate, |v| v + 3.0);
            adjust(&mut weights, AssetClass::Stocks, |v| v + 2.0);
            adjust(&mut weights, AssetClass::Cash, |v| v - 3.0);
            adjust(&mut weights, AssetClass::Bonds, |v| v - 2.0);
        }

        let allocation = normalize(weights);

        let mut rationale = Vec::new();
        rationale.push(
            match scores.risk_level {
                RiskLevel::Low => {
                    "Conservative allocation recommended due to low overall risk tolerance"
                }
                RiskLevel::Moderate => "Balanced allocation recommended for moderate risk profile",
                RiskLevel::High => "Growth-oriented allocation suitable for higher risk tolerance",
            }
            .to_string(),
        );
        if liquidity_nudge {
            rationale.push(format!(
                "Increased cash allocation ({:.1}%) to address liquidity concerns",
                allocation.get(AssetClass::Cash)
            ));
        }
        if scores.credit > NUDGE_THRESHOLD {
            rationale.push("Conservative approach recommended due to high debt levels".to_string());
        }
        if inflation_nudge {
            rationale.push(
                "Increased equity and real estate allocation to combat inflation risk".to_string(),
            );
        }
        if scores.protection > NUDGE_THRESHOLD {
            rationale
                .push("Consider increasing insurance coverage before aggressive investing".to_string());
        }

        tracing::debug!(
            level = %scores.risk_level,
            stocks = allocation.get(AssetClass::Stocks),
            bonds = allocation.get(AssetClass::Bonds),
            cash = allocation.get(AssetClass::Cash),
            real_estate = allocation.get(AssetClass::RealEstate),
            "Allocation recommended"
        );

        Ok(AllocationRecommendation {
            allocation,
            risk_level: scores.risk_level,
            total_risk_score: scores.total_risk_score,
            rationale,
        })
    }
}

fn adjust(weights: &mut BTreeMap<AssetClass, f64>, class: AssetClass, f: impl FnOnce(f64) -> f64) {
    let entry = weights.entry(class).or_insert(0.0);
    *entry = f(*entry);
}

/// Scale buckets proportionally to 100, round each to one decimal and hand
/// any rounding residual to the largest bucket
#[must_use]
pub fn normalize(weights: BTreeMap<AssetClass, f64>) -> AllocationPlan {
    let weights: BTreeMap<AssetClass, f64> = weights
        .into_iter()
        .map(|(class, pct)| (class, pct.max(0.0)))
        .collect();
    let total: f64 = weights.values().sum();
    if total <= 0.0 {
        return AllocationPlan::new(weights);
    }

    let mut normalized: BTreeMap<AssetClass, f64> = weights
        .into_iter()
        .map(|(class, pct)| (class, round_to_tenth(pct / total * 100.0)))
        .collect();

    let residual = round_to_tenth(100.0 - normalized.values().sum::<f64>());
    if residual != 0.0 {
        let largest = normalized
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(class, _)| *class);
        if let Some(class) = largest {
            adjust(&mut normalized, class, |v| round_to_tenth(v + residual));
        }
    }

    AllocationPlan::new(normalized)
}
