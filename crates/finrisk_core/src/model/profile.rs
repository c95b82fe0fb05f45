//! Input records describing a household's finances and attitude to risk

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::scores::RiskLevel;

/// Snapshot of a household's monthly cash flow and balance sheet.
///
/// All amounts are non-negative currency values. Derived ratios return 0
/// instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    #[serde(default)]
    pub total_assets: f64,
    #[serde(default)]
    pub total_debt: f64,
    #[serde(default)]
    pub emergency_fund: f64,
    #[serde(default)]
    pub insurance_coverage: f64,
}

impl FinancialProfile {
    #[must_use]
    pub fn monthly_surplus(&self) -> f64 {
        self.monthly_income - self.monthly_expenses
    }

    #[must_use]
    pub fn net_worth(&self) -> f64 {
        self.total_assets - self.total_debt
    }

    #[must_use]
    pub fn annual_income(&self) -> f64 {
        self.monthly_income * 12.0
    }

    /// Total debt over annual income
    #[must_use]
    pub fn debt_to_income_ratio(&self) -> f64 {
        if self.monthly_income == 0.0 {
            return 0.0;
        }
        self.total_debt / self.annual_income()
    }

    /// Months of expenses the emergency fund covers
    #[must_use]
    pub fn emergency_fund_months(&self) -> f64 {
        if self.monthly_expenses == 0.0 {
            return 0.0;
        }
        self.emergency_fund / self.monthly_expenses
    }

    /// Share of income left after expenses
    #[must_use]
    pub fn savings_rate(&self) -> f64 {
        if self.monthly_income == 0.0 {
            return 0.0;
        }
        self.monthly_surplus() / self.monthly_income
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_non_negative("monthly_income", self.monthly_income)?;
        ValidationError::check_non_negative("monthly_expenses", self.monthly_expenses)?;
        ValidationError::check_non_negative("total_assets", self.total_assets)?;
        ValidationError::check_non_negative("total_debt", self.total_debt)?;
        ValidationError::check_non_negative("emergency_fund", self.emergency_fund)?;
        ValidationError::check_non_negative("insurance_coverage", self.insurance_coverage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentExperience {
    Beginner,
    Intermediate,
    Advanced,
}

/// Self-reported attitude to risk. Every field is optional; absent fields
/// simply skip their adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskToleranceProfile {
    pub risk_tolerance: Option<RiskTolerance>,
    pub investment_experience: Option<InvestmentExperience>,
    /// Investment horizon in years (1-50)
    pub time_horizon: Option<u8>,
    /// Age in years (18-100)
    pub age: Option<u8>,
    /// Free text, never scored
    pub employment_status: Option<String>,
}

impl RiskToleranceProfile {
    /// Questionnaire-style capacity score (0-10, higher means more appetite
    /// for risk). Informational only; the weighted risk model does not use it.
    #[must_use]
    pub fn self_reported_score(&self) -> u8 {
        let mut score = 0u8;

        score += match self.risk_tolerance {
            Some(RiskTolerance::Conservative) => 1,
            Some(RiskTolerance::Moderate) => 2,
            Some(RiskTolerance::Aggressive) => 3,
            None => 0,
        };

        score += match self.investment_experience {
            Some(InvestmentExperience::Beginner) => 1,
            Some(InvestmentExperience::Intermediate) => 2,
            Some(InvestmentExperience::Advanced) => 3,
            None => 0,
        };

        score += match self.time_horizon {
            Some(years) if years <= 3 => 1,
            Some(years) if years <= 10 => 2,
            Some(_) => 3,
            None => 0,
        };

        score += match self.age {
            Some(age) if age >= 60 => 1,
            Some(age) if age >= 40 => 2,
            Some(_) => 3,
            None => 0,
        };

        score.min(10)
    }

    #[must_use]
    pub fn self_reported_level(&self) -> RiskLevel {
        RiskLevel::from_score(f64::from(self.self_reported_score()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(years) = self.time_horizon {
            ValidationError::check_range("time_horizon", f64::from(years), 1.0, 50.0)?;
        }
        if let Some(age) = self.age {
            ValidationError::check_range("age", f64::from(age), 18.0, 100.0)?;
        }
        Ok(())
    }
}
