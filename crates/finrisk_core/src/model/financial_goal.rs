//! Savings goal progress tracking

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Average days per month used to convert a day count into months
const AVG_DAYS_PER_MONTH: f64 = 30.44;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Paused,
}

/// A named savings target and how far along it is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub created: Date,
    #[serde(default)]
    pub target_date: Option<Date>,
    #[serde(default)]
    pub priority: GoalPriority,
    #[serde(default)]
    pub status: GoalStatus,
}

impl FinancialGoal {
    #[must_use]
    pub fn progress_percentage(&self) -> f64 {
        if self.target_amount == 0.0 {
            return 0.0;
        }
        self.current_amount / self.target_amount * 100.0
    }

    #[must_use]
    pub fn remaining_amount(&self) -> f64 {
        self.target_amount - self.current_amount
    }

    /// Days left until the target date, 0 once it has passed
    #[must_use]
    pub fn days_remaining(&self, today: Date) -> Option<i32> {
        let target = self.target_date?;
        if target <= today {
            return Some(0);
        }
        Some((target - today).get_days())
    }

    /// Monthly saving that closes the remaining gap by the target date
    #[must_use]
    pub fn monthly_savings_needed(&self, today: Date) -> Option<f64> {
        let days = self.days_remaining(today)?;
        if days <= 0 {
            return None;
        }
        let months = f64::from(days) / AVG_DAYS_PER_MONTH;
        Some(self.remaining_amount() / months)
    }

    /// Progress is on track when it reaches 90% of the elapsed share of the
    /// goal's lifetime
    #[must_use]
    pub fn is_on_track(&self, today: Date) -> Option<bool> {
        let target = self.target_date?;
        let days_remaining = self.days_remaining(today)?;
        let total_days = (target - self.created).get_days();
        if total_days <= 0 {
            return Some(false);
        }
        let elapsed = f64::from(total_days - days_remaining) / f64::from(total_days) * 100.0;
        Some(self.progress_percentage() >= elapsed * 0.9)
    }

    /// New goal with `amount` added to the current balance
    #[must_use]
    pub fn add_contribution(&self, amount: f64) -> Self {
        let current_amount = self.current_amount + amount;
        let status = if current_amount >= self.target_amount {
            GoalStatus::Completed
        } else {
            self.status
        };
        Self {
            current_amount,
            status,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house_deposit() -> FinancialGoal {
        FinancialGoal {
            name: "House deposit".to_string(),
            target_amount: 40_000.0,
            current_amount: 10_000.0,
            created: jiff::civil::date(2025, 1, 1),
            target_date: Some(jiff::civil::date(2027, 1, 1)),
            priority: GoalPriority::High,
            status: GoalStatus::Active,
        }
    }

    #[test]
    fn test_progress_and_remaining() {
        let goal = house_deposit();
        assert_eq!(goal.progress_percentage(), 25.0);
        assert_eq!(goal.remaining_amount(), 30_000.0);
    }

    #[test]
    fn test_days_remaining() {
        let goal = house_deposit();
        assert_eq!(goal.days_remaining(jiff::civil::date(2026, 12, 1)), Some(31));
        assert_eq!(goal.days_remaining(jiff::civil::date(2027, 6, 1)), Some(0));

        let open_ended = FinancialGoal {
            target_date: None,
            ..house_deposit()
        };
        assert_eq!(open_ended.days_remaining(jiff::civil::date(2026, 1, 1)), None);
        assert_eq!(
            open_ended.monthly_savings_needed(jiff::civil::date(2026, 1, 1)),
            None
        );
    }

    #[test]
    fn test_monthly_savings_needed() {
        let goal = house_deposit();
        let today = jiff::civil::date(2026, 12, 1);
        let needed = goal.monthly_savings_needed(today).unwrap();
        let expected = 30_000.0 / (31.0 / AVG_DAYS_PER_MONTH);
        assert!((needed - expected).abs() < 1e-9);

        // Past the deadline there is no meaningful monthly figure
        assert_eq!(
            goal.monthly_savings_needed(jiff::civil::date(2027, 2, 1)),
            None
        );
    }

    #[test]
    fn test_is_on_track() {
        let goal = house_deposit();
        // Created 2025-01-01, due 2027-01-01: a quarter of the way in on 2025-07-02
        assert_eq!(goal.is_on_track(jiff::civil::date(2025, 7, 2)), Some(true));
        // Halfway through time with 25% progress is behind
        assert_eq!(goal.is_on_track(jiff::civil::date(2026, 1, 1)), Some(false));
    }

    #[test]
    fn test_add_contribution_completes_goal() {
        let goal = house_deposit();

        let partial = goal.add_contribution(5_000.0);
        assert_eq!(partial.current_amount, 15_000.0);
        assert_eq!(partial.status, GoalStatus::Active);

        let done = goal.add_contribution(30_000.0);
        assert_eq!(done.status, GoalStatus::Completed);
        // The original is untouched
        assert_eq!(goal.current_amount, 10_000.0);
    }
}
