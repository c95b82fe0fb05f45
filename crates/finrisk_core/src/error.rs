use crate::model::RiskFactor;

/// Errors raised while scoring a profile or recommending an allocation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    /// The financial profile needed by a sub-score is absent.
    ///
    /// The scoring engine never aborts on this; it substitutes the factor's
    /// high-risk default and records the factor in `RiskScoreSet::fallbacks`.
    #[error("missing financial data for {factor} risk")]
    MissingData { factor: RiskFactor },

    #[error("insufficient data for recommendation: {reason}")]
    InsufficientData { reason: &'static str },
}

/// Errors raised by the Monte Carlo engine and the analyzers built on it
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid retirement horizon: retirement age {retirement_age} must exceed current age {current_age}")]
    InvalidHorizon { current_age: u8, retirement_age: u8 },

    #[error("invalid return distribution (mean={mean}, std_dev={std_dev}): std_dev must be non-negative and finite")]
    InvalidDistribution { mean: f64, std_dev: f64 },

    /// Parameters that would leave the terminal distribution empty or the
    /// horizon undefined.
    #[error("degenerate simulation parameters: {0}")]
    DegenerateParameters(String),
}

/// Range violations reported by the `validate()` helpers on input records
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

impl ValidationError {
    /// Check that `value` is finite and lies in `[min, max]`
    pub(crate) fn check_range(
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if value < min || value > max {
            return Err(ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
        Ok(())
    }

    pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
        Self::check_range(field, value, 0.0, f64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range() {
        assert!(ValidationError::check_range("x", 0.5, 0.0, 1.0).is_ok());
        assert!(ValidationError::check_range("x", 0.0, 0.0, 1.0).is_ok());
        assert_eq!(
            ValidationError::check_range("x", 1.5, 0.0, 1.0),
            Err(ValidationError::OutOfRange {
                field: "x",
                value: 1.5,
                min: 0.0,
                max: 1.0,
            })
        );
        assert_eq!(
            ValidationError::check_non_negative("y", f64::NAN),
            Err(ValidationError::NotFinite { field: "y" })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = SimulationError::InvalidHorizon {
            current_age: 65,
            retirement_age: 60,
        };
        assert_eq!(
            err.to_string(),
            "invalid retirement horizon: retirement age 60 must exceed current age 65"
        );

        let err = ScoringError::MissingData {
            factor: RiskFactor::Liquidity,
        };
        assert_eq!(err.to_string(), "missing financial data for liquidity risk");
    }
}
