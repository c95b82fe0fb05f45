//! Descriptive statistics over terminal-value distributions
//!
//! Everything here is a pure function over slices so the engine and the
//! analyzers can share it. Functions taking `sorted` expect ascending order;
//! use [`sorted_copy`] to obtain one.

use crate::model::{PercentileTable, SummaryStatistics};

/// Ascending copy of `values`, NaN sorted last
#[must_use]
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Linear-interpolated percentile of an ascending slice.
///
/// `rank` is in `[0, 100]`. The position is `rank / 100 * (n - 1)` and the
/// value is interpolated between its two neighbours, then clamped to them so
/// floating-point error can never break monotonicity across ranks.
#[must_use]
pub fn percentile(sorted: &[f64], rank: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted[0];
    }

    let pos = (rank.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let (a, b) = (sorted[lo], sorted[hi]);
    if lo == hi {
        return a;
    }
    let frac = pos - lo as f64;
    (a + (b - a) * frac).clamp(a, b)
}

#[must_use]
pub fn percentile_table(sorted: &[f64], ranks: &[u8]) -> PercentileTable {
    PercentileTable {
        entries: ranks
            .iter()
            .map(|&rank| (rank, percentile(sorted, f64::from(rank))))
            .collect(),
    }
}

#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation
#[must_use]
pub fn std_dev(values: &[f64]) -> f64 {
    central_moment(values, mean(values), 2).sqrt()
}

fn central_moment(values: &[f64], mean: f64, order: i32) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(order)).sum::<f64>() / values.len() as f64
}

/// Moments and extremes of a distribution.
///
/// Skewness is the biased estimator `m3 / m2^1.5` and kurtosis is excess
/// kurtosis `m4 / m2^2 - 3`; both are 0 for a constant sample.
#[must_use]
pub fn summarize(sorted: &[f64]) -> SummaryStatistics {
    if sorted.is_empty() {
        return SummaryStatistics::default();
    }

    let mean = mean(sorted);
    let m2 = central_moment(sorted, mean, 2);
    let (skewness, kurtosis) = if m2 > 0.0 {
        let m3 = central_moment(sorted, mean, 3);
        let m4 = central_moment(sorted, mean, 4);
        (m3 / m2.powf(1.5), m4 / (m2 * m2) - 3.0)
    } else {
        (0.0, 0.0)
    };

    SummaryStatistics {
        mean,
        median: percentile(sorted, 50.0),
        std_dev: m2.sqrt(),
        skewness,
        kurtosis,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
    }
}

/// Mean of the values at or below `threshold`, 0 when there are none
#[must_use]
pub fn expected_shortfall(values: &[f64], threshold: f64) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|&&v| v <= threshold)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

/// Percentage of values satisfying `predicate`
#[must_use]
pub fn share_percent(values: &[f64], predicate: impl Fn(f64) -> bool) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let hits = values.iter().filter(|&&v| predicate(v)).count();
    hits as f64 / values.len() as f64 * 100.0
}

/// Largest peak-to-trough decline along a path, as a percentage.
///
/// Peaks at or below zero are skipped since a relative decline from them is
/// undefined.
#[must_use]
pub fn max_drawdown(path: &[f64]) -> f64 {
    let Some(&first) = path.first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_drawdown = 0.0;

    for &value in path {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let drawdown = (peak - value) / peak;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }
    }

    max_drawdown * 100.0
}

/// Sharpe ratio of the per-path annualized returns.
///
/// Each path's return is `(terminal / initial)^(1 / years) - 1`, with the
/// growth ratio floored at zero so wiped-out paths count as -100%. Returns 0
/// when the inputs leave the ratio undefined or the returns do not vary.
#[must_use]
pub fn sharpe_ratio(terminal_values: &[f64], initial: f64, years: u32, risk_free_rate: f64) -> f64 {
    if initial <= 0.0 || years == 0 || terminal_values.is_empty() {
        return 0.0;
    }

    let exponent = 1.0 / f64::from(years);
    let returns: Vec<f64> = terminal_values
        .iter()
        .map(|&v| (v / initial).max(0.0).powf(exponent) - 1.0)
        .collect();

    let volatility = std_dev(&returns);
    if volatility == 0.0 || !volatility.is_finite() {
        return 0.0;
    }
    (mean(&returns) - risk_free_rate) / volatility
}
