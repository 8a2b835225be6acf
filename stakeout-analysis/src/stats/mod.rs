//! Shared distributional statistics.
//!
//! Entropy/concentration, chi-square goodness-of-fit against a uniform null,
//! and the two-sided normal tail. Every function resolves numeric edge cases
//! to a deterministic fallback instead of failing: degenerate inputs produce
//! the documented neutral value, never a NaN or a panic.

use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

use stakeout_core::constants::{
    CHI_SQUARE_EXPECTED_FLOOR, CHI_SQUARE_MIN_TOTAL, SIGNIFICANCE_ALPHA,
};

/// Outcome of a chi-square goodness-of-fit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignificanceTest {
    pub chi2: f64,
    pub p_value: f64,
    pub is_significant: bool,
}

impl SignificanceTest {
    /// The not-significant default used when a test cannot run.
    pub fn not_significant() -> Self {
        Self {
            chi2: 0.0,
            p_value: 1.0,
            is_significant: false,
        }
    }
}

/// Base-2 Shannon entropy of a probability distribution.
///
/// Zero-probability bins are excluded before the log computation.
pub fn entropy(distribution: &[f64]) -> f64 {
    distribution
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum()
}

/// Concentration score: 1 minus normalized entropy.
///
/// 0 for a uniform distribution, 1 for a one-hot distribution. Returns 1.0
/// when the category count admits no entropy at all.
pub fn concentration(distribution: &[f64], categories: usize) -> f64 {
    let max_entropy = (categories as f64).log2();
    if max_entropy == 0.0 {
        return 1.0;
    }
    1.0 - entropy(distribution) / max_entropy
}

/// Chi-square goodness-of-fit of observed counts against a uniform null
/// with the same total.
///
/// Skipped (not significant, chi2 = 0, p = 1) below 5 total observations,
/// where the test is statistically meaningless. Expected counts are floored
/// at 0.1 inside the statistic.
pub fn test_temporal_significance(observed: &[f64]) -> SignificanceTest {
    let total: f64 = observed.iter().sum();
    if total < CHI_SQUARE_MIN_TOTAL {
        return SignificanceTest::not_significant();
    }

    let categories = observed.len();
    let expected = (total / categories as f64).max(CHI_SQUARE_EXPECTED_FLOOR);
    let chi2: f64 = observed
        .iter()
        .map(|&o| (o - expected).powi(2) / expected)
        .sum();

    let p_value = chi_square_p_value(chi2, (categories - 1) as f64);
    SignificanceTest {
        chi2,
        p_value,
        is_significant: p_value < SIGNIFICANCE_ALPHA,
    }
}

/// Upper-tail p-value for a chi-square statistic with `df` degrees of freedom.
///
/// Invalid parameters fall back to p = 1 (not significant).
pub fn chi_square_p_value(chi2: f64, df: f64) -> f64 {
    if !chi2.is_finite() || chi2 < 0.0 || df <= 0.0 {
        return 1.0;
    }
    match ChiSquared::new(df) {
        Ok(dist) => (1.0 - dist.cdf(chi2)).clamp(0.0, 1.0),
        Err(_) => 1.0,
    }
}

/// Two-sided standard-normal tail probability for a z-score.
pub fn normal_two_sided_p(z: f64) -> f64 {
    if !z.is_finite() {
        return 0.0;
    }
    match Normal::new(0.0, 1.0) {
        Ok(dist) => (2.0 * (1.0 - dist.cdf(z.abs()))).clamp(0.0, 1.0),
        Err(_) => 1.0,
    }
}

/// Population standard deviation of a slice. Empty input yields 0.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Round to a fixed number of decimal places for stable serialized output.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
