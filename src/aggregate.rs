//! Mean and weighted mean over per-destination travel times.

use crate::error::{RaterError, Result};

/// Arithmetic mean of `values`. Empty input is a caller bug, not a zero.
pub fn mean(values: &[i64]) -> Result<f64> {
    if values.is_empty() {
        return Err(RaterError::Precondition(
            "mean of empty input".to_string(),
        ));
    }
    Ok(values.iter().sum::<i64>() as f64 / values.len() as f64)
}

/// Weighted mean `Σ(vᵢ·wᵢ) / Σwᵢ`.
///
/// Fails when the slices differ in length or the weights sum to zero;
/// never returns NaN.
pub fn weighted_mean(values: &[i64], weights: &[f64]) -> Result<f64> {
    if values.len() != weights.len() {
        return Err(RaterError::Precondition(format!(
            "{} values but {} weights",
            values.len(),
            weights.len()
        )));
    }

    let weight_sum: f64 = weights.iter().sum();
    if weight_sum == 0.0 {
        return Err(RaterError::Precondition(
            "weights sum to zero".to_string(),
        ));
    }

    let total: f64 = values
        .iter()
        .zip(weights)
        .map(|(v, w)| *v as f64 * w)
        .sum();
    Ok(total / weight_sum)
}
