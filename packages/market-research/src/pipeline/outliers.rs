//! Order-of-magnitude outlier fence and confidence scoring for market figures.

use crate::types::market::Confidence;

/// Values further than this factor from the median are dropped.
const FENCE_FACTOR: f64 = 10.0;

/// Drop values outside `[median / 10, median * 10]`.
///
/// Lists shorter than three pass through unchanged. When fewer than two
/// values survive, the two smallest originals are returned instead, so
/// callers always have a range to report.
pub fn filter_outliers(values: &[f64]) -> Vec<f64> {
    if values.len() < 3 {
        return values.to_vec();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    let low = median / FENCE_FACTOR;
    let high = median * FENCE_FACTOR;
    let kept: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| *v >= low && *v <= high)
        .collect();

    if kept.len() < 2 {
        sorted.truncate(2);
        return sorted;
    }

    kept
}

/// Relative spread of a range: `(high - low) / high`.
pub fn spread(low: f64, high: f64) -> f64 {
    if high <= 0.0 {
        0.0
    } else {
        (high - low) / high
    }
}

/// Confidence from source count, figure count, spread and scope mismatch.
///
/// A scope mismatch caps confidence at medium since the estimate mixes
/// two market definitions.
pub fn calculate_confidence(
    sources: usize,
    figures: usize,
    spread: f64,
    scope_mismatch: bool,
) -> Confidence {
    if scope_mismatch {
        return if sources >= 2 && figures >= 2 {
            Confidence::Medium
        } else {
            Confidence::Low
        };
    }

    if sources >= 3 && figures >= 3 && spread < 0.5 {
        Confidence::High
    } else if sources >= 2 && figures >= 2 && spread < 2.0 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}
