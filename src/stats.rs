//! Statistical primitives used by the rule detectors.
//!
//! The mean is delegated to `u_numflow` (Kahan-compensated summation). The
//! standard deviation is the **sample** deviation (Bessel's correction,
//! divisor `n - 1`) taken about a caller-chosen centre, so that a supplied
//! process mean and a computed deviation stay consistent.

use tracing::debug;
use u_numflow::stats;

use crate::error::RuleError;

/// Arithmetic mean of all samples.
///
/// # Errors
///
/// - [`RuleError::EmptyData`] if `data` is empty.
/// - [`RuleError::NonFiniteData`] if any sample is NaN or infinite.
/// - [`RuleError::NonFiniteStatistic`] if the sum overflows.
///
/// # Examples
///
/// ```
/// use u_nelson::stats::mean;
///
/// let m = mean(&[10.0, 10.0, 10.0, 10.0, 100.0]).unwrap();
/// assert!((m - 28.0).abs() < 1e-12);
/// ```
pub fn mean(data: &[f64]) -> Result<f64, RuleError> {
    if data.is_empty() {
        return Err(RuleError::EmptyData);
    }
    ensure_finite(data)?;
    stats::mean(data)
        .filter(|m| m.is_finite())
        .ok_or(RuleError::NonFiniteStatistic { name: "mean" })
}

/// Sample standard deviation of `data` about `mean` (divisor `n - 1`).
///
/// # Errors
///
/// - [`RuleError::InsufficientData`] if fewer than two samples are given;
///   a single sample has no spread estimate.
/// - [`RuleError::NonFiniteData`] if any sample is NaN or infinite.
/// - [`RuleError::NonFiniteStatistic`] if the squared deviations overflow.
///
/// # Examples
///
/// ```
/// use u_nelson::stats::standard_deviation;
///
/// let sd = standard_deviation(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 5.0).unwrap();
/// assert!((sd - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
/// ```
///
/// # Complexity
///
/// Time: O(n), Space: O(1)
pub fn standard_deviation(data: &[f64], mean: f64) -> Result<f64, RuleError> {
    ensure_finite(data)?;
    let n = data.len();
    if n < 2 {
        return Err(RuleError::InsufficientData {
            required: 2,
            actual: n,
        });
    }
    let sum_sq: f64 = data.iter().map(|&x| (x - mean) * (x - mean)).sum();
    let sd = (sum_sq / (n - 1) as f64).sqrt();
    if sd.is_finite() {
        Ok(sd)
    } else {
        Err(RuleError::NonFiniteStatistic { name: "std_dev" })
    }
}

fn ensure_finite(data: &[f64]) -> Result<(), RuleError> {
    match data.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(RuleError::NonFiniteData { index }),
        None => Ok(()),
    }
}

/// Centre line and spread a detector compares samples against.
///
/// Derived per call and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    /// Process mean (centre line).
    pub mean: f64,
    /// Process standard deviation (sigma).
    pub std_dev: f64,
}

impl Baseline {
    /// Uses the supplied values where present and estimates the rest from `data`.
    ///
    /// A missing deviation is computed about the resolved mean, which may be
    /// the caller's override rather than the sample mean.
    pub fn resolve(
        data: &[f64],
        mean: Option<f64>,
        std_dev: Option<f64>,
    ) -> Result<Self, RuleError> {
        let mean = resolve_mean(data, mean)?;
        let std_dev = match std_dev {
            Some(sd) => sd,
            None => standard_deviation(data, mean)?,
        };
        debug!(mean, std_dev, "resolved baseline");
        Ok(Self { mean, std_dev })
    }

    /// Symmetric band `(mean - k*sigma, mean + k*sigma)`.
    pub fn band(&self, num_std_dev: f64) -> (f64, f64) {
        let half_width = num_std_dev * self.std_dev;
        (self.mean - half_width, self.mean + half_width)
    }
}

/// Returns the supplied mean, or the sample mean of `data` when absent.
pub fn resolve_mean(data: &[f64], mean: Option<f64>) -> Result<f64, RuleError> {
    match mean {
        Some(m) => Ok(m),
        None => self::mean(data),
    }
}
