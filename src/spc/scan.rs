//! Shared argument validation and windowed traversal for the detectors.
//!
//! Every detector is a forward scan over fixed-size windows starting at the
//! seed limit. Detectors differ only in the window predicate and in what the
//! scan does after a match, captured by [`Traversal`].

use tracing::trace;

use super::violation::Violation;
use crate::error::RuleError;

/// What the scan does after a window matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Return to the seed limit and scan forward again.
    ///
    /// Windows examined since the seed limit are not evaluated again and a
    /// sample is reported at most once, so the scan terminates and reports
    /// exactly the matching windows of a single forward sweep.
    RestartAtSeed,
    /// Resume at the first sample after the matched window.
    ///
    /// Matched windows never overlap.
    SkipPastWindow,
}

/// Scans `data` in windows of `window` samples starting at `seed_limit`.
///
/// `matches` receives each window and returns the offset (within the window)
/// of the sample to report, or `None` when the window does not violate the
/// rule. Windows that would run past the end of `data` are never evaluated.
///
/// Callers are expected to have validated `seed_limit < data.len()` and
/// `window > 0`; out-of-range input simply yields no violations.
///
/// # Complexity
///
/// Time: O(n·w) for either traversal; each window is evaluated at most once.
pub fn scan_windows<F>(
    data: &[f64],
    seed_limit: usize,
    window: usize,
    traversal: Traversal,
    mut matches: F,
) -> Vec<Violation>
where
    F: FnMut(&[f64]) -> Option<usize>,
{
    let mut violations = Vec::new();
    if window == 0 {
        return violations;
    }

    let len = data.len();
    let mut pos = seed_limit;
    let mut last_reported: Option<usize> = None;

    while pos < len && window <= len - pos {
        let end = pos + window - 1;
        let found = matches(&data[pos..=end])
            .filter(|&offset| offset < window)
            .map(|offset| pos + offset)
            .filter(|&index| last_reported.map_or(true, |last| index > last));

        match found {
            Some(index) => {
                trace!(index, value = data[index], window_start = pos, "window matched");
                violations.push(Violation::new(index, data[index]));
                last_reported = Some(index);
                pos = match traversal {
                    // Back to the seed limit; every window from there up to
                    // this one has been examined, so resume right after it.
                    Traversal::RestartAtSeed => pos + 1,
                    Traversal::SkipPastWindow => end + 1,
                };
            }
            None => pos += 1,
        }
    }

    violations
}

/// Argument checks shared by all eight detectors.
///
/// The first failing check wins; later checks are skipped.
///
/// ```ignore
/// Validation::new(data, seed_limit)
///     .count("num_consecutive_points", n)
///     .threshold("num_std_dev", k)
///     .overrides(mean, std_dev)
///     .finish()?;
/// ```
#[derive(Debug)]
pub(crate) struct Validation {
    outcome: Result<(), RuleError>,
}

impl Validation {
    /// Checks the sample sequence and the seed limit.
    pub(crate) fn new(data: &[f64], seed_limit: usize) -> Self {
        let outcome = if data.is_empty() {
            Err(RuleError::EmptyData)
        } else if let Some(index) = data.iter().position(|x| !x.is_finite()) {
            Err(RuleError::NonFiniteData { index })
        } else if seed_limit >= data.len() {
            Err(RuleError::SeedLimitOutOfRange {
                seed_limit,
                len: data.len(),
            })
        } else {
            Ok(())
        };
        Self { outcome }
    }

    /// Window or count parameter; must be at least 1.
    pub(crate) fn count(mut self, name: &'static str, value: usize) -> Self {
        if self.outcome.is_ok() && value == 0 {
            self.outcome = Err(RuleError::NonPositiveParameter { name, value: 0.0 });
        }
        self
    }

    /// Deviation multiplier; must be finite and strictly positive.
    pub(crate) fn threshold(mut self, name: &'static str, value: f64) -> Self {
        if self.outcome.is_ok() && !(value.is_finite() && value > 0.0) {
            self.outcome = Err(RuleError::NonPositiveParameter { name, value });
        }
        self
    }

    /// Caller-supplied mean and standard deviation; must be finite and >= 0.
    pub(crate) fn overrides(self, mean: Option<f64>, std_dev: Option<f64>) -> Self {
        self.non_negative("mean", mean)
            .non_negative("std_dev", std_dev)
    }

    fn non_negative(mut self, name: &'static str, value: Option<f64>) -> Self {
        if let (true, Some(v)) = (self.outcome.is_ok(), value) {
            if !(v.is_finite() && v >= 0.0) {
                self.outcome = Err(RuleError::NegativeOverride { name, value: v });
            }
        }
        self
    }

    pub(crate) fn finish(self) -> Result<(), RuleError> {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last(window: &[f64]) -> Option<usize> {
        Some(window.len() - 1)
    }

    // --- scan_windows ---

    #[test]
    fn test_skip_reports_non_overlapping_windows() {
        let data = [1.0; 7];
        let v = scan_windows(&data, 0, 3, Traversal::SkipPastWindow, last);
        let idx: Vec<usize> = v.iter().map(|v| v.index).collect();
        assert_eq!(idx, vec![2, 5]);
    }

    #[test]
    fn test_restart_reports_every_matching_window_once() {
        let data = [1.0; 5];
        let v = scan_windows(&data, 0, 3, Traversal::RestartAtSeed, last);
        let idx: Vec<usize> = v.iter().map(|v| v.index).collect();
        assert_eq!(idx, vec![2, 3, 4]);
    }

    #[test]
    fn test_restart_returns_to_seed() {
        let data = [0.0, 9.0, 0.0, 9.0, 9.0];
        let mut starts = Vec::new();
        let v = scan_windows(&data, 1, 1, Traversal::RestartAtSeed, |w| {
            starts.push(w[0]);
            (w[0] > 5.0).then_some(0)
        });
        let idx: Vec<usize> = v.iter().map(|v| v.index).collect();
        assert_eq!(idx, vec![1, 3, 4]);
        // Each window is evaluated once even though the scan restarts.
        assert_eq!(starts.len(), 4);
    }

    #[test]
    fn test_restart_evaluates_each_window_once() {
        let data = vec![1.0; 1_000];
        let mut calls = 0_usize;
        let v = scan_windows(&data, 10, 5, Traversal::RestartAtSeed, |w| {
            calls += 1;
            last(w)
        });
        assert_eq!(v.len(), 1_000 - 10 - 4);
        assert_eq!(v[0].index, 14);
        assert_eq!(calls, v.len());
    }

    #[test]
    fn test_restart_after_inner_offset_rescans_later_windows() {
        // The window at 1 points back at the sample already reported.
        let data = [0.0, 9.0, 0.0, 0.0, 9.0];
        let v = scan_windows(&data, 0, 3, Traversal::RestartAtSeed, |w| {
            w.iter().position(|&x| x > 5.0)
        });
        let idx: Vec<usize> = v.iter().map(|v| v.index).collect();
        assert_eq!(idx, vec![1, 4]);
    }

    #[test]
    fn test_seed_limit_excludes_earlier_windows() {
        let data = [1.0; 6];
        let v = scan_windows(&data, 2, 2, Traversal::SkipPastWindow, last);
        let idx: Vec<usize> = v.iter().map(|v| v.index).collect();
        assert_eq!(idx, vec![3, 5]);
    }

    #[test]
    fn test_window_longer_than_data() {
        let data = [1.0, 2.0];
        assert!(scan_windows(&data, 0, 3, Traversal::SkipPastWindow, last).is_empty());
        assert!(scan_windows(&data, 0, 3, Traversal::RestartAtSeed, last).is_empty());
    }

    #[test]
    fn test_zero_window_yields_nothing() {
        let data = [1.0, 2.0];
        assert!(scan_windows(&data, 0, 0, Traversal::SkipPastWindow, |_| Some(0)).is_empty());
    }

    #[test]
    fn test_reported_offset_inside_window() {
        let data = [5.0, 0.0, 0.0, 5.0, 0.0, 0.0];
        let v = scan_windows(&data, 0, 3, Traversal::SkipPastWindow, |w| {
            w.iter().rposition(|&x| x > 1.0)
        });
        assert_eq!(v, vec![Violation::new(0, 5.0), Violation::new(3, 5.0)]);
    }

    // --- Validation ---

    #[test]
    fn test_validation_accepts_good_arguments() {
        let data = [1.0, 2.0, 3.0];
        let result = Validation::new(&data, 2)
            .count("num_consecutive_points", 2)
            .threshold("num_std_dev", 1.5)
            .overrides(Some(0.0), Some(1.0))
            .finish();
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_validation_empty_data() {
        assert_eq!(Validation::new(&[], 0).finish(), Err(RuleError::EmptyData));
    }

    #[test]
    fn test_validation_non_finite_data() {
        assert_eq!(
            Validation::new(&[1.0, f64::INFINITY], 0).finish(),
            Err(RuleError::NonFiniteData { index: 1 })
        );
    }

    #[test]
    fn test_validation_seed_limit() {
        assert_eq!(
            Validation::new(&[1.0, 2.0], 2).finish(),
            Err(RuleError::SeedLimitOutOfRange {
                seed_limit: 2,
                len: 2
            })
        );
    }

    #[test]
    fn test_validation_zero_count() {
        let result = Validation::new(&[1.0], 0).count("num_out_of", 0).finish();
        assert_eq!(
            result,
            Err(RuleError::NonPositiveParameter {
                name: "num_out_of",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_validation_threshold() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = Validation::new(&[1.0], 0).threshold("num_std_dev", bad).finish();
            assert!(matches!(
                result,
                Err(RuleError::NonPositiveParameter {
                    name: "num_std_dev",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_validation_negative_overrides() {
        let result = Validation::new(&[1.0], 0).overrides(Some(-0.5), None).finish();
        assert_eq!(
            result,
            Err(RuleError::NegativeOverride {
                name: "mean",
                value: -0.5
            })
        );

        let result = Validation::new(&[1.0], 0).overrides(None, Some(-2.0)).finish();
        assert_eq!(
            result,
            Err(RuleError::NegativeOverride {
                name: "std_dev",
                value: -2.0
            })
        );
    }

    #[test]
    fn test_validation_first_error_wins() {
        let result = Validation::new(&[], 5)
            .count("num_consecutive_points", 0)
            .finish();
        assert_eq!(result, Err(RuleError::EmptyData));
    }
}
