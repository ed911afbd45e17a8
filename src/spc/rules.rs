//! Nelson run rules for detecting non-random patterns in process data.
//!
//! Each detector is an independent, stateless function over a read-only
//! sample slice. Detectors validate their arguments, resolve the process
//! mean and standard deviation (caller overrides take precedence over
//! estimates from the data), then scan windows starting at `seed_limit`.
//!
//! | Rule | Window                 | After a match        |
//! |------|------------------------|----------------------|
//! | 1    | 1 point                | restart at seed      |
//! | 2    | `num_consecutive_points` | skip past window   |
//! | 3    | `num_consecutive_points` | skip past window   |
//! | 4    | `num_consecutive_points` | skip past window   |
//! | 5, 6 | `num_out_of`           | skip past window     |
//! | 7    | `num_consecutive_points` | restart at seed    |
//! | 8    | `num_consecutive_points` | restart at seed    |
//!
//! All threshold comparisons are strict: a sample lying exactly on
//! `mean ± num_std_dev * std_dev` is neither beyond nor within the band.
//!
//! # References
//!
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.

use std::cmp::Ordering;

use tracing::debug;

use super::scan::{scan_windows, Traversal, Validation};
use super::violation::{RuleId, Violation};
use crate::error::RuleError;
use crate::stats::{resolve_mean, Baseline};

fn report(rule: RuleId, violations: Vec<Violation>) -> Result<Vec<Violation>, RuleError> {
    debug!(%rule, violations = violations.len(), "rule evaluated");
    Ok(violations)
}

/// Nelson Rule 1: points more than `num_std_dev` standard deviations from the mean.
///
/// Flags every sample at or after `seed_limit` with
/// `|value - mean| > num_std_dev * std_dev`. After each match the scan
/// restarts at `seed_limit`.
///
/// # Errors
///
/// [`RuleError`] if the data is empty or non-finite, `num_std_dev` is not
/// strictly positive, `seed_limit` is out of range, an override is negative,
/// or the standard deviation must be estimated from a single sample.
///
/// # Examples
///
/// ```
/// use u_nelson::spc::rule1;
///
/// let v = rule1(&[10.0, 10.0, 10.0, 10.0, 100.0], 1.0, None, 0, None).unwrap();
/// assert_eq!(v.len(), 1);
/// assert_eq!(v[0].index, 4);
/// ```
pub fn rule1(
    data: &[f64],
    num_std_dev: f64,
    mean: Option<f64>,
    seed_limit: usize,
    std_dev: Option<f64>,
) -> Result<Vec<Violation>, RuleError> {
    Validation::new(data, seed_limit)
        .threshold("num_std_dev", num_std_dev)
        .overrides(mean, std_dev)
        .finish()?;

    let baseline = Baseline::resolve(data, mean, std_dev)?;
    let limit = num_std_dev * baseline.std_dev;
    let violations = scan_windows(data, seed_limit, 1, Traversal::RestartAtSeed, |w| {
        ((w[0] - baseline.mean).abs() > limit).then_some(0)
    });
    report(RuleId::Rule1, violations)
}

/// Nelson Rule 2: `num_consecutive_points` in a row on the same side of the mean.
///
/// The first sample of a window decides the side: below (`< mean`) or at-or-above
/// (`>= mean`). The window matches if every sample is on that side. The last
/// sample of a matching window is reported and the scan skips past it.
///
/// Only the mean is needed; the standard deviation is never estimated, so
/// single-sample input is accepted.
///
/// # Examples
///
/// ```
/// use u_nelson::spc::rule2;
///
/// let data = [1.0, 1.0, 1.0, 5.0, 5.0, 5.0, 1.0, 1.0];
/// let v = rule2(&data, 3, 0, Some(2.5)).unwrap();
/// let idx: Vec<usize> = v.iter().map(|v| v.index).collect();
/// assert_eq!(idx, vec![2, 5]);
/// ```
pub fn rule2(
    data: &[f64],
    num_consecutive_points: usize,
    seed_limit: usize,
    mean: Option<f64>,
) -> Result<Vec<Violation>, RuleError> {
    Validation::new(data, seed_limit)
        .count("num_consecutive_points", num_consecutive_points)
        .overrides(mean, None)
        .finish()?;

    let mean = resolve_mean(data, mean)?;
    debug!(mean, "resolved centre line");
    let violations = scan_windows(
        data,
        seed_limit,
        num_consecutive_points,
        Traversal::SkipPastWindow,
        |w| {
            let below = w[0] < mean;
            w.iter()
                .all(|&x| (x < mean) == below)
                .then_some(w.len() - 1)
        },
    );
    report(RuleId::Rule2, violations)
}

/// Nelson Rule 3: `num_consecutive_points` steadily increasing or decreasing.
///
/// Every consecutive pair in the window must be strictly increasing, or every
/// pair strictly decreasing; a repeated value breaks the trend.
///
/// # Examples
///
/// ```
/// use u_nelson::spc::rule3;
///
/// let v = rule3(&[1.0, 2.0, 3.0, 4.0, 2.0], 4, 0).unwrap();
/// assert_eq!(v.len(), 1);
/// assert_eq!((v[0].index, v[0].value), (3, 4.0));
/// ```
pub fn rule3(
    data: &[f64],
    num_consecutive_points: usize,
    seed_limit: usize,
) -> Result<Vec<Violation>, RuleError> {
    Validation::new(data, seed_limit)
        .count("num_consecutive_points", num_consecutive_points)
        .finish()?;

    let violations = scan_windows(
        data,
        seed_limit,
        num_consecutive_points,
        Traversal::SkipPastWindow,
        |w| {
            let increasing = w.windows(2).all(|p| p[1] > p[0]);
            let decreasing = w.windows(2).all(|p| p[1] < p[0]);
            (increasing || decreasing).then_some(w.len() - 1)
        },
    );
    report(RuleId::Rule3, violations)
}

/// Nelson Rule 4: `num_consecutive_points` alternating up and down.
///
/// The first pair of the window fixes the phase (up or down); every later pair
/// must move in the opposite direction to the pair before it. A repeated value
/// breaks the alternation.
///
/// # Examples
///
/// ```
/// use u_nelson::spc::rule4;
///
/// let data: Vec<f64> = (0..14).map(|i| if i % 2 == 0 { 24.0 } else { 26.0 }).collect();
/// let v = rule4(&data, 14, 0).unwrap();
/// assert_eq!(v.len(), 1);
/// assert_eq!(v[0].index, 13);
/// ```
pub fn rule4(
    data: &[f64],
    num_consecutive_points: usize,
    seed_limit: usize,
) -> Result<Vec<Violation>, RuleError> {
    Validation::new(data, seed_limit)
        .count("num_consecutive_points", num_consecutive_points)
        .finish()?;

    let violations = scan_windows(
        data,
        seed_limit,
        num_consecutive_points,
        Traversal::SkipPastWindow,
        |w| alternates(w).then_some(w.len() - 1),
    );
    report(RuleId::Rule4, violations)
}

fn alternates(window: &[f64]) -> bool {
    // +1 = up, -1 = down, 0 = equal
    let dirs: Vec<i8> = window
        .windows(2)
        .map(|p| match p[1].partial_cmp(&p[0]) {
            Some(Ordering::Greater) => 1,
            Some(Ordering::Less) => -1,
            _ => 0,
        })
        .collect();

    dirs.iter().all(|&d| d != 0) && dirs.windows(2).all(|d| d[1] == -d[0])
}

/// Nelson Rules 5 and 6: `num_consecutive_points` of `num_out_of` beyond
/// `num_std_dev` standard deviations on the same side.
///
/// For each window of `num_out_of` samples, counts samples strictly above
/// `mean + num_std_dev * std_dev` and strictly below `mean - num_std_dev * std_dev`.
/// If either count reaches `num_consecutive_points`, the latest sample in the
/// window lying outside the band (on either side) is reported and the scan
/// skips past the window.
///
/// A count larger than the window never matches.
pub fn x_out_of_y_beyond_std_dev(
    data: &[f64],
    num_consecutive_points: usize,
    num_out_of: usize,
    num_std_dev: f64,
    mean: Option<f64>,
    seed_limit: usize,
    std_dev: Option<f64>,
) -> Result<Vec<Violation>, RuleError> {
    Validation::new(data, seed_limit)
        .count("num_consecutive_points", num_consecutive_points)
        .count("num_out_of", num_out_of)
        .threshold("num_std_dev", num_std_dev)
        .overrides(mean, std_dev)
        .finish()?;

    let baseline = Baseline::resolve(data, mean, std_dev)?;
    let (lower, upper) = baseline.band(num_std_dev);
    Ok(scan_windows(
        data,
        seed_limit,
        num_out_of,
        Traversal::SkipPastWindow,
        |w| {
            let above = w.iter().filter(|&&x| x > upper).count();
            let below = w.iter().filter(|&&x| x < lower).count();
            if above >= num_consecutive_points || below >= num_consecutive_points {
                w.iter().rposition(|&x| x > upper || x < lower)
            } else {
                None
            }
        },
    ))
}

/// Nelson Rule 5: X of Y points beyond N standard deviations, same side.
///
/// Textbook parameters are 2 of 3 beyond 2 sigma. See
/// [`x_out_of_y_beyond_std_dev`] for the algorithm.
///
/// # Examples
///
/// ```
/// use u_nelson::spc::rule5;
///
/// // Band at 2 sigma around 25 with sigma 1: (23, 27).
/// let v = rule5(&[27.5, 25.0, 27.5], 2, 3, 2.0, Some(25.0), 0, Some(1.0)).unwrap();
/// assert_eq!(v.len(), 1);
/// assert_eq!(v[0].index, 2);
/// ```
pub fn rule5(
    data: &[f64],
    num_consecutive_points: usize,
    num_out_of: usize,
    num_std_dev: f64,
    mean: Option<f64>,
    seed_limit: usize,
    std_dev: Option<f64>,
) -> Result<Vec<Violation>, RuleError> {
    let violations = x_out_of_y_beyond_std_dev(
        data,
        num_consecutive_points,
        num_out_of,
        num_std_dev,
        mean,
        seed_limit,
        std_dev,
    )?;
    report(RuleId::Rule5, violations)
}

/// Nelson Rule 6: X of Y points beyond N standard deviations, same side.
///
/// Identical to [`rule5`]; textbook parameters are 4 of 5 beyond 1 sigma.
pub fn rule6(
    data: &[f64],
    num_consecutive_points: usize,
    num_out_of: usize,
    num_std_dev: f64,
    mean: Option<f64>,
    seed_limit: usize,
    std_dev: Option<f64>,
) -> Result<Vec<Violation>, RuleError> {
    let violations = x_out_of_y_beyond_std_dev(
        data,
        num_consecutive_points,
        num_out_of,
        num_std_dev,
        mean,
        seed_limit,
        std_dev,
    )?;
    report(RuleId::Rule6, violations)
}

/// Nelson Rule 7: `num_consecutive_points` within `num_std_dev` standard deviations.
///
/// A window matches if every sample lies strictly inside
/// `(mean - num_std_dev * std_dev, mean + num_std_dev * std_dev)`; this
/// signals stratification (too little variation). The last sample is
/// reported and the scan restarts at `seed_limit`.
pub fn rule7(
    data: &[f64],
    num_consecutive_points: usize,
    num_std_dev: f64,
    mean: Option<f64>,
    seed_limit: usize,
    std_dev: Option<f64>,
) -> Result<Vec<Violation>, RuleError> {
    Validation::new(data, seed_limit)
        .count("num_consecutive_points", num_consecutive_points)
        .threshold("num_std_dev", num_std_dev)
        .overrides(mean, std_dev)
        .finish()?;

    let baseline = Baseline::resolve(data, mean, std_dev)?;
    let (lower, upper) = baseline.band(num_std_dev);
    let violations = scan_windows(
        data,
        seed_limit,
        num_consecutive_points,
        Traversal::RestartAtSeed,
        |w| {
            w.iter()
                .all(|&x| x > lower && x < upper)
                .then_some(w.len() - 1)
        },
    );
    report(RuleId::Rule7, violations)
}

/// Nelson Rule 8: `num_consecutive_points` beyond `num_std_dev` standard
/// deviations, either side.
///
/// A window matches if every sample lies strictly outside the band; sides may
/// mix. This signals a mixture of two processes. The last sample is reported
/// and the scan restarts at `seed_limit`.
pub fn rule8(
    data: &[f64],
    num_consecutive_points: usize,
    num_std_dev: f64,
    mean: Option<f64>,
    seed_limit: usize,
    std_dev: Option<f64>,
) -> Result<Vec<Violation>, RuleError> {
    Validation::new(data, seed_limit)
        .count("num_consecutive_points", num_consecutive_points)
        .threshold("num_std_dev", num_std_dev)
        .overrides(mean, std_dev)
        .finish()?;

    let baseline = Baseline::resolve(data, mean, std_dev)?;
    let (lower, upper) = baseline.band(num_std_dev);
    let violations = scan_windows(
        data,
        seed_limit,
        num_consecutive_points,
        Traversal::RestartAtSeed,
        |w| {
            w.iter()
                .all(|&x| x > upper || x < lower)
                .then_some(w.len() - 1)
        },
    );
    report(RuleId::Rule8, violations)
}
