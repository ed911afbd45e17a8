//! Statistical Process Control (SPC) run rules.
//!
//! Detectors for Nelson's eight tests for special causes, each an
//! independent, stateless function over a slice of process measurements.
//!
//! # Detectors
//!
//! - [`rule1`] — points beyond N standard deviations
//! - [`rule2`] — N consecutive points on the same side of the mean
//! - [`rule3`] — N consecutive points steadily increasing or decreasing
//! - [`rule4`] — N consecutive points alternating up and down
//! - [`rule5`], [`rule6`] — X of Y points beyond N standard deviations, same side
//! - [`rule7`] — N consecutive points within N standard deviations
//! - [`rule8`] — N consecutive points beyond N standard deviations, either side
//!
//! [`RuleConfig`] stores one rule's parameters (with Nelson's textbook
//! defaults) and evaluates it.
//!
//! # References
//!
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.

mod config;
mod rules;
mod scan;
mod violation;

pub use config::RuleConfig;
pub use rules::{rule1, rule2, rule3, rule4, rule5, rule6, rule7, rule8, x_out_of_y_beyond_std_dev};
pub use scan::{scan_windows, Traversal};
pub use violation::{RuleId, Violation};
