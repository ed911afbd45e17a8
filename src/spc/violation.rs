//! Violation records and rule identifiers.
//!
//! # Reference
//!
//! Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//! *Journal of Quality Technology* 16(4), pp. 237-239.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A sample that violates a rule.
///
/// `index` is the zero-based position in the analysed sequence and `value`
/// the sample found there. Detectors return violations in increasing index
/// order without duplicate indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Position of the flagged sample.
    pub index: usize,
    /// The flagged sample.
    pub value: f64,
}

impl Violation {
    /// Records the sample at `index`.
    pub fn new(index: usize, value: f64) -> Self {
        Self { index, value }
    }
}

/// Identifies one of Nelson's eight tests for special causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// Points beyond N standard deviations.
    Rule1,
    /// N consecutive points on the same side of the mean.
    Rule2,
    /// N consecutive points steadily increasing or decreasing.
    Rule3,
    /// N consecutive points alternating up and down.
    Rule4,
    /// X of Y points beyond N standard deviations, same side.
    Rule5,
    /// X of Y points beyond N standard deviations, same side.
    ///
    /// Same algorithm as [`RuleId::Rule5`]; the two differ only in the
    /// textbook parameters.
    Rule6,
    /// N consecutive points within N standard deviations.
    Rule7,
    /// N consecutive points beyond N standard deviations, either side.
    Rule8,
}

impl RuleId {
    /// All eight rules in order.
    pub const ALL: [RuleId; 8] = [
        RuleId::Rule1,
        RuleId::Rule2,
        RuleId::Rule3,
        RuleId::Rule4,
        RuleId::Rule5,
        RuleId::Rule6,
        RuleId::Rule7,
        RuleId::Rule8,
    ];

    /// Rule number, 1 through 8.
    pub fn number(self) -> u8 {
        match self {
            RuleId::Rule1 => 1,
            RuleId::Rule2 => 2,
            RuleId::Rule3 => 3,
            RuleId::Rule4 => 4,
            RuleId::Rule5 => 5,
            RuleId::Rule6 => 6,
            RuleId::Rule7 => 7,
            RuleId::Rule8 => 8,
        }
    }

    /// Short description of the pattern the rule detects.
    pub fn description(self) -> &'static str {
        match self {
            RuleId::Rule1 => "point beyond N standard deviations",
            RuleId::Rule2 => "consecutive points on the same side of the mean",
            RuleId::Rule3 => "consecutive points steadily increasing or decreasing",
            RuleId::Rule4 => "consecutive points alternating up and down",
            RuleId::Rule5 | RuleId::Rule6 => {
                "X of Y points beyond N standard deviations on the same side"
            }
            RuleId::Rule7 => "consecutive points within N standard deviations",
            RuleId::Rule8 => "consecutive points beyond N standard deviations on either side",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nelson rule {}", self.number())
    }
}
