//! Error type shared by every rule detector.
//!
//! All detectors validate their arguments before scanning and surface the
//! first problem found as a [`RuleError`]. There is no retry or recovery:
//! the caller fixes the arguments and calls again.

use thiserror::Error;

/// Errors raised by the statistics helpers and the rule detectors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    /// The sample sequence is empty.
    #[error("sample sequence is empty")]
    EmptyData,

    /// A sample is NaN or infinite.
    #[error("sample at index {index} is not finite")]
    NonFiniteData {
        /// Position of the offending sample.
        index: usize,
    },

    /// A window, count or threshold parameter is zero, negative or not finite.
    #[error("parameter `{name}` must be strictly positive, got {value}")]
    NonPositiveParameter {
        /// Parameter name as it appears in the rule signature.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The scan start offset does not address a sample.
    #[error("seed limit {seed_limit} is out of range for {len} samples")]
    SeedLimitOutOfRange {
        /// Requested scan start.
        seed_limit: usize,
        /// Length of the sample sequence.
        len: usize,
    },

    /// A caller-supplied mean or standard deviation is negative or not finite.
    #[error("override `{name}` must be a finite value >= 0, got {value}")]
    NegativeOverride {
        /// `"mean"` or `"std_dev"`.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A statistic computed from finite samples overflowed to NaN or infinity.
    #[error("computed {name} is not finite")]
    NonFiniteStatistic {
        /// `"mean"` or `"std_dev"`.
        name: &'static str,
    },

    /// Too few samples to estimate a statistic.
    ///
    /// Raised by the sample standard deviation for a single-element sequence
    /// instead of dividing by zero.
    #[error("at least {required} samples required, got {actual}")]
    InsufficientData {
        /// Minimum number of samples.
        required: usize,
        /// Number of samples supplied.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_argument() {
        let err = RuleError::NonPositiveParameter {
            name: "num_std_dev",
            value: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "parameter `num_std_dev` must be strictly positive, got 0"
        );

        let err = RuleError::SeedLimitOutOfRange {
            seed_limit: 5,
            len: 5,
        };
        assert_eq!(err.to_string(), "seed limit 5 is out of range for 5 samples");
    }

    #[test]
    fn test_insufficient_data_message() {
        let err = RuleError::InsufficientData {
            required: 2,
            actual: 1,
        };
        assert_eq!(err.to_string(), "at least 2 samples required, got 1");
    }
}
