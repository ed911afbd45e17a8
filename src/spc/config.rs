//! Serializable rule configuration with Nelson's textbook parameters.
//!
//! A [`RuleConfig`] names one rule and carries its parameters, so rule
//! choices can be stored in a settings file and evaluated later. Each
//! configuration evaluates exactly one rule.
//!
//! ```
//! use u_nelson::spc::{RuleConfig, RuleId};
//!
//! let config: RuleConfig = serde_json::from_str(
//!     r#"{ "rule": "rule2", "num_consecutive_points": 3, "mean": 2.5 }"#,
//! ).unwrap();
//! assert_eq!(config.rule_id(), RuleId::Rule2);
//!
//! let v = config.evaluate(&[1.0, 1.0, 1.0, 5.0, 5.0, 5.0]).unwrap();
//! assert_eq!(v.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use super::rules;
use super::violation::{RuleId, Violation};
use crate::error::RuleError;

/// Parameters for a single rule evaluation.
///
/// `mean` and `std_dev` are optional overrides; when absent they are
/// estimated from the data. `seed_limit` defaults to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleConfig {
    /// See [`rule1`](crate::spc::rule1).
    Rule1 {
        num_std_dev: f64,
        #[serde(default)]
        mean: Option<f64>,
        #[serde(default)]
        seed_limit: usize,
        #[serde(default)]
        std_dev: Option<f64>,
    },
    /// See [`rule2`](crate::spc::rule2).
    Rule2 {
        num_consecutive_points: usize,
        #[serde(default)]
        seed_limit: usize,
        #[serde(default)]
        mean: Option<f64>,
    },
    /// See [`rule3`](crate::spc::rule3).
    Rule3 {
        num_consecutive_points: usize,
        #[serde(default)]
        seed_limit: usize,
    },
    /// See [`rule4`](crate::spc::rule4).
    Rule4 {
        num_consecutive_points: usize,
        #[serde(default)]
        seed_limit: usize,
    },
    /// See [`rule5`](crate::spc::rule5).
    Rule5 {
        num_consecutive_points: usize,
        num_out_of: usize,
        num_std_dev: f64,
        #[serde(default)]
        mean: Option<f64>,
        #[serde(default)]
        seed_limit: usize,
        #[serde(default)]
        std_dev: Option<f64>,
    },
    /// See [`rule6`](crate::spc::rule6).
    Rule6 {
        num_consecutive_points: usize,
        num_out_of: usize,
        num_std_dev: f64,
        #[serde(default)]
        mean: Option<f64>,
        #[serde(default)]
        seed_limit: usize,
        #[serde(default)]
        std_dev: Option<f64>,
    },
    /// See [`rule7`](crate::spc::rule7).
    Rule7 {
        num_consecutive_points: usize,
        num_std_dev: f64,
        #[serde(default)]
        mean: Option<f64>,
        #[serde(default)]
        seed_limit: usize,
        #[serde(default)]
        std_dev: Option<f64>,
    },
    /// See [`rule8`](crate::spc::rule8).
    Rule8 {
        num_consecutive_points: usize,
        num_std_dev: f64,
        #[serde(default)]
        mean: Option<f64>,
        #[serde(default)]
        seed_limit: usize,
        #[serde(default)]
        std_dev: Option<f64>,
    },
}

impl RuleConfig {
    /// Nelson's (1984) parameters for `rule`, estimating mean and sigma from the data.
    ///
    /// | Rule | Parameters                 |
    /// |------|----------------------------|
    /// | 1    | beyond 3 sigma             |
    /// | 2    | 9 on one side              |
    /// | 3    | 6 increasing or decreasing |
    /// | 4    | 14 alternating             |
    /// | 5    | 2 of 3 beyond 2 sigma      |
    /// | 6    | 4 of 5 beyond 1 sigma      |
    /// | 7    | 15 within 1 sigma          |
    /// | 8    | 8 beyond 1 sigma           |
    pub fn nelson(rule: RuleId) -> Self {
        match rule {
            RuleId::Rule1 => RuleConfig::Rule1 {
                num_std_dev: 3.0,
                mean: None,
                seed_limit: 0,
                std_dev: None,
            },
            RuleId::Rule2 => RuleConfig::Rule2 {
                num_consecutive_points: 9,
                seed_limit: 0,
                mean: None,
            },
            RuleId::Rule3 => RuleConfig::Rule3 {
                num_consecutive_points: 6,
                seed_limit: 0,
            },
            RuleId::Rule4 => RuleConfig::Rule4 {
                num_consecutive_points: 14,
                seed_limit: 0,
            },
            RuleId::Rule5 => RuleConfig::Rule5 {
                num_consecutive_points: 2,
                num_out_of: 3,
                num_std_dev: 2.0,
                mean: None,
                seed_limit: 0,
                std_dev: None,
            },
            RuleId::Rule6 => RuleConfig::Rule6 {
                num_consecutive_points: 4,
                num_out_of: 5,
                num_std_dev: 1.0,
                mean: None,
                seed_limit: 0,
                std_dev: None,
            },
            RuleId::Rule7 => RuleConfig::Rule7 {
                num_consecutive_points: 15,
                num_std_dev: 1.0,
                mean: None,
                seed_limit: 0,
                std_dev: None,
            },
            RuleId::Rule8 => RuleConfig::Rule8 {
                num_consecutive_points: 8,
                num_std_dev: 1.0,
                mean: None,
                seed_limit: 0,
                std_dev: None,
            },
        }
    }

    /// The rule this configuration evaluates.
    pub fn rule_id(&self) -> RuleId {
        match self {
            RuleConfig::Rule1 { .. } => RuleId::Rule1,
            RuleConfig::Rule2 { .. } => RuleId::Rule2,
            RuleConfig::Rule3 { .. } => RuleId::Rule3,
            RuleConfig::Rule4 { .. } => RuleId::Rule4,
            RuleConfig::Rule5 { .. } => RuleId::Rule5,
            RuleConfig::Rule6 { .. } => RuleId::Rule6,
            RuleConfig::Rule7 { .. } => RuleId::Rule7,
            RuleConfig::Rule8 { .. } => RuleId::Rule8,
        }
    }

    /// Runs the configured rule over `data`.
    pub fn evaluate(&self, data: &[f64]) -> Result<Vec<Violation>, RuleError> {
        match *self {
            RuleConfig::Rule1 {
                num_std_dev,
                mean,
                seed_limit,
                std_dev,
            } => rules::rule1(data, num_std_dev, mean, seed_limit, std_dev),
            RuleConfig::Rule2 {
                num_consecutive_points,
                seed_limit,
                mean,
            } => rules::rule2(data, num_consecutive_points, seed_limit, mean),
            RuleConfig::Rule3 {
                num_consecutive_points,
                seed_limit,
            } => rules::rule3(data, num_consecutive_points, seed_limit),
            RuleConfig::Rule4 {
                num_consecutive_points,
                seed_limit,
            } => rules::rule4(data, num_consecutive_points, seed_limit),
            RuleConfig::Rule5 {
                num_consecutive_points,
                num_out_of,
                num_std_dev,
                mean,
                seed_limit,
                std_dev,
            } => rules::rule5(
                data,
                num_consecutive_points,
                num_out_of,
                num_std_dev,
                mean,
                seed_limit,
                std_dev,
            ),
            RuleConfig::Rule6 {
                num_consecutive_points,
                num_out_of,
                num_std_dev,
                mean,
                seed_limit,
                std_dev,
            } => rules::rule6(
                data,
                num_consecutive_points,
                num_out_of,
                num_std_dev,
                mean,
                seed_limit,
                std_dev,
            ),
            RuleConfig::Rule7 {
                num_consecutive_points,
                num_std_dev,
                mean,
                seed_limit,
                std_dev,
            } => rules::rule7(data, num_consecutive_points, num_std_dev, mean, seed_limit, std_dev),
            RuleConfig::Rule8 {
                num_consecutive_points,
                num_std_dev,
                mean,
                seed_limit,
                std_dev,
            } => rules::rule8(data, num_consecutive_points, num_std_dev, mean, seed_limit, std_dev),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nelson_defaults_name_their_rule() {
        for rule in RuleId::ALL {
            assert_eq!(RuleConfig::nelson(rule).rule_id(), rule);
        }
    }

    #[test]
    fn test_nelson_rule3_detects_six_trend() {
        let config = RuleConfig::nelson(RuleId::Rule3);
        let v = config
            .evaluate(&[20.0, 21.0, 22.0, 23.0, 24.0, 25.0])
            .unwrap();
        assert_eq!(v, vec![Violation::new(5, 25.0)]);
    }

    #[test]
    fn test_nelson_rule2_needs_nine() {
        let config = RuleConfig::nelson(RuleId::Rule2);
        let mut data = vec![26.0; 8];
        data.extend([20.0, 20.0]);
        assert!(config.evaluate(&data).unwrap().is_empty());
    }

    #[test]
    fn test_evaluate_matches_direct_call() {
        let data = [27.0, 23.0, 27.0, 23.0, 27.0, 23.0, 27.0, 23.0, 25.0];
        let config = RuleConfig::Rule8 {
            num_consecutive_points: 8,
            num_std_dev: 1.0,
            mean: Some(25.0),
            seed_limit: 0,
            std_dev: Some(1.0),
        };
        assert_eq!(
            config.evaluate(&data),
            rules::rule8(&data, 8, 1.0, Some(25.0), 0, Some(1.0))
        );
    }

    #[test]
    fn test_evaluate_propagates_errors() {
        let config = RuleConfig::Rule3 {
            num_consecutive_points: 3,
            seed_limit: 4,
        };
        assert!(matches!(
            config.evaluate(&[1.0, 2.0]),
            Err(RuleError::SeedLimitOutOfRange { .. })
        ));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: RuleConfig =
            serde_json::from_str(r#"{ "rule": "rule7", "num_consecutive_points": 15, "num_std_dev": 1.0 }"#)
                .unwrap();
        assert_eq!(config, RuleConfig::nelson(RuleId::Rule7));
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = RuleConfig::Rule5 {
            num_consecutive_points: 2,
            num_out_of: 3,
            num_std_dev: 2.0,
            mean: Some(25.0),
            seed_limit: 1,
            std_dev: Some(1.5),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""rule":"rule5""#));
        let back: RuleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let result: Result<RuleConfig, _> =
            serde_json::from_str(r#"{ "rule": "rule9", "num_consecutive_points": 3 }"#);
        assert!(result.is_err());
    }
}
