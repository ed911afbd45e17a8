//! # u-nelson
//!
//! Nelson run rules for statistical process control (SPC).
//!
//! Given an ordered sequence of process measurements, each detector reports
//! the positions and values of samples that complete a non-random pattern:
//! points beyond a sigma band, runs on one side of the mean, trends,
//! alternation, clustering near or away from the centre line.
//!
//! The crate is domain-agnostic: it operates on raw `f64` slices and knows
//! nothing about charts, machines or units. Every detector is a pure
//! function; nothing is retained between calls.
//!
//! ## Modules
//!
//! - [`spc`] — The eight rule detectors, traversal strategies and rule configuration
//! - [`stats`] — Sample mean and Bessel-corrected standard deviation
//! - [`error`] — [`RuleError`], raised before any scanning on invalid input
//!
//! ## Example
//!
//! ```
//! use u_nelson::spc::{rule1, rule2};
//!
//! let data = [10.0, 10.0, 10.0, 10.0, 100.0];
//! let beyond = rule1(&data, 1.0, None, 0, None).unwrap();
//! assert_eq!(beyond[0].index, 4);
//!
//! let runs = rule2(&[1.0, 1.0, 1.0, 5.0, 5.0, 5.0], 3, 0, Some(2.5)).unwrap();
//! assert_eq!(runs.len(), 2);
//! ```
//!
//! ## Logging
//!
//! Detectors emit `tracing` events (`debug` per call, `trace` per match).
//! Install a subscriber to see them; the crate never installs one.

pub mod error;
pub mod spc;
pub mod stats;

pub use error::RuleError;
