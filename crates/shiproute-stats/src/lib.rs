//! Statistical summaries for the route search.
//!
//! - [`descriptive`]: min, max, mean, median and spread of a dataset, used to report the
//!   fitness distribution of each generation
//!
//! # Example
//!
//! ```
//! use shiproute_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod descriptive;
