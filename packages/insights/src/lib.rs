#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation and ranking pipeline for neighborhood insights.
//!
//! Given an address, the [`aggregator::InsightAggregator`] geocodes it
//! once, fans out one proximity query per configured amenity category
//! (plus a nearest-of-type query for hospitals and subway stations),
//! ranks each category's results, truncates to the configured top-N, and
//! folds everything into a multi-section
//! [`nearby_insights_models::InsightReport`].
//!
//! Per-category provider failures degrade to empty sections; only a
//! geocoding failure fails the whole run.

pub mod aggregator;
pub mod plan;
pub mod rank;
pub mod summary;

pub use aggregator::{AggregatorConfig, InsightAggregator};
pub use plan::CategoryPlan;
