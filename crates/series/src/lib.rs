//! Axis series construction for the dayaxis system.
//!
//! This crate handles:
//! - The calendar day walk and its per-granularity strategies
//! - Weekly and monthly bucket averaging
//! - Compact axis labels
//! - Assembly of the indexed result

pub mod bucketizer;
pub mod labels;
pub mod result_index;
pub mod strategy;

pub use bucketizer::Bucketizer;
pub use labels::{LabelBuilder, LabelFields};
pub use result_index::ResultIndex;
pub use strategy::{strategy_for, BucketAccumulator, BucketStrategy, Emission};
