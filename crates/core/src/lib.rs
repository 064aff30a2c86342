//! Core types and configuration for the dayaxis system.
//!
//! This crate provides shared types used across all other crates:
//! - Calendar dates, raw rows, price bars and axis points
//! - Granularity and label configuration
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{AxisConfig, CompatMode, FieldVisibility, Granularity, LabelConfig};
pub use error::{Error, Result};
pub use types::*;
