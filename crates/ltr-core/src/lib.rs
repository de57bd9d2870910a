//! Core library for ltr.
//!
//! Splits text into graphemes, words, or sentences with locale-aware Unicode
//! rules, then folds, counts, deduplicates, sorts, and reverses the units
//! into a newline-separated report.
//!
//! # Modules
//!
//! - [`segment`] - Unicode segmentation and per-kind filtering
//! - [`aggregate`] - The aggregation stages and [`Aggregator`]
//! - [`pipeline`] - One invocation over many sources
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use ltr_core::{AggregationOptions, pipeline};
//!
//! let options = AggregationOptions {
//!     count: true,
//!     sort: true,
//!     ..Default::default()
//! };
//! let report = pipeline::run("words", options, &["a a b"]).unwrap();
//! assert_eq!(report, "a\t2\nb\t1");
//! ```
#![deny(unsafe_code)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod fold;
pub mod locale;
pub mod pipeline;
pub mod segment;
pub mod unit;

pub use aggregate::{AggregationOptions, Aggregator, CountEntry};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, LtrError, Result};
pub use pipeline::Pipeline;
pub use segment::Segmenter;
pub use unit::UnitKind;

/// Default cap on bytes read from any one input: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
