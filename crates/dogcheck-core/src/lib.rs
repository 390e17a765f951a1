//! Core contracts and helpers for dogcheck.
//!
//! This crate holds the pure evaluation logic: label matching, dog name
//! classification, per-image result records and the summary statistics
//! reduced from them. It performs no I/O beyond loading the dog names file.

pub mod architecture;
pub mod dognames;
pub mod error;
pub mod labels;
pub mod record;
pub mod stats;

pub use architecture::Architecture;
pub use dognames::{DogNames, is_dog, is_dog_in_output};
pub use error::{Error, Result};
pub use labels::{classifier_terms, labels_match, normalize_label, pet_label_from_filename};
pub use record::{ResultRecord, ResultTable, build_record};
pub use stats::{ResultCounts, SummaryStatistics, summarize, tally};
