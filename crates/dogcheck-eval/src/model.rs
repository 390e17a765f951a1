use std::path::PathBuf;

use dogcheck_core::{ResultRecord, ResultTable};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::metrics::MetricsReport;

/// Options for a single evaluation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluateOptions {
    /// List images whose dog / not-dog call was wrong.
    pub print_incorrect_dogs: bool,
    /// List dog images whose breed label did not match.
    pub print_incorrect_breed: bool,
    /// Run identifier recorded in the metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// Directory for metrics.json, report.md and results.csv. Nothing is
    /// written when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

/// Kind of misclassification flagged for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MistakeKind {
    /// Ground truth and classifier disagree on dog / not-dog.
    IncorrectDog,
    /// Both agree on dog / not-dog but the labels do not match.
    IncorrectBreed,
}

/// A flagged image with its full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mistake {
    pub kind: MistakeKind,
    pub image: String,
    pub record: ResultRecord,
}

/// Result of an evaluation run.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub table: ResultTable,
    pub metrics: MetricsReport,
    pub mistakes: Vec<Mistake>,
    pub report: String,
    pub metrics_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub results_path: Option<PathBuf>,
}
