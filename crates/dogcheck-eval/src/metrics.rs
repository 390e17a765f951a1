use dogcheck_core::{Architecture, SummaryStatistics};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metrics contract version for evaluation runs.
pub const METRICS_VERSION: &str = "0.1";

/// Machine-readable metrics for one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricsReport {
    pub metrics_version: String,
    pub run_id: String,
    pub model: Architecture,
    /// Number of names in the reference dog name set.
    pub dog_names: u64,
    pub statistics: SummaryStatistics,
    pub mistakes: MistakeCounts,
    pub performance: PerformanceMetrics,
}

/// Number of flagged images per mistake kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MistakeCounts {
    pub incorrect_dogs: u64,
    pub incorrect_breeds: u64,
}

/// Performance timings for the evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceMetrics {
    pub classify_ms: u64,
    pub summarize_ms: u64,
    pub total_ms: u64,
}
