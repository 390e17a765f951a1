//! Evaluation engine for dogcheck runs.
//!
//! Wires the pure core logic to its I/O boundaries: pet image enumeration,
//! the classifier, metrics and report artifacts.

pub mod classifier;
pub mod engine;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod pets;
pub mod report;

pub use classifier::{ClassifierError, ImageClassifier, PredictionTable};
pub use engine::{EvaluationEngine, classify_images, find_mistakes};
pub use errors::EvalError;
pub use metrics::{METRICS_VERSION, MetricsReport, MistakeCounts, PerformanceMetrics};
pub use model::{EvaluateOptions, EvaluationResult, Mistake, MistakeKind};
pub use pets::{PetLabels, collect_pet_labels};
pub use report::{format_elapsed, render_comparison, render_report};
