use std::path::{Path, PathBuf};
use std::time::Instant;

use dogcheck_core::{Architecture, DogNames, ResultTable, build_record, summarize};
use serde::Serialize;

use crate::classifier::ImageClassifier;
use crate::errors::EvalError;
use crate::metrics::{METRICS_VERSION, MetricsReport, MistakeCounts, PerformanceMetrics};
use crate::model::{EvaluateOptions, EvaluationResult, Mistake, MistakeKind};
use crate::pets::PetLabels;
use crate::report::render_report;

/// Evaluate a classifier against ground-truth pet labels.
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngine {
    options: EvaluateOptions,
}

impl EvaluationEngine {
    pub fn new(options: EvaluateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EvaluateOptions {
        &self.options
    }

    /// Classify every image, summarize, render the report and write the
    /// artifacts when an output directory is configured.
    ///
    /// Any classifier failure aborts the whole batch.
    pub fn run<C: ImageClassifier + ?Sized>(
        &self,
        pet_labels: &PetLabels,
        classifier: &C,
        model: Architecture,
        dog_names: &DogNames,
    ) -> Result<EvaluationResult, EvalError> {
        let total_start = Instant::now();
        tracing::info!(
            event = "evaluation_started",
            model = %model,
            images = pet_labels.len(),
            dog_names = dog_names.len()
        );

        let classify_start = Instant::now();
        let table = classify_images(pet_labels, classifier, model, dog_names)?;
        let classify_ms = elapsed_ms(classify_start);

        let summarize_start = Instant::now();
        let statistics = summarize(&table)?;
        let summarize_ms = elapsed_ms(summarize_start);

        let mistakes = find_mistakes(&table);
        for mistake in &mistakes {
            tracing::debug!(
                event = "mistake",
                kind = ?mistake.kind,
                image = %mistake.image,
                ground_truth = %mistake.record.ground_truth_label,
                classifier = %mistake.record.classifier_output
            );
        }

        let metrics = MetricsReport {
            metrics_version: METRICS_VERSION.to_string(),
            run_id: self
                .options
                .run_id
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            model,
            dog_names: dog_names.len() as u64,
            statistics,
            mistakes: count_mistakes(&mistakes),
            performance: PerformanceMetrics {
                classify_ms,
                summarize_ms,
                total_ms: elapsed_ms(total_start),
            },
        };

        let report = render_report(&metrics, &mistakes, &self.options);

        let (metrics_path, report_path, results_path) = match &self.options.out_dir {
            Some(out_dir) => {
                let (metrics_path, report_path, results_path) =
                    write_artifacts(out_dir, &metrics, &report, &table)?;
                (Some(metrics_path), Some(report_path), Some(results_path))
            }
            None => (None, None, None),
        };

        tracing::info!(
            event = "evaluation_finished",
            model = %model,
            images = statistics.n_images,
            dogs = statistics.n_dogs,
            pct_correct_dogs = statistics.pct_correct_dogs,
            pct_correct_non_dogs = statistics.pct_correct_non_dogs,
            duration_ms = metrics.performance.total_ms
        );

        Ok(EvaluationResult {
            table,
            metrics,
            mistakes,
            report,
            metrics_path,
            report_path,
            results_path,
        })
    }
}

/// Build the result table by classifying each labelled image once.
pub fn classify_images<C: ImageClassifier + ?Sized>(
    pet_labels: &PetLabels,
    classifier: &C,
    model: Architecture,
    dog_names: &DogNames,
) -> Result<ResultTable, EvalError> {
    let mut table = ResultTable::new();
    for (image, label) in pet_labels {
        let output =
            classifier
                .classify(image, model)
                .map_err(|source| EvalError::ClassifierFailure {
                    image: image.clone(),
                    model,
                    source,
                })?;
        let record = build_record(label, &output, dog_names);
        tracing::debug!(
            event = "image_classified",
            image = %image,
            labels_match = record.labels_match,
            ground_truth_is_dog = record.ground_truth_is_dog,
            classifier_is_dog = record.classifier_is_dog
        );
        table.insert(image.clone(), record);
    }
    Ok(table)
}

/// Flag images where dog / not-dog disagrees, then images where only the
/// breed label is wrong. Each group keeps the table's item order.
pub fn find_mistakes(table: &ResultTable) -> Vec<Mistake> {
    let flagged = |kind: MistakeKind| {
        table
            .iter()
            .filter(move |(_, record)| match kind {
                MistakeKind::IncorrectDog => !record.dog_agreement(),
                MistakeKind::IncorrectBreed => record.is_breed_mismatch(),
            })
            .map(move |(image, record)| Mistake {
                kind,
                image: image.to_string(),
                record: record.clone(),
            })
    };

    flagged(MistakeKind::IncorrectDog)
        .chain(flagged(MistakeKind::IncorrectBreed))
        .collect()
}

fn count_mistakes(mistakes: &[Mistake]) -> MistakeCounts {
    let mut counts = MistakeCounts::default();
    for mistake in mistakes {
        match mistake.kind {
            MistakeKind::IncorrectDog => counts.incorrect_dogs += 1,
            MistakeKind::IncorrectBreed => counts.incorrect_breeds += 1,
        }
    }
    counts
}

#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    image: &'a str,
    ground_truth_label: &'a str,
    classifier_output: &'a str,
    labels_match: bool,
    ground_truth_is_dog: bool,
    classifier_is_dog: bool,
}

fn write_artifacts(
    out_dir: &Path,
    metrics: &MetricsReport,
    report: &str,
    table: &ResultTable,
) -> Result<(PathBuf, PathBuf, PathBuf), EvalError> {
    std::fs::create_dir_all(out_dir)?;

    let metrics_path = out_dir.join("metrics.json");
    std::fs::write(&metrics_path, serde_json::to_vec_pretty(metrics)?)?;

    let report_path = out_dir.join("report.md");
    std::fs::write(&report_path, report.as_bytes())?;

    let results_path = out_dir.join("results.csv");
    let mut writer = csv::Writer::from_path(&results_path)?;
    for (image, record) in table.iter() {
        writer.serialize(ResultRow {
            image,
            ground_truth_label: &record.ground_truth_label,
            classifier_output: &record.classifier_output,
            labels_match: record.labels_match,
            ground_truth_is_dog: record.ground_truth_is_dog,
            classifier_is_dog: record.classifier_is_dog,
        })?;
    }
    writer.flush()?;

    Ok((metrics_path, report_path, results_path))
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
