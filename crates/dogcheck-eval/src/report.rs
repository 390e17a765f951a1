use crate::metrics::MetricsReport;
use crate::model::{EvaluateOptions, Mistake, MistakeKind};

/// Render a deterministic markdown report for one run.
///
/// `pct_correct_dogs` and `pct_correct_non_dogs` are percentages, while
/// `pct_correct_breed` and `pct_label_matches` are fractions; the report
/// labels each with its unit rather than rescaling.
pub fn render_report(
    metrics: &MetricsReport,
    mistakes: &[Mistake],
    options: &EvaluateOptions,
) -> String {
    let stats = &metrics.statistics;
    let mut lines = Vec::new();

    lines.push("# Dogcheck Evaluation Report".to_string());
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- run_id: {}", metrics.run_id));
    lines.push(format!("- model: {}", metrics.model));
    lines.push(format!("- dog_names: {}", metrics.dog_names));
    lines.push(format!(
        "- elapsed: {}",
        format_elapsed(metrics.performance.total_ms)
    ));
    lines.push(String::new());

    lines.push("## Counts".to_string());
    lines.push("| statistic | value |".to_string());
    lines.push("| --- | --- |".to_string());
    lines.push(format!("| images | {} |", stats.n_images));
    lines.push(format!("| dogs | {} |", stats.n_dogs));
    lines.push(format!("| non_dogs | {} |", stats.n_non_dogs()));
    lines.push(format!("| dogs_classified | {} |", stats.n_dogs_classified));
    lines.push(format!(
        "| non_dogs_classified | {} |",
        stats.n_non_dogs_classified
    ));
    lines.push(format!("| correct_breed | {} |", stats.n_correct_breed));
    lines.push(format!("| label_matches | {} |", stats.n_label_matches));
    lines.push(String::new());

    lines.push("## Accuracy".to_string());
    lines.push("| statistic | value | unit |".to_string());
    lines.push("| --- | --- | --- |".to_string());
    lines.push(format!(
        "| pct_correct_dogs | {:.2} | percent |",
        stats.pct_correct_dogs
    ));
    lines.push(format!(
        "| pct_correct_non_dogs | {:.2} | percent |",
        stats.pct_correct_non_dogs
    ));
    lines.push(format!(
        "| pct_correct_breed | {:.4} | fraction |",
        stats.pct_correct_breed
    ));
    lines.push(format!(
        "| pct_label_matches | {:.4} | fraction |",
        stats.pct_label_matches
    ));

    if options.print_incorrect_dogs || options.print_incorrect_breed {
        lines.push(String::new());
        lines.push("## Mistakes".to_string());
        if stats.has_dog_mistakes() {
            lines.push("Mistakes were made!".to_string());
        } else {
            lines.push("No dog / not-dog mistakes.".to_string());
        }
        for mistake in mistakes {
            match mistake.kind {
                MistakeKind::IncorrectDog if options.print_incorrect_dogs => {
                    lines.push(incorrect_dog_line(mistake))
                }
                MistakeKind::IncorrectBreed if options.print_incorrect_breed => {
                    lines.push(incorrect_breed_line(mistake))
                }
                _ => {}
            }
        }
    }

    lines.join("\n")
}

fn incorrect_dog_line(mistake: &Mistake) -> String {
    let record = &mistake.record;
    let truth = if record.ground_truth_is_dog {
        "a dog"
    } else {
        "not a dog"
    };
    format!(
        "- Incorrect! {} is {}. ground_truth=\"{}\" classifier=\"{}\"",
        mistake.image, truth, record.ground_truth_label, record.classifier_output
    )
}

fn incorrect_breed_line(mistake: &Mistake) -> String {
    let record = &mistake.record;
    format!(
        "- Incorrect breed! {} is \"{}\" not \"{}\".",
        mistake.image, record.ground_truth_label, record.classifier_output
    )
}

/// Render one row per model for runs over the same images.
pub fn render_comparison(runs: &[MetricsReport]) -> String {
    let mut lines = Vec::new();
    lines.push("# Dogcheck Architecture Comparison".to_string());
    lines.push(String::new());
    lines.push(
        "| model | images | dogs | pct_correct_dogs | pct_correct_non_dogs | pct_correct_breed | pct_label_matches | elapsed |"
            .to_string(),
    );
    lines.push("| --- | --- | --- | --- | --- | --- | --- | --- |".to_string());
    for run in runs {
        let stats = &run.statistics;
        lines.push(format!(
            "| {} | {} | {} | {:.2} | {:.2} | {:.4} | {:.4} | {} |",
            run.model,
            stats.n_images,
            stats.n_dogs,
            stats.pct_correct_dogs,
            stats.pct_correct_non_dogs,
            stats.pct_correct_breed,
            stats.pct_label_matches,
            format_elapsed(run.performance.total_ms)
        ));
    }
    lines.join("\n")
}

/// Format a millisecond duration as `hh:mm:ss`.
pub fn format_elapsed(total_ms: u64) -> String {
    let total_secs = total_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{METRICS_VERSION, MistakeCounts, PerformanceMetrics};
    use dogcheck_core::{Architecture, DogNames, ResultTable, build_record, summarize};

    fn fixture() -> (MetricsReport, Vec<Mistake>) {
        let names = DogNames::parse("beagle\ngreat dane\nboxer\n");
        let table: ResultTable = [
            ("pets/beagle.jpg", build_record("beagle", "beagle", &names)),
            ("pets/dane.jpg", build_record("great dane", "boxer", &names)),
            ("pets/cat.jpg", build_record("cat", "beagle", &names)),
        ]
        .into_iter()
        .collect();
        let mistakes = crate::engine::find_mistakes(&table);
        let metrics = MetricsReport {
            metrics_version: METRICS_VERSION.to_string(),
            run_id: "run-1".to_string(),
            model: Architecture::Alexnet,
            dog_names: names.len() as u64,
            statistics: summarize(&table).expect("summarize"),
            mistakes: MistakeCounts {
                incorrect_dogs: 1,
                incorrect_breeds: 1,
            },
            performance: PerformanceMetrics {
                classify_ms: 10,
                summarize_ms: 0,
                total_ms: 3_723_000,
            },
        };
        (metrics, mistakes)
    }

    #[test]
    fn formats_elapsed_as_hours_minutes_seconds() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(61_999), "00:01:01");
        assert_eq!(format_elapsed(3_723_000), "01:02:03");
    }

    #[test]
    fn report_labels_units_and_counts() {
        let (metrics, mistakes) = fixture();
        let report = render_report(&metrics, &mistakes, &EvaluateOptions::default());

        assert!(report.contains("- model: alexnet"));
        assert!(report.contains("- elapsed: 01:02:03"));
        assert!(report.contains("| non_dogs | 1 |"));
        assert!(report.contains("| pct_correct_dogs | 100.00 | percent |"));
        assert!(report.contains("| pct_correct_non_dogs | 0.00 | percent |"));
        assert!(report.contains("| pct_correct_breed | 0.5000 | fraction |"));
        assert!(!report.contains("## Mistakes"));
    }

    #[test]
    fn report_lists_only_requested_mistakes() {
        let (metrics, mistakes) = fixture();
        let options = EvaluateOptions {
            print_incorrect_dogs: true,
            ..EvaluateOptions::default()
        };
        let report = render_report(&metrics, &mistakes, &options);

        assert!(report.contains("Mistakes were made!"));
        assert!(report.contains("- Incorrect! pets/cat.jpg is not a dog."));
        assert!(!report.contains("Incorrect breed!"));

        let options = EvaluateOptions {
            print_incorrect_breed: true,
            ..EvaluateOptions::default()
        };
        let report = render_report(&metrics, &mistakes, &options);
        assert!(
            report.contains("- Incorrect breed! pets/dane.jpg is \"great dane\" not \"boxer\".")
        );
        assert!(!report.contains("- Incorrect! "));
    }

    #[test]
    fn comparison_has_one_row_per_model() {
        let (metrics, _) = fixture();
        let mut resnet = metrics.clone();
        resnet.model = Architecture::Resnet;
        let table = render_comparison(&[metrics, resnet]);

        let rows: Vec<&str> = table
            .lines()
            .filter(|line| line.starts_with("| alexnet") || line.starts_with("| resnet"))
            .collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("| 3 | 2 | 100.00 | 0.00 | 0.5000 | 0.3333 | 01:02:03 |"));
    }
}
