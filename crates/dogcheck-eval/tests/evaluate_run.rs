use std::fs;
use std::path::{Path, PathBuf};

use dogcheck_core::{Architecture, DogNames};
use dogcheck_eval::{
    EvalError, EvaluateOptions, EvaluationEngine, MetricsReport, PredictionTable,
    collect_pet_labels,
};

const DOG_NAMES: &str = "beagle\n\
    walker hound, walker foxhound\n\
    great dane\n\
    boxer\n";

const PREDICTIONS: &str = "image,model,labels\n\
    Beagle_01125.jpg,vgg,beagle\n\
    Great_dane_05320.jpg,vgg,boxer\n\
    skunk_029.jpg,vgg,\"skunk, polecat, wood pussy\"\n\
    cat_01.jpg,vgg,\"walker hound, walker foxhound\"\n\
    Beagle_01125.jpg,resnet,\"Walker Hound, walker foxhound\"\n";

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("dogcheck_eval_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn pet_images() -> PathBuf {
    let dir = temp_dir("pets");
    for name in [
        "Beagle_01125.jpg",
        "Great_dane_05320.jpg",
        "skunk_029.jpg",
        "cat_01.jpg",
        ".DS_Store",
    ] {
        fs::write(dir.join(name), b"").expect("write image");
    }
    fs::create_dir_all(dir.join("nested")).expect("create nested dir");
    dir
}

fn item(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().into_owned()
}

#[test]
fn collects_labels_from_visible_files_only() {
    let dir = pet_images();
    let labels = collect_pet_labels(&dir).expect("collect labels");

    assert_eq!(labels.len(), 4);
    assert_eq!(labels[&item(&dir, "Beagle_01125.jpg")], "beagle");
    assert_eq!(labels[&item(&dir, "Great_dane_05320.jpg")], "great dane");
    assert!(!labels.contains_key(&item(&dir, ".DS_Store")));
}

#[test]
fn missing_image_dir_is_invalid_dataset() {
    let dir = std::env::temp_dir().join(format!("dogcheck_eval_missing_{}", uuid::Uuid::new_v4()));
    let err = collect_pet_labels(&dir).unwrap_err();
    assert!(matches!(err, EvalError::InvalidDataset(_)));
}

#[test]
fn evaluates_directory_and_writes_artifacts() {
    let dir = pet_images();
    let out_dir = temp_dir("out");
    let labels = collect_pet_labels(&dir).expect("collect labels");
    let predictions =
        PredictionTable::from_reader(PREDICTIONS.as_bytes()).expect("parse predictions");
    let dog_names = DogNames::parse(DOG_NAMES);

    let options = EvaluateOptions {
        print_incorrect_dogs: true,
        print_incorrect_breed: true,
        run_id: Some("test-run".to_string()),
        out_dir: Some(out_dir.clone()),
    };
    let result = EvaluationEngine::new(options)
        .run(&labels, &predictions, Architecture::Vgg, &dog_names)
        .expect("run evaluation");

    let stats = result.metrics.statistics;
    assert_eq!(stats.n_images, 4);
    assert_eq!(stats.n_dogs, 2);
    assert_eq!(stats.n_dogs_classified, 2);
    assert_eq!(stats.n_non_dogs_classified, 1);
    assert_eq!(stats.n_correct_breed, 1);
    assert_eq!(stats.n_label_matches, 2);
    assert_eq!(stats.pct_correct_dogs, 100.0);
    assert_eq!(stats.pct_correct_non_dogs, 50.0);
    assert_eq!(stats.pct_correct_breed, 0.5);
    assert_eq!(stats.pct_label_matches, 0.5);
    assert_eq!(result.metrics.mistakes.incorrect_dogs, 1);
    assert_eq!(result.metrics.mistakes.incorrect_breeds, 1);

    let metrics_path = result.metrics_path.expect("metrics path");
    let stored: MetricsReport =
        serde_json::from_str(&fs::read_to_string(metrics_path).expect("read metrics"))
            .expect("parse metrics");
    assert_eq!(stored, result.metrics);
    assert_eq!(stored.run_id, "test-run");

    let report = fs::read_to_string(result.report_path.expect("report path")).expect("read report");
    assert_eq!(report, result.report);
    assert!(report.contains("Mistakes were made!"));
    assert!(report.contains("cat_01.jpg is not a dog."));
    assert!(report.contains("is \"great dane\" not \"boxer\"."));

    let results = fs::read_to_string(result.results_path.expect("results path")).expect("read csv");
    let mut lines = results.lines();
    assert_eq!(
        lines.next(),
        Some("image,ground_truth_label,classifier_output,labels_match,ground_truth_is_dog,classifier_is_dog")
    );
    assert_eq!(lines.count(), 4);
}

#[test]
fn missing_prediction_fails_the_whole_batch() {
    let dir = pet_images();
    let out_dir = temp_dir("out_failed");
    let labels = collect_pet_labels(&dir).expect("collect labels");
    let predictions =
        PredictionTable::from_reader(PREDICTIONS.as_bytes()).expect("parse predictions");

    let options = EvaluateOptions {
        out_dir: Some(out_dir.clone()),
        ..EvaluateOptions::default()
    };
    let err = EvaluationEngine::new(options)
        .run(&labels, &predictions, Architecture::Resnet, &DogNames::parse(DOG_NAMES))
        .unwrap_err();

    assert!(matches!(
        err,
        EvalError::ClassifierFailure {
            model: Architecture::Resnet,
            ..
        }
    ));
    assert!(!out_dir.join("metrics.json").exists());
}
