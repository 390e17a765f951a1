use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use dogcheck_core::Architecture;
use serde::Deserialize;
use thiserror::Error;

use crate::errors::EvalError;

/// Failure reported by an image classifier.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ClassifierError {
    message: String,
}

impl ClassifierError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Opaque image classifier.
///
/// Returns a comma-separated list of label terms for one image, as produced
/// by the requested model.
pub trait ImageClassifier {
    fn classify(&self, image: &str, model: Architecture) -> Result<String, ClassifierError>;
}

impl<F> ImageClassifier for F
where
    F: Fn(&str, Architecture) -> Result<String, ClassifierError>,
{
    fn classify(&self, image: &str, model: Architecture) -> Result<String, ClassifierError> {
        self(image, model)
    }
}

#[derive(Debug, Deserialize)]
struct PredictionRow {
    image: String,
    model: Architecture,
    labels: String,
}

/// Classifier backed by previously recorded model output.
///
/// Loaded from a CSV file with an `image,model,labels` header. Images are
/// looked up by file name, so the same recording works for any directory.
#[derive(Debug, Clone, Default)]
pub struct PredictionTable {
    predictions: HashMap<(String, Architecture), String>,
}

impl PredictionTable {
    pub fn load(path: &Path) -> Result<Self, EvalError> {
        let file = std::fs::File::open(path).map_err(|err| {
            EvalError::InvalidDataset(format!(
                "cannot open predictions '{}': {err}",
                path.display()
            ))
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EvalError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let mut table = Self::default();
        for row in csv_reader.deserialize() {
            let row: PredictionRow = row?;
            table.insert(&row.image, row.model, row.labels);
        }
        Ok(table)
    }

    pub fn insert(&mut self, image: &str, model: Architecture, labels: impl Into<String>) {
        self.predictions
            .insert((image_key(image), model), labels.into());
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

impl ImageClassifier for PredictionTable {
    fn classify(&self, image: &str, model: Architecture) -> Result<String, ClassifierError> {
        let key = image_key(image);
        self.predictions
            .get(&(key, model))
            .cloned()
            .ok_or_else(|| ClassifierError::new(format!("no recorded {model} prediction")))
    }
}

fn image_key(image: &str) -> String {
    Path::new(image)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDED: &str = "image,model,labels\n\
        Beagle_01.jpg,vgg,\"beagle\"\n\
        Beagle_01.jpg,resnet,\"walker hound, walker foxhound\"\n\
        skunk_02.jpg,vgg,\"skunk, polecat, wood pussy\"\n";

    #[test]
    fn looks_up_by_file_name_and_model() {
        let table = PredictionTable::from_reader(RECORDED.as_bytes()).expect("parse predictions");
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.classify("pet_images/Beagle_01.jpg", Architecture::Vgg).unwrap(),
            "beagle"
        );
        assert_eq!(
            table.classify("Beagle_01.jpg", Architecture::Resnet).unwrap(),
            "walker hound, walker foxhound"
        );
    }

    #[test]
    fn missing_prediction_is_a_classifier_error() {
        let table = PredictionTable::from_reader(RECORDED.as_bytes()).expect("parse predictions");
        let err = table
            .classify("skunk_02.jpg", Architecture::Alexnet)
            .unwrap_err();
        assert_eq!(err.to_string(), "no recorded alexnet prediction");
    }

    #[test]
    fn rejects_unknown_model_column() {
        let data = "image,model,labels\ncat.jpg,inception,tabby\n";
        let err = PredictionTable::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, EvalError::Csv(_)));
    }

    #[test]
    fn closures_act_as_classifiers() {
        let classifier = |image: &str, model: Architecture| -> Result<String, ClassifierError> {
            Ok(format!("{image} via {model}"))
        };
        assert_eq!(
            classifier.classify("a.jpg", Architecture::Alexnet).unwrap(),
            "a.jpg via alexnet"
        );
    }
}
