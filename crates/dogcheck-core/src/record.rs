use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dognames::{DogNames, is_dog, is_dog_in_output};
use crate::labels::labels_match;

/// Outcome of evaluating one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResultRecord {
    /// Ground-truth label derived from the image file name.
    pub ground_truth_label: String,
    /// Raw, possibly multi-term, classifier output.
    pub classifier_output: String,
    /// Ground truth found in at least one classifier term.
    pub labels_match: bool,
    /// Ground truth is a known dog name.
    pub ground_truth_is_dog: bool,
    /// At least one classifier term is a known dog name.
    pub classifier_is_dog: bool,
}

impl ResultRecord {
    /// Ground truth and classifier agree on dog / not-dog.
    pub fn dog_agreement(&self) -> bool {
        self.ground_truth_is_dog == self.classifier_is_dog
    }

    /// Dog / not-dog agrees but the labels themselves do not match.
    pub fn is_breed_mismatch(&self) -> bool {
        self.dog_agreement() && !self.labels_match
    }
}

/// Build the full record for one image.
pub fn build_record(
    ground_truth_label: &str,
    classifier_output: &str,
    dog_names: &DogNames,
) -> ResultRecord {
    let ground_truth_label = ground_truth_label.trim();
    ResultRecord {
        ground_truth_label: ground_truth_label.to_string(),
        classifier_output: classifier_output.to_string(),
        labels_match: labels_match(ground_truth_label, classifier_output),
        ground_truth_is_dog: is_dog(ground_truth_label, dog_names),
        classifier_is_dog: is_dog_in_output(classifier_output, dog_names),
    }
}

/// Records keyed by item reference, iterated in sorted key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultTable {
    records: BTreeMap<String, ResultRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the record for `item`, returning any record it replaces.
    pub fn insert(
        &mut self,
        item: impl Into<String>,
        record: ResultRecord,
    ) -> Option<ResultRecord> {
        self.records.insert(item.into(), record)
    }

    pub fn get(&self, item: &str) -> Option<&ResultRecord> {
        self.records.get(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResultRecord)> {
        self.records.iter().map(|(item, record)| (item.as_str(), record))
    }

    pub fn records(&self) -> impl Iterator<Item = &ResultRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ResultRecord)> for ResultTable {
    fn from_iter<I: IntoIterator<Item = (K, ResultRecord)>>(iter: I) -> Self {
        let records = iter
            .into_iter()
            .map(|(item, record)| (item.into(), record))
            .collect();
        Self { records }
    }
}
