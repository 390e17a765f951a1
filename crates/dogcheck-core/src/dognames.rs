//! Reference dog name set and the dog / not-dog decisions built on it.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::labels::{classifier_terms, normalize_label};

/// Normalized, read-only set of names that denote dogs.
///
/// Each line of the reference source may carry several comma-separated
/// synonyms; every one of them becomes its own member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DogNames {
    names: HashSet<String>,
}

impl DogNames {
    /// Load the set from a newline-delimited file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| Error::ResourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::parse(&contents))
    }

    /// Parse the set from the contents of a reference source.
    pub fn parse(contents: &str) -> Self {
        contents
            .lines()
            .flat_map(|line| line.split(','))
            .collect()
    }

    /// Exact membership test on an already normalized name.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for DogNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let names = iter
            .into_iter()
            .map(|name| normalize_label(name.as_ref()))
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }
}

/// True iff the normalized label is an exact member of `dog_names`.
///
/// Stricter than label matching: no substring search is done here.
pub fn is_dog(label: &str, dog_names: &DogNames) -> bool {
    dog_names.contains(&normalize_label(label))
}

/// True iff any term of a multi-term classifier output is a dog name.
pub fn is_dog_in_output(classifier_output: &str, dog_names: &DogNames) -> bool {
    classifier_terms(classifier_output).any(|term| dog_names.contains(&term))
}
