//! Summary statistics reduced from a [`ResultTable`].
//!
//! Two conventions coexist and are kept on purpose. `pct_correct_dogs` and
//! `pct_correct_non_dogs` are percentages (x100) and fall back to `0.0` when
//! their denominator is zero. `pct_correct_breed` and `pct_label_matches` are
//! plain fractions in `[0, 1]` and fail with [`Error::DivisionByZero`] on a
//! zero denominator, so degenerate runs are not reported as 0%.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::ResultTable;

/// Raw counters from a single pass over the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResultCounts {
    pub n_images: u64,
    pub n_dogs: u64,
    pub n_dogs_classified: u64,
    pub n_non_dogs_classified: u64,
    pub n_correct_breed: u64,
    pub n_label_matches: u64,
}

impl ResultCounts {
    pub fn n_non_dogs(&self) -> u64 {
        self.n_images - self.n_dogs
    }

    /// Share of dogs the classifier also called a dog, x100.
    pub fn pct_correct_dogs(&self) -> f64 {
        if self.n_dogs > 0 {
            self.n_dogs_classified as f64 / self.n_dogs as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Share of non-dogs the classifier also called a non-dog, x100.
    pub fn pct_correct_non_dogs(&self) -> f64 {
        if self.n_images != self.n_dogs {
            self.n_non_dogs_classified as f64 / self.n_non_dogs() as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Fraction of dogs whose breed label matched.
    pub fn pct_correct_breed(&self) -> Result<f64> {
        ratio(self.n_correct_breed, self.n_dogs, "pct_correct_breed")
    }

    /// Fraction of all images whose label matched.
    pub fn pct_label_matches(&self) -> Result<f64> {
        ratio(self.n_label_matches, self.n_images, "pct_label_matches")
    }
}

fn ratio(numerator: u64, denominator: u64, statistic: &'static str) -> Result<f64> {
    if denominator == 0 {
        return Err(Error::DivisionByZero { statistic });
    }
    Ok(numerator as f64 / denominator as f64)
}

/// Count every statistic in one pass. Never fails.
pub fn tally(table: &ResultTable) -> ResultCounts {
    let mut counts = ResultCounts::default();
    for record in table.records() {
        counts.n_images += 1;
        let agree = record.dog_agreement();
        if record.ground_truth_is_dog {
            counts.n_dogs += 1;
            if agree {
                counts.n_dogs_classified += 1;
            }
            if record.labels_match {
                counts.n_correct_breed += 1;
            }
        } else if agree {
            counts.n_non_dogs_classified += 1;
        }

        if record.labels_match {
            counts.n_label_matches += 1;
        }
    }
    counts
}

/// Full statistics set for a finished table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryStatistics {
    pub n_images: u64,
    pub n_dogs: u64,
    pub n_dogs_classified: u64,
    pub n_non_dogs_classified: u64,
    pub n_correct_breed: u64,
    pub n_label_matches: u64,
    /// Percentage (0-100).
    pub pct_correct_dogs: f64,
    /// Percentage (0-100).
    pub pct_correct_non_dogs: f64,
    /// Fraction (0-1).
    pub pct_correct_breed: f64,
    /// Fraction (0-1).
    pub pct_label_matches: f64,
}

impl SummaryStatistics {
    pub fn from_counts(counts: &ResultCounts) -> Result<Self> {
        Ok(Self {
            n_images: counts.n_images,
            n_dogs: counts.n_dogs,
            n_dogs_classified: counts.n_dogs_classified,
            n_non_dogs_classified: counts.n_non_dogs_classified,
            n_correct_breed: counts.n_correct_breed,
            n_label_matches: counts.n_label_matches,
            pct_correct_dogs: counts.pct_correct_dogs(),
            pct_correct_non_dogs: counts.pct_correct_non_dogs(),
            pct_correct_breed: counts.pct_correct_breed()?,
            pct_label_matches: counts.pct_label_matches()?,
        })
    }

    pub fn n_non_dogs(&self) -> u64 {
        self.n_images - self.n_dogs
    }

    /// True when the classifier got dog / not-dog wrong for any image.
    pub fn has_dog_mistakes(&self) -> bool {
        self.n_dogs != self.n_dogs_classified || self.n_non_dogs() != self.n_non_dogs_classified
    }

    /// Statistic names and values in their fixed order.
    pub fn entries(&self) -> [(&'static str, f64); 10] {
        [
            ("n_images", self.n_images as f64),
            ("n_dogs", self.n_dogs as f64),
            ("n_dogs_classified", self.n_dogs_classified as f64),
            ("n_non_dogs_classified", self.n_non_dogs_classified as f64),
            ("n_correct_breed", self.n_correct_breed as f64),
            ("n_label_matches", self.n_label_matches as f64),
            ("pct_correct_dogs", self.pct_correct_dogs),
            ("pct_correct_non_dogs", self.pct_correct_non_dogs),
            ("pct_correct_breed", self.pct_correct_breed),
            ("pct_label_matches", self.pct_label_matches),
        ]
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// Reduce a complete table to its summary statistics.
///
/// Pure and repeatable. Fails when there are no dogs or no images, because
/// the two fractional statistics are undefined in that case.
pub fn summarize(table: &ResultTable) -> Result<SummaryStatistics> {
    SummaryStatistics::from_counts(&tally(table))
}
