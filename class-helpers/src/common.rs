use ndarray::{Array1, ArrayView1};
use std::fmt::Debug;
use std::hash::Hash;

use crate::{DataError, Float};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// One observation: an ordered, fixed-length list of real values.
pub type FeatureVector<F> = Array1<F>;

/// A feature vector together with the category code(s) observed for it.
///
/// L: The type of the label (e.g., i32, String, enum).
/// F: The float type for the features (e.g., f32, f64).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    features: FeatureVector<F>,
    labels: Vec<L>,
}

impl<L, F> LabeledSample<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    /// Builds a sample carrying several labels.
    ///
    /// # Errors
    ///
    /// Returns `DataError::EmptyLabels` when `labels` is empty.
    pub fn new(features: FeatureVector<F>, labels: Vec<L>) -> Result<Self, DataError> {
        if labels.is_empty() {
            return Err(DataError::EmptyLabels { index: 0 });
        }
        Ok(Self { features, labels })
    }

    /// Builds a sample with exactly one label.
    pub fn single(features: FeatureVector<F>, label: L) -> Self {
        Self {
            features,
            labels: vec![label],
        }
    }

    pub fn features(&self) -> ArrayView1<'_, F> {
        self.features.view()
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn arity(&self) -> usize {
        self.features.len()
    }
}

/// An ordered collection of labeled samples.
///
/// Insertion order is kept and is meaningful: nearest-neighbour searches
/// resolve equidistant samples in favour of the earlier one.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    samples: Vec<LabeledSample<L, F>>,
}

impl<L, F> TrainingSet<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    pub fn push(&mut self, sample: LabeledSample<L, F>) {
        self.samples.push(sample);
    }

    /// Appends a single-label sample.
    pub fn add(&mut self, features: FeatureVector<F>, label: L) {
        self.samples.push(LabeledSample::single(features, label));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[LabeledSample<L, F>] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabeledSample<L, F>> {
        self.samples.iter()
    }

    /// Checks that the set can be trained on and returns the common arity.
    ///
    /// # Errors
    ///
    /// * `DataError::EmptyTrainingSet` if there are no samples.
    /// * `DataError::InconsistentArity` for the first sample whose length
    ///   differs from the first sample's.
    /// * `DataError::EmptyLabels` for a sample without labels (only reachable
    ///   through deserialization).
    pub fn validate(&self) -> Result<usize, DataError> {
        let first = self.samples.first().ok_or(DataError::EmptyTrainingSet)?;
        let expected = first.arity();
        for (index, sample) in self.samples.iter().enumerate() {
            if sample.arity() != expected {
                return Err(DataError::InconsistentArity {
                    index,
                    expected,
                    found: sample.arity(),
                });
            }
            if sample.labels.is_empty() {
                return Err(DataError::EmptyLabels { index });
            }
        }
        Ok(expected)
    }
}

impl<L, F> Default for TrainingSet<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<L, F> From<Vec<LabeledSample<L, F>>> for TrainingSet<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    fn from(samples: Vec<LabeledSample<L, F>>) -> Self {
        Self { samples }
    }
}

impl<L, F> FromIterator<LabeledSample<L, F>> for TrainingSet<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    fn from_iter<I: IntoIterator<Item = LabeledSample<L, F>>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a, L, F> IntoIterator for &'a TrainingSet<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    type Item = &'a LabeledSample<L, F>;
    type IntoIter = std::slice::Iter<'a, LabeledSample<L, F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
