use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use class_helpers::{Distance, Float, TrainingSet};
use ndarray::ArrayView1;

use crate::{KnnError, SupervisedClassifier, Trained};

/// A k-Nearest Neighbors (k-NN) classifier.
///
/// This classifier predicts the labels of a new data point by finding the `k`
/// most similar samples in its training set and taking a majority vote among
/// their label sequences.
///
/// Neighbours are ranked by distance with ties kept in insertion order. A tied
/// vote goes to the label sequence whose first voter is nearest, so with
/// `k == 1` this agrees with [`crate::NearestNeighbor`].
#[derive(Debug, Clone)]
pub struct KnnClassifier<L, F, D>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
    D: Distance<F>,
{
    k: usize,
    distance: D,
    trained: Option<Trained<L, F>>,
}

impl<L, F, D> KnnClassifier<L, F, D>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
    D: Distance<F>,
{
    /// Creates a new, untrained k-NN classifier.
    ///
    /// # Arguments
    ///
    /// * `k`: The number of neighbors to consider for classification. Must be greater than 0.
    /// * `distance`: An instance of a struct that implements the `Distance` trait (e.g., `L2Dist`).
    ///
    /// # Errors
    ///
    /// Returns `KnnError::InvalidK` if `k` is 0, as this is not a valid configuration.
    pub fn new(k: usize, distance: D) -> Result<Self, KnnError> {
        if k == 0 {
            return Err(KnnError::InvalidK);
        }
        Ok(Self {
            k,
            distance,
            trained: None,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn is_trained(&self) -> bool {
        self.trained.is_some()
    }
}

impl<L, F, D> SupervisedClassifier<L, F> for KnnClassifier<L, F, D>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
    D: Distance<F>,
{
    type Error = KnnError;

    fn train(&mut self, set: TrainingSet<L, F>) -> Result<(), KnnError> {
        self.trained = Some(Trained::new(set)?);
        Ok(())
    }

    fn classify(&self, query: ArrayView1<F>) -> Result<Vec<L>, KnnError> {
        let trained = self.trained.as_ref().ok_or(KnnError::NotTrained)?;

        // 1. Reduced distance from the query to every training sample.
        let mut ranked: Vec<(F, usize)> = trained
            .rdistances(&self.distance, query)?
            .into_iter()
            .enumerate()
            .map(|(i, d)| (d, i))
            .collect();

        // 2. Stable sort so equidistant samples keep their insertion order.
        //    NaN was rejected above, so `partial_cmp` always succeeds.
        ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        // 3. Take the top `k` neighbors.
        let num_neighbors = self.k.min(ranked.len());
        let samples = trained.set.samples();

        // 4. Count votes per label sequence, remembering the rank of its first voter.
        let mut votes: HashMap<&[L], (usize, usize)> = HashMap::new();
        for (rank, &(_, i)) in ranked[..num_neighbors].iter().enumerate() {
            let entry = votes.entry(samples[i].labels()).or_insert((0, rank));
            entry.0 += 1;
        }

        let winner = votes
            .into_iter()
            .max_by(|(_, a), (_, b)| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
            .map(|(labels, _)| labels.to_vec())
            .ok_or(KnnError::EmptyTrainingSet)?;

        log::trace!("{}-NN vote for {:?}: {:?}", self.k, query, winner);
        Ok(winner)
    }
}
