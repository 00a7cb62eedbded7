use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

use class_helpers::{DataError, Distance, DistanceError, Float, L2Dist, TrainingSet};
use ndarray::{ArrayView1, ArrayView2};

mod vote;

pub use vote::KnnClassifier;

/// Errors that can occur when training or querying a classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnnError {
    /// `train` was called with no samples.
    EmptyTrainingSet,
    /// Training samples disagree on the number of features.
    InconsistentArity {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// A training sample carries no label.
    EmptyLabels { index: usize },
    /// `classify` was called before a successful `train`.
    NotTrained,
    /// The query does not have the trained number of features.
    DimensionMismatch { expected: usize, found: usize },
    /// k cannot be zero for a k-NN classifier
    InvalidK,
    /// Invalid distance comparison (likely due to NaN values in data)
    InvalidDistance,
}

impl Display for KnnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KnnError::EmptyTrainingSet => write!(f, "Cannot train on an empty training set"),
            KnnError::InconsistentArity {
                index,
                expected,
                found,
            } => write!(
                f,
                "Training sample {} has {} features, expected {}",
                index, found, expected
            ),
            KnnError::EmptyLabels { index } => {
                write!(f, "Training sample {} has no labels", index)
            }
            KnnError::NotTrained => write!(f, "Classifier has not been trained"),
            KnnError::DimensionMismatch { expected, found } => write!(
                f,
                "Query has {} features, classifier was trained on {}",
                found, expected
            ),
            KnnError::InvalidK => write!(f, "k cannot be zero for a k-NN classifier"),
            KnnError::InvalidDistance => write!(
                f,
                "Invalid distance comparison (likely due to NaN values in data)"
            ),
        }
    }
}

impl Error for KnnError {}

impl From<DataError> for KnnError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::EmptyTrainingSet => KnnError::EmptyTrainingSet,
            DataError::InconsistentArity {
                index,
                expected,
                found,
            } => KnnError::InconsistentArity {
                index,
                expected,
                found,
            },
            DataError::EmptyLabels { index } => KnnError::EmptyLabels { index },
        }
    }
}

impl From<DistanceError> for KnnError {
    fn from(err: DistanceError) -> Self {
        match err {
            DistanceError::DimensionMismatch { expected, found } => {
                KnnError::DimensionMismatch { expected, found }
            }
        }
    }
}

/// A classifier that learns from labeled samples and assigns label sequences
/// to new feature vectors.
///
/// `classify` only reads the trained state, so a trained classifier can be
/// queried from several threads at once. `train` needs `&mut self`; callers
/// that share a classifier between threads and retrain it must wrap it in
/// their own lock (e.g. `RwLock`). Implementations do no locking of their own.
pub trait SupervisedClassifier<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    type Error;

    /// Replaces any previous training data with `set`.
    ///
    /// On error the previous trained state, if any, is kept.
    fn train(&mut self, set: TrainingSet<L, F>) -> Result<(), Self::Error>;

    /// Predicts the label sequence of `query`.
    fn classify(&self, query: ArrayView1<F>) -> Result<Vec<L>, Self::Error>;

    /// Classifies every row of `queries`, stopping at the first failure.
    fn classify_batch(&self, queries: ArrayView2<F>) -> Result<Vec<Vec<L>>, Self::Error> {
        queries
            .rows()
            .into_iter()
            .map(|row| self.classify(row))
            .collect()
    }
}

/// Training data validated and owned by a classifier.
#[derive(Debug, Clone)]
struct Trained<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    set: TrainingSet<L, F>,
    arity: usize,
}

impl<L, F> Trained<L, F>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    fn new(set: TrainingSet<L, F>) -> Result<Self, KnnError> {
        let arity = set.validate()?;
        log::debug!(
            "validated training set: {} samples of arity {}",
            set.len(),
            arity
        );
        Ok(Self { set, arity })
    }

    /// Reduced distance from `query` to every sample, in insertion order.
    fn rdistances<D: Distance<F>>(
        &self,
        distance: &D,
        query: ArrayView1<F>,
    ) -> Result<Vec<F>, KnnError> {
        if query.len() != self.arity {
            return Err(KnnError::DimensionMismatch {
                expected: self.arity,
                found: query.len(),
            });
        }
        self.set
            .iter()
            .map(|sample| {
                let d = distance.rdistance(query, sample.features())?;
                if d.is_nan() {
                    return Err(KnnError::InvalidDistance);
                }
                Ok(d)
            })
            .collect()
    }
}

/// A 1-nearest-neighbour classifier.
///
/// A query receives the labels of the closest training sample under the
/// distance metric `D`. Features are compared exactly as supplied, with no
/// scaling, so between two samples the decision boundary is their
/// perpendicular bisector. A query lying exactly on it goes to the sample that
/// was inserted first.
///
/// # Type Parameters
///
/// * `L`: The type of the label (e.g., `i32`, `String`, or a custom `enum`).
/// * `F`: The float type for the features (e.g., `f32`, `f64`).
/// * `D`: The distance metric, which must implement the `Distance` trait.
#[derive(Debug, Clone)]
pub struct NearestNeighbor<L, F, D = L2Dist>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
    D: Distance<F>,
{
    distance: D,
    trained: Option<Trained<L, F>>,
}

impl<L, F, D> NearestNeighbor<L, F, D>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
    D: Distance<F>,
{
    /// Creates an untrained classifier using `distance`.
    pub fn new(distance: D) -> Self {
        Self {
            distance,
            trained: None,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.trained.is_some()
    }

    /// Feature count of the trained data, if trained.
    pub fn arity(&self) -> Option<usize> {
        self.trained.as_ref().map(|t| t.arity)
    }

    pub fn training_set(&self) -> Option<&TrainingSet<L, F>> {
        self.trained.as_ref().map(|t| &t.set)
    }

    /// Index in the training set of the sample nearest to `query`, with its
    /// true distance.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::NotTrained` before training,
    /// `KnnError::DimensionMismatch` for a query of the wrong length and
    /// `KnnError::InvalidDistance` if a distance is NaN.
    pub fn nearest(&self, query: ArrayView1<F>) -> Result<(usize, F), KnnError> {
        let trained = self.trained.as_ref().ok_or(KnnError::NotTrained)?;
        let distances = trained.rdistances(&self.distance, query)?;

        let mut best: Option<(usize, F)> = None;
        for (index, d) in distances.into_iter().enumerate() {
            // strict `<` keeps the earliest of equidistant samples
            let closer = match best {
                Some((_, best_d)) => d < best_d,
                None => true,
            };
            if closer {
                best = Some((index, d));
            }
        }

        let (index, rdist) = best.ok_or(KnnError::EmptyTrainingSet)?;
        log::trace!("nearest sample to {:?} is #{}", query, index);
        Ok((index, self.distance.rdist_to_dist(rdist)))
    }
}

impl<L, F> Default for NearestNeighbor<L, F, L2Dist>
where
    L: Clone + Eq + Hash + Debug,
    F: Float,
{
    fn default() -> Self {
        Self::new(L2Dist)
    }
}

impl<L, F, D> SupervisedClassifier<L, F> for NearestNeighbor<L, F, D>
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
        let (index, _) = self.nearest(query)?;
        let trained = self.trained.as_ref().ok_or(KnnError::NotTrained)?;
        Ok(trained.set.samples()[index].labels().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use class_helpers::{L1Dist, LabeledSample, LpDist};
    use ndarray::{Array1, array};
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn three_filters() -> TrainingSet<i32, f64> {
        let mut set = TrainingSet::new();
        set.add(array![1.0, 1.0], 0);
        set.add(array![1.0, 0.0], 2);
        set.add(array![1.0, -1.0], 1);
        set
    }

    fn calibration_set() -> TrainingSet<&'static str, f64> {
        vec![
            LabeledSample::single(array![1.0, 1.0], "A"),
            LabeledSample::single(array![1.0, -1.0], "B"),
            LabeledSample::single(array![-1.0, -1.0], "A"),
            LabeledSample::single(array![-1.0, 1.0], "B"),
        ]
        .into()
    }

    fn trained<L, F>(set: TrainingSet<L, F>) -> NearestNeighbor<L, F>
    where
        L: Clone + Eq + Hash + Debug,
        F: Float,
    {
        let mut classifier = NearestNeighbor::default();
        classifier.train(set).unwrap();
        classifier
    }

    #[test]
    fn test_end_to_end_three_filters() {
        let classifier = trained(three_filters());
        assert_eq!(classifier.classify(array![1.0, 1.0].view()).unwrap(), vec![0]);
        assert_eq!(classifier.classify(array![1.0, -1.0].view()).unwrap(), vec![1]);
        assert_eq!(classifier.classify(array![1.0, 0.0].view()).unwrap(), vec![2]);
    }

    #[test]
    fn test_exemplars_classify_as_themselves() {
        let set = calibration_set();
        let classifier = trained(set.clone());
        for sample in &set {
            assert_eq!(
                classifier.classify(sample.features()).unwrap(),
                sample.labels()
            );
            let (_, d) = classifier.nearest(sample.features()).unwrap();
            assert_eq!(d, 0.0);
        }
    }

    #[test]
    fn test_midpoint_boundary() {
        let set: TrainingSet<&str, f64> = vec![
            LabeledSample::single(array![1.0, 0.1], "A"),
            LabeledSample::single(array![1.0, -0.1], "B"),
        ]
        .into();
        let classifier = trained(set);
        let eps = 1e-9;
        assert_eq!(classifier.classify(array![1.0, eps].view()).unwrap(), vec!["A"]);
        assert_eq!(classifier.classify(array![1.0, -eps].view()).unwrap(), vec!["B"]);
        // exactly halfway: the earlier sample wins
        assert_eq!(classifier.classify(array![1.0, 0.0].view()).unwrap(), vec!["A"]);
    }

    #[test]
    fn test_tie_resolves_by_insertion_order() {
        let forward: TrainingSet<i32, f64> = vec![
            LabeledSample::single(array![1.0, 0.0], 2),
            LabeledSample::single(array![1.0, 0.1], 0),
        ]
        .into();
        let backward: TrainingSet<i32, f64> = vec![
            LabeledSample::single(array![1.0, 0.1], 0),
            LabeledSample::single(array![1.0, 0.0], 2),
        ]
        .into();
        let query = array![1.0, 0.05];
        assert_eq!(trained(forward).classify(query.view()).unwrap(), vec![2]);
        assert_eq!(trained(backward).classify(query.view()).unwrap(), vec![0]);
    }

    #[test]
    fn test_sign_symmetry_on_calibration_set() {
        let classifier = trained(calibration_set());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        for _ in 0..500 {
            let q: Array1<f64> = (0..2).map(|_| rng.random_range(-1.0..1.0)).collect();
            let neg = q.mapv(|x| -x);
            assert_eq!(
                classifier.classify(q.view()).unwrap(),
                classifier.classify(neg.view()).unwrap(),
                "query {:?}",
                q
            );
        }
    }

    #[test]
    fn test_repeated_classification_is_deterministic() {
        let classifier = trained(calibration_set());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for _ in 0..100 {
            let q: Array1<f64> = (0..2).map(|_| rng.random_range(-2.0..2.0)).collect();
            let first = classifier.classify(q.view()).unwrap();
            for _ in 0..3 {
                assert_eq!(classifier.classify(q.view()).unwrap(), first);
            }
        }
    }

    #[test]
    fn test_retraining_reproduces_results() {
        let mut a = NearestNeighbor::default();
        let mut b = NearestNeighbor::default();
        a.train(three_filters()).unwrap();
        let mut other = TrainingSet::new();
        other.add(array![0.0, 0.0], 7);
        b.train(other).unwrap();
        b.train(three_filters()).unwrap();
        let queries = array![[1.0, 0.3], [0.2, -0.7], [-1.0, 0.05], [1.0, 0.5]];
        assert_eq!(
            a.classify_batch(queries.view()).unwrap(),
            b.classify_batch(queries.view()).unwrap()
        );
    }

    #[test]
    fn test_multi_label_sequence_returned_unchanged() {
        let set: TrainingSet<i32, f64> = vec![
            LabeledSample::new(array![0.0, 0.0], vec![3, 1, 4]).unwrap(),
            LabeledSample::new(array![5.0, 5.0], vec![1, 5]).unwrap(),
        ]
        .into();
        let classifier = trained(set);
        assert_eq!(classifier.classify(array![0.5, 0.2].view()).unwrap(), vec![3, 1, 4]);
        assert_eq!(classifier.classify(array![4.0, 6.0].view()).unwrap(), vec![1, 5]);
    }

    #[test]
    fn test_error_not_trained() {
        let classifier: NearestNeighbor<i32, f64> = NearestNeighbor::default();
        assert!(!classifier.is_trained());
        assert_eq!(classifier.arity(), None);
        let result = classifier.classify(array![1.0, 1.0].view());
        assert!(matches!(result, Err(KnnError::NotTrained)));
    }

    #[test]
    fn test_error_on_empty_training_set() {
        let mut classifier: NearestNeighbor<i32, f64> = NearestNeighbor::default();
        let result = classifier.train(TrainingSet::new());
        assert!(matches!(result, Err(KnnError::EmptyTrainingSet)));
        assert!(!classifier.is_trained());
    }

    #[test]
    fn test_error_on_mixed_arity() {
        let mut set = three_filters();
        set.add(array![1.0, 0.5, 0.25], 0);
        let mut classifier = NearestNeighbor::default();
        assert_eq!(
            classifier.train(set),
            Err(KnnError::InconsistentArity {
                index: 3,
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_error_on_query_arity() {
        let classifier = trained(three_filters());
        assert_eq!(
            classifier.classify(array![1.0].view()),
            Err(KnnError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            classifier.classify(array![1.0, 0.0, 0.0].view()),
            Err(KnnError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_failed_training_keeps_previous_state() {
        let mut classifier = trained(three_filters());
        let bad: TrainingSet<i32, f64> = vec![
            LabeledSample::single(array![0.0], 9),
            LabeledSample::single(array![0.0, 1.0], 9),
        ]
        .into();
        assert!(classifier.train(bad).is_err());
        assert_eq!(classifier.arity(), Some(2));
        assert_eq!(classifier.training_set().map(|s| s.len()), Some(3));
        assert_eq!(classifier.classify(array![1.0, 0.9].view()).unwrap(), vec![0]);
    }

    #[test]
    fn test_nan_query_is_rejected() {
        let classifier = trained(three_filters());
        let result = classifier.classify(array![f64::NAN, 0.0].view());
        assert_eq!(result, Err(KnnError::InvalidDistance));
    }

    #[test]
    fn test_nearest_reports_true_distance() {
        let classifier = trained(three_filters());
        let (index, d) = classifier.nearest(array![4.0, 5.0].view()).unwrap();
        assert_eq!(index, 0);
        assert_abs_diff_eq!(d, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_other_metric() {
        let mut classifier = NearestNeighbor::new(L1Dist);
        classifier.train(three_filters()).unwrap();
        assert_eq!(classifier.classify(array![1.2, 0.7].view()).unwrap(), vec![0]);
    }

    #[test]
    fn test_high_order_lp_keeps_fidelity() {
        let mut set = TrainingSet::new();
        set.add(array![0.5, 0.0], "A");
        set.add(array![0.0, 0.0], "B");

        let mut classifier = NearestNeighbor::new(LpDist::new(50.0).unwrap());
        classifier.train(set).unwrap();
        assert_eq!(classifier.classify(array![0.0, 0.0].view()).unwrap(), vec!["B"]);
        assert_eq!(classifier.classify(array![0.5, 0.0].view()).unwrap(), vec!["A"]);
    }

    #[test]
    fn test_f32_features() {
        let mut set: TrainingSet<u8, f32> = TrainingSet::new();
        set.add(array![0.0, 0.0], 1);
        set.add(array![1.0, 1.0], 2);
        let classifier = trained(set);
        assert_eq!(classifier.classify(array![0.9_f32, 0.8].view()).unwrap(), vec![2]);
    }

    #[test]
    fn test_shared_across_threads() {
        let classifier = trained(three_filters());
        std::thread::scope(|s| {
            for i in 0..4 {
                let classifier = &classifier;
                s.spawn(move || {
                    let y = 1.0 - i as f64 * 0.5;
                    classifier.classify(array![1.0, y].view()).unwrap()
                });
            }
        });
    }
}
