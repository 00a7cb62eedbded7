//! Nearest-neighbour classification of small feature vectors.
//!
//! Re-exports the shared data types and metrics from `class-helpers` and the
//! classifiers from `k-nn`, so callers only need one dependency.

pub use class_helpers::{
    DataError, Distance, DistanceError, FeatureVector, Float, L1Dist, L2Dist, LInfDist, LpDist,
    LabeledSample, TrainingSet,
};
pub use k_nn::{KnnClassifier, KnnError, NearestNeighbor, SupervisedClassifier};
