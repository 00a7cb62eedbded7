use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors raised while checking a training set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The training set holds no samples.
    EmptyTrainingSet,
    /// Sample `index` has `found` features where the first sample had `expected`.
    InconsistentArity {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// Sample `index` carries no label.
    EmptyLabels { index: usize },
}

impl Display for DataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::EmptyTrainingSet => write!(f, "Training set contains no samples"),
            DataError::InconsistentArity {
                index,
                expected,
                found,
            } => write!(
                f,
                "Sample {} has {} features, expected {}",
                index, found, expected
            ),
            DataError::EmptyLabels { index } => write!(f, "Sample {} has no labels", index),
        }
    }
}

impl Error for DataError {}

/// Errors raised by a distance computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistanceError {
    /// The two vectors have different lengths.
    DimensionMismatch { expected: usize, found: usize },
}

impl Display for DistanceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceError::DimensionMismatch { expected, found } => write!(
                f,
                "Dimension mismatch: expected {} features, found {}",
                expected, found
            ),
        }
    }
}

impl Error for DistanceError {}
