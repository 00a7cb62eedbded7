use std::fmt::{Display, Formatter};

use clap::ValueEnum;
use firclass::{
    Distance, KnnClassifier, KnnError, L1Dist, L2Dist, LInfDist, NearestNeighbor,
    SupervisedClassifier, TrainingSet,
};
use ndarray::{ArrayView2, array};

/// What a two-tap FIR filter `y[n] = b0·x[n] + b1·x[n-1]` does to audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    LowPass = 0,
    HighPass = 1,
    NoFilter = 2,
}

impl FilterType {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(FilterType::LowPass),
            1 => Some(FilterType::HighPass),
            2 => Some(FilterType::NoFilter),
            _ => None,
        }
    }
}

impl Display for FilterType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FilterType::LowPass => "Closer to a low pass filter",
            FilterType::HighPass => "Closer to a high pass filter",
            FilterType::NoFilter => "Pretty much the same",
        };
        f.pad(text)
    }
}

/// Human readable text for a raw category code.
pub fn describe(code: i32) -> String {
    match FilterType::from_code(code) {
        Some(filter) => filter.to_string(),
        None => "Neither high or low, error!".to_string(),
    }
}

/// The hand-labelled coefficient pairs the classifier learns from.
///
/// Order matters: a pair exactly halfway between two exemplars takes the label
/// of the one listed first, which is how `{1, ±0.05}` ends up as "no filter".
pub fn calibration_set() -> TrainingSet<i32, f64> {
    let mut set = TrainingSet::new();
    // 1. plain low pass, pass-through and high pass
    set.add(array![1.0, 1.0], FilterType::LowPass.code());
    set.add(array![1.0, 0.0], FilterType::NoFilter.code());
    set.add(array![1.0, -1.0], FilterType::HighPass.code());
    // 2. a bass/treble tilt of more than ~2dB counts as filtering
    set.add(array![1.0, 0.1], FilterType::LowPass.code());
    set.add(array![1.0, -0.1], FilterType::HighPass.code());
    // 3. inverted polarity
    set.add(array![-1.0, -1.0], FilterType::LowPass.code());
    set.add(array![-1.0, 1.0], FilterType::HighPass.code());
    set
}

/// Distance metric selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DistanceMetric {
    L1,
    L2,
    #[value(name = "linf")]
    LInf,
}

impl Display for DistanceMetric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceMetric::L1 => write!(f, "L1"),
            DistanceMetric::L2 => write!(f, "L2"),
            DistanceMetric::LInf => write!(f, "L-Infinity"),
        }
    }
}

type BoxedClassifier = Box<dyn SupervisedClassifier<i32, f64, Error = KnnError> + Send + Sync>;

/// A trained classifier over FIR coefficient pairs.
pub struct FilterClassifier {
    inner: BoxedClassifier,
    name: String,
}

impl FilterClassifier {
    /// Builds a classifier for the given `k` and metric and trains it on
    /// [`calibration_set`]. `k == 1` selects plain nearest-neighbour.
    pub fn new(k: usize, metric: DistanceMetric) -> Result<Self, KnnError> {
        let inner = match metric {
            DistanceMetric::L1 => boxed(k, L1Dist)?,
            DistanceMetric::L2 => boxed(k, L2Dist)?,
            DistanceMetric::LInf => boxed(k, LInfDist)?,
        };
        let name = if k == 1 {
            format!("nearest neighbour ({})", metric)
        } else {
            format!("{}-NN vote ({})", k, metric)
        };
        Self::with_classifier(inner, name)
    }

    /// Trains `inner` on [`calibration_set`].
    pub fn with_classifier(mut inner: BoxedClassifier, name: String) -> Result<Self, KnnError> {
        inner.train(calibration_set())?;
        Ok(Self { inner, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Labels for the coefficient pair `[b0, b1]`.
    pub fn classify(&self, coefficients: [f64; 2]) -> Result<Vec<i32>, KnnError> {
        self.inner.classify(array![coefficients[0], coefficients[1]].view())
    }

    /// Labels for every row of an `n × 2` coefficient matrix.
    pub fn classify_rows(&self, rows: ArrayView2<f64>) -> Result<Vec<Vec<i32>>, KnnError> {
        self.inner.classify_batch(rows)
    }
}

fn boxed<D>(k: usize, distance: D) -> Result<BoxedClassifier, KnnError>
where
    D: Distance<f64> + 'static,
{
    if k == 1 {
        Ok(Box::new(NearestNeighbor::<i32, f64, D>::new(distance)))
    } else {
        Ok(Box::new(KnnClassifier::<i32, f64, D>::new(k, distance)?))
    }
}
