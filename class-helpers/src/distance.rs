use ndarray::{ArrayView1, Zip};

use crate::{DistanceError, Float};

/// A metric over feature vectors of equal length.
///
/// Implementors provide the *reduced* distance, a cheaper quantity that orders
/// pairs of points exactly like the true distance (e.g. squared Euclidean).
/// Nearest-neighbour searches only ever compare distances, so they work on the
/// reduced form and convert with [`Distance::rdist_to_dist`] when a true value
/// is needed.
///
/// Every metric here is symmetric and returns zero iff both vectors are equal
/// componentwise.
pub trait Distance<F: Float>: Clone + Send + Sync {
    /// Reduced distance between `a` and `b`. Both views must have the same length.
    fn rdistance_unchecked(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F;

    /// Converts a reduced distance into the true distance.
    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist
    }

    /// Converts a true distance into the reduced distance.
    fn dist_to_rdist(&self, dist: F) -> F {
        dist
    }

    /// Reduced distance, failing with [`DistanceError::DimensionMismatch`] when
    /// the lengths differ.
    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> Result<F, DistanceError> {
        check_dims(&a, &b)?;
        Ok(self.rdistance_unchecked(a, b))
    }

    /// True distance, failing with [`DistanceError::DimensionMismatch`] when
    /// the lengths differ.
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> Result<F, DistanceError> {
        self.rdistance(a, b).map(|r| self.rdist_to_dist(r))
    }
}

fn check_dims<F>(a: &ArrayView1<F>, b: &ArrayView1<F>) -> Result<(), DistanceError> {
    if a.len() != b.len() {
        return Err(DistanceError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(())
}

/// Manhattan distance, `Σ |a_i - b_i|`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct L1Dist;

impl<F: Float> Distance<F> for L1Dist {
    fn rdistance_unchecked(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        Zip::from(&a)
            .and(&b)
            .fold(F::zero(), |acc, &x, &y| acc + (x - y).abs())
    }
}

/// Euclidean distance, `sqrt(Σ (a_i - b_i)²)`. The reduced form is the
/// squared sum.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct L2Dist;

impl<F: Float> Distance<F> for L2Dist {
    fn rdistance_unchecked(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        Zip::from(&a).and(&b).fold(F::zero(), |acc, &x, &y| {
            let d = x - y;
            acc + d * d
        })
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist.sqrt()
    }

    fn dist_to_rdist(&self, dist: F) -> F {
        dist * dist
    }
}

/// Chebyshev distance, `max |a_i - b_i|`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LInfDist;

impl<F: Float> Distance<F> for LInfDist {
    fn rdistance_unchecked(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        Zip::from(&a).and(&b).fold(F::zero(), |acc, &x, &y| {
            let d = (x - y).abs();
            // NaN must survive the fold so callers can reject it
            if d > acc || d.is_nan() { d } else { acc }
        })
    }
}

/// Minkowski distance of order `p`, `(Σ |a_i - b_i|^p)^(1/p)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LpDist<F: Float>(F);

impl<F: Float> LpDist<F> {
    /// Returns `None` unless `p` is finite and `p >= 1`, the range in which
    /// this is a metric. Use [`LInfDist`] for the limit `p = ∞`.
    pub fn new(p: F) -> Option<Self> {
        if p.is_finite() && p >= F::one() {
            Some(Self(p))
        } else {
            None
        }
    }

    pub fn p(&self) -> F {
        self.0
    }
}

impl<F: Float> Distance<F> for LpDist<F> {
    fn rdistance_unchecked(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        Zip::from(&a)
            .and(&b)
            .fold(F::zero(), |acc, &x, &y| acc + (x - y).abs().powf(self.0))
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist.powf(F::one() / self.0)
    }

    fn dist_to_rdist(&self, dist: F) -> F {
        dist.powf(self.0)
    }
}
