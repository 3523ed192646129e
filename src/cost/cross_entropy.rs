use crate::activation::Activation;

/// Binary cross-entropy cost for a sigmoid output layer.
pub struct CrossEntropyCost;

impl CrossEntropyCost {
    /// Scalar cost: `Σ −y·ln(ŷ) − (1 − y)·ln(1 − ŷ)`
    ///
    /// A term evaluating to NaN (`0 · ln 0`) counts as zero.
    pub fn cost(targets: &[f64], predictions: &[f64]) -> f64 {
        targets
            .iter()
            .zip(predictions.iter())
            .map(|(y, p)| nan_to_zero(-y * p.ln()) + nan_to_zero(-(1.0 - y) * (1.0 - p).ln()))
            .sum()
    }

    /// Output error: the seeded `predicted − expected`, passed through.
    ///
    /// With a sigmoid output the derivative of the cost cancels `σ'(z)`.
    pub fn delta(a: f64, _z: f64, _activation: &Activation) -> f64 {
        a
    }
}

fn nan_to_zero(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x
    }
}
