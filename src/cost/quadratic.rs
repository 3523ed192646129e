use crate::activation::Activation;
use crate::math::vector::{norm, sub};

/// Quadratic (squared-error) cost for a sigmoid output layer.
pub struct QuadraticCost;

impl QuadraticCost {
    /// Scalar cost: `0.5 · Σ (predicted − expected)²`
    pub fn cost(targets: &[f64], predictions: &[f64]) -> f64 {
        0.5 * norm(&sub(predictions, targets)).powi(2)
    }

    /// Output error: `a · σ'(z)`, where `a` is the seeded `predicted − expected`.
    pub fn delta(a: f64, z: f64, activation: &Activation) -> f64 {
        a * activation.derivative(z)
    }
}
