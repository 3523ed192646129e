use serde::{Deserialize, Serialize};

use crate::activation::Activation;
use crate::cost::cross_entropy::CrossEntropyCost;
use crate::cost::quadratic::QuadraticCost;
use crate::error::NetworkError;

/// Selects the cost function paired with the network's output layer.
///
/// - `Quadratic` (id 0): `0.5 · Σ (ŷ − y)²`, output error `a · σ'(z)`.
/// - `CrossEntropy` (id 1): binary cross-entropy, output error `a`.
///
/// Serialized as its integer id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum CostStrategy {
    #[default]
    Quadratic = 0,
    CrossEntropy = 1,
}

impl CostStrategy {
    /// Scalar cost of one example.
    pub fn cost(&self, targets: &[f64], predictions: &[f64]) -> f64 {
        match self {
            CostStrategy::Quadratic => QuadraticCost::cost(targets, predictions),
            CostStrategy::CrossEntropy => CrossEntropyCost::cost(targets, predictions),
        }
    }

    /// Error term of an output neuron, given its seeded `predicted − expected`
    /// and its pre-activation value.
    pub fn delta(&self, a: f64, z: f64, activation: &Activation) -> f64 {
        match self {
            CostStrategy::Quadratic => QuadraticCost::delta(a, z, activation),
            CostStrategy::CrossEntropy => CrossEntropyCost::delta(a, z, activation),
        }
    }
}

impl TryFrom<u8> for CostStrategy {
    type Error = NetworkError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(CostStrategy::Quadratic),
            1 => Ok(CostStrategy::CrossEntropy),
            other => Err(NetworkError::NotImplemented(other)),
        }
    }
}

impl From<CostStrategy> for u8 {
    fn from(strategy: CostStrategy) -> u8 {
        strategy as u8
    }
}
