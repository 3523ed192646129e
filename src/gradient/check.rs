use std::ops::{Deref, DerefMut};

use crate::error::{NetworkError, Result};
use crate::math::vector::{add, norm, sub, zeros};
use crate::network::network::Network;
use crate::train::sample::Sample;

/// Perturbation applied to each weight by the central difference.
pub const EPSILON: f64 = 1e-4;

/// Holds a network's weights while they are perturbed and writes the
/// originals back when dropped, including on an early error return.
struct WeightsGuard<'a> {
    network: &'a mut Network,
    original: Vec<f64>,
}

impl<'a> WeightsGuard<'a> {
    fn new(network: &'a mut Network) -> WeightsGuard<'a> {
        let original = network.weights();
        WeightsGuard { network, original }
    }
}

impl Deref for WeightsGuard<'_> {
    type Target = Network;

    fn deref(&self) -> &Network {
        self.network
    }
}

impl DerefMut for WeightsGuard<'_> {
    fn deref_mut(&mut self) -> &mut Network {
        self.network
    }
}

impl Drop for WeightsGuard<'_> {
    fn drop(&mut self) {
        self.network.write_weights(&self.original);
    }
}

/// Estimates the gradient of `data.len() · cost(data)` with respect to every
/// weight by central differences.
///
/// The result is comparable to `Network::gradients`, which sums over the
/// examples instead of averaging. The network's weights are unchanged on
/// return, whether or not a cost evaluation failed.
pub fn compute_numerical_gradients(network: &mut Network, data: &[Sample]) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(NetworkError::EmptyDataset);
    }
    let n = data.len() as f64;
    let mut guard = WeightsGuard::new(network);
    let initial = guard.original.clone();
    let mut gradients = zeros(initial.len());
    let mut perturbed = initial.clone();

    for k in 0..initial.len() {
        perturbed[k] = initial[k] + EPSILON;
        guard.write_weights(&perturbed);
        let plus = guard.cost(data)?;

        perturbed[k] = initial[k] - EPSILON;
        guard.write_weights(&perturbed);
        let minus = guard.cost(data)?;

        gradients[k] = n * (plus - minus) / (2.0 * EPSILON);
        perturbed[k] = initial[k];
    }

    Ok(gradients)
}

/// `‖a − b‖ / ‖a + b‖`, the agreement measure between two gradient vectors.
pub fn relative_error(a: &[f64], b: &[f64]) -> f64 {
    norm(&sub(a, b)) / norm(&add(a, b))
}

/// Replaces exact-zero numerical entries with their analytic counterparts.
///
/// A weight the cost does not depend on has a numerical gradient of exactly
/// zero and carries no information for the comparison.
pub fn reconcile_zero_entries(numerical: &mut [f64], analytic: &[f64]) {
    for (estimate, &exact) in numerical.iter_mut().zip(analytic) {
        if *estimate == 0.0 {
            *estimate = exact;
        }
    }
}
