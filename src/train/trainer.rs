use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::math::vector::shuffle;
use crate::network::network::Network;
use crate::train::options::TrainingOverrides;
use crate::train::sample::Sample;

/// Result of a `train` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingOutput {
    /// Regularized cost over the full dataset after the last iteration.
    pub error: f64,
}

impl Network {
    /// Trains with mini-batch gradient descent for the configured number of
    /// iterations.
    ///
    /// `overrides` is merged into the stored options first. The batch size is
    /// clamped to `data.len()` and the clamp is kept. When the batch is smaller
    /// than the dataset, `data` is shuffled in place before each iteration and
    /// its first `batch_size` samples form the batch.
    ///
    /// With the `log` option set, the full-dataset cost is logged every 1% of
    /// iterations.
    pub fn train(&mut self, data: &mut [Sample], overrides: Option<&TrainingOverrides>) -> Result<TrainingOutput> {
        if data.is_empty() {
            return Err(NetworkError::EmptyDataset);
        }
        if let Some(overrides) = overrides {
            let mut merged = self.training_options().clone();
            merged.merge(overrides);
            merged.validate()?;
            *self.options_mut() = merged;
        }

        let len = data.len();
        let options = self.options_mut();
        options.batch_size = options.batch_size.min(len);
        let options = options.clone();

        let every = (options.iterations / 100).max(1);
        let mut rng = rand::thread_rng();

        for i in 0..options.iterations {
            if options.batch_size < len {
                shuffle(data, &mut rng);
            }
            self.backward(&data[..options.batch_size])?;
            self.step(options.batch_size, len);

            if options.log && i % every == 0 {
                let cost = self.cost(data)?;
                info!(
                    "progress {:.2}, cost: {cost}",
                    i as f64 / options.iterations as f64
                );
            }
        }

        let error = self.cost(data)?;
        debug!(
            "trained {} iterations, batch size {}, final cost {error}",
            options.iterations, options.batch_size
        );
        Ok(TrainingOutput { error })
    }
}
