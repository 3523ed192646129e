use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Resolved training hyperparameters.
///
/// # Fields
/// - `regularization`: L2 coefficient, folded into the weight update as decay
/// - `batch_size`: examples per gradient-descent step; clamped to the
///   dataset length at train time
/// - `learning_rate`: step size
/// - `iterations`: number of mini-batch steps per `train` call
/// - `log`: emit a progress line every 1% of iterations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingOptions {
    pub regularization: f64,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub iterations: usize,
    pub log: bool,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        TrainingOptions {
            regularization: 1e-4,
            batch_size: 10,
            learning_rate: 0.5,
            iterations: 10_000,
            log: false,
        }
    }
}

impl TrainingOptions {
    /// Overwrites every field the overrides set.
    pub fn merge(&mut self, overrides: &TrainingOverrides) {
        if let Some(regularization) = overrides.regularization {
            self.regularization = regularization;
        }
        if let Some(batch_size) = overrides.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(learning_rate) = overrides.learning_rate {
            self.learning_rate = learning_rate;
        }
        if let Some(iterations) = overrides.iterations {
            self.iterations = iterations;
        }
        if let Some(log) = overrides.log {
            self.log = log;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.regularization.is_nan() || self.regularization < 0.0 {
            return Err(NetworkError::InvalidConfig(format!(
                "regularization must be non-negative, got {}",
                self.regularization
            )));
        }
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 {
            return Err(NetworkError::InvalidConfig(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.batch_size == 0 {
            return Err(NetworkError::InvalidConfig("batch size must be at least 1".into()));
        }
        if self.iterations == 0 {
            return Err(NetworkError::InvalidConfig("iterations must be at least 1".into()));
        }
        Ok(())
    }
}

/// A partial set of training options; unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingOverrides {
    pub regularization: Option<f64>,
    pub batch_size: Option<usize>,
    pub learning_rate: Option<f64>,
    pub iterations: Option<usize>,
    pub log: Option<bool>,
}
