use serde::{Deserialize, Serialize};

use crate::cost::CostStrategy;
use crate::error::{NetworkError, Result};
use crate::train::options::TrainingOverrides;

/// Architecture and training setup of a `Network`.
///
/// `hidden_layers` defaults to a single hidden layer as wide as the input
/// layer. `training_options` is merged onto `TrainingOptions::default()`.
/// In JSON, `cost_strategy` is the integer id (0 = quadratic, 1 = cross-entropy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_layer_size: usize,
    #[serde(default)]
    pub hidden_layers: Option<Vec<usize>>,
    pub output_layer_size: usize,
    #[serde(default)]
    pub training_options: TrainingOverrides,
    #[serde(default)]
    pub cost_strategy: CostStrategy,
}

impl NetworkConfig {
    pub fn new(input_layer_size: usize, output_layer_size: usize) -> NetworkConfig {
        NetworkConfig {
            input_layer_size,
            hidden_layers: None,
            output_layer_size,
            training_options: TrainingOverrides::default(),
            cost_strategy: CostStrategy::default(),
        }
    }

    pub fn hidden_layers(mut self, sizes: Vec<usize>) -> NetworkConfig {
        self.hidden_layers = Some(sizes);
        self
    }

    pub fn training_options(mut self, overrides: TrainingOverrides) -> NetworkConfig {
        self.training_options = overrides;
        self
    }

    pub fn cost_strategy(mut self, strategy: CostStrategy) -> NetworkConfig {
        self.cost_strategy = strategy;
        self
    }

    /// Hidden layer sizes with the default applied.
    pub fn resolved_hidden_layers(&self) -> Vec<usize> {
        self.hidden_layers
            .clone()
            .unwrap_or_else(|| vec![self.input_layer_size])
    }

    /// Every layer size, input to output.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![self.input_layer_size];
        sizes.extend(self.resolved_hidden_layers());
        sizes.push(self.output_layer_size);
        sizes
    }

    /// Checks that every layer has at least one neuron.
    pub fn validate(&self) -> Result<()> {
        if let Some(position) = self.layer_sizes().iter().position(|&size| size == 0) {
            return Err(NetworkError::InvalidConfig(format!(
                "layer {position} must have at least one neuron"
            )));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<NetworkConfig> {
        Ok(serde_json::from_str(json)?)
    }

    /// Deserializes a `NetworkConfig` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
