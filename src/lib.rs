pub mod math;
pub mod activation;
pub mod cost;
pub mod network;
pub mod train;
pub mod gradient;
pub mod error;

// Convenience re-exports
pub use activation::Activation;
pub use cost::CostStrategy;
pub use error::{NetworkError, Result};
pub use gradient::{compute_numerical_gradients, relative_error};
pub use network::{Layer, LayerKind, Network, NetworkConfig, Neuron, Synapse, SynapseLayer};
pub use train::{Sample, TrainingOptions, TrainingOutput, TrainingOverrides};
