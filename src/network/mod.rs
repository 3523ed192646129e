pub mod config;
pub mod id;
pub mod layer;
pub mod network;
pub mod neuron;
pub mod synapse;

pub use config::NetworkConfig;
pub use id::{LayerId, LayerIdGen, NeuronId, SynapseId};
pub use layer::{Layer, LayerKind};
pub use network::Network;
pub use neuron::Neuron;
pub use synapse::{Synapse, SynapseLayer};
