use rand::Rng;

use crate::network::id::{LayerId, NeuronId, SynapseId};

/// A weighted edge between two neurons of adjacent layers.
///
/// `gradient` is an accumulator: it sums every example of a batch and is only
/// cleared by the weight update.
#[derive(Debug, Clone, PartialEq)]
pub struct Synapse {
    pub weight: f64,
    pub gradient: f64,
}

impl Synapse {
    pub fn new(weight: f64) -> Synapse {
        Synapse { weight, gradient: 0.0 }
    }

    /// Draws a weight from `[0, 1) / sqrt(fan_in)`.
    pub fn random<R: Rng + ?Sized>(fan_in: usize, rng: &mut R) -> Synapse {
        Synapse::new(rng.gen::<f64>() / (fan_in as f64).sqrt())
    }
}

/// The fully connected synapses between two adjacent layers.
///
/// Stored row-major: synapse `(i, j)` links neuron `i` of the upstream layer
/// (bias included) to neuron `j` of the downstream layer (bias excluded).
#[derive(Debug, Clone, PartialEq)]
pub struct SynapseLayer {
    from: LayerId,
    to: LayerId,
    inputs: usize,
    outputs: usize,
    synapses: Vec<Synapse>,
}

impl SynapseLayer {
    pub(crate) fn new(from: LayerId, to: LayerId, inputs: usize, outputs: usize, synapses: Vec<Synapse>) -> SynapseLayer {
        assert_eq!(synapses.len(), inputs * outputs);
        SynapseLayer { from, to, inputs, outputs, synapses }
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    pub fn len(&self) -> usize {
        self.synapses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synapses.is_empty()
    }

    pub fn get(&self, input: usize, output: usize) -> &Synapse {
        &self.synapses[input * self.outputs + output]
    }

    pub fn get_mut(&mut self, input: usize, output: usize) -> &mut Synapse {
        &mut self.synapses[input * self.outputs + output]
    }

    pub fn id(&self, input: usize, output: usize) -> SynapseId {
        SynapseId {
            input: NeuronId { layer: self.from, position: input },
            output: NeuronId { layer: self.to, position: output },
        }
    }

    pub fn synapses(&self) -> &[Synapse] {
        &self.synapses
    }

    pub fn synapses_mut(&mut self) -> &mut [Synapse] {
        &mut self.synapses
    }
}
