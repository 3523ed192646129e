use rand::Rng;

use crate::activation::Activation;
use crate::cost::CostStrategy;
use crate::error::{NetworkError, Result};
use crate::network::id::{LayerId, LayerIdGen, NeuronId};
use crate::network::neuron::Neuron;
use crate::network::synapse::{Synapse, SynapseLayer};

/// Role of a layer in the chain. Input and hidden layers carry a trailing
/// bias neuron; the input layer is never activated from a previous layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Input,
    Hidden,
    Output,
}

/// An ordered collection of neurons.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: LayerId,
    kind: LayerKind,
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Builds a layer of `size` neurons, plus a bias neuron unless it is the output layer.
    pub fn new(kind: LayerKind, size: usize, ids: &mut LayerIdGen) -> Layer {
        let id = ids.next_id();
        let mut neurons: Vec<Neuron> = (0..size)
            .map(|position| Neuron::new(NeuronId { layer: id, position }))
            .collect();
        if kind != LayerKind::Output {
            neurons.push(Neuron::bias(NeuronId { layer: id, position: size }));
        }
        Layer { id, kind, neurons }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Number of neurons, bias included.
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// Number of neurons, bias excluded.
    pub fn size(&self) -> usize {
        self.neurons.len() - usize::from(self.has_bias())
    }

    pub fn has_bias(&self) -> bool {
        self.neurons.last().is_some_and(Neuron::is_bias)
    }

    /// Activation of every neuron, bias included.
    pub fn values(&self) -> Vec<f64> {
        self.neurons.iter().map(Neuron::a).collect()
    }

    /// Assigns activations in neuron order, leaving the bias slot untouched.
    pub fn set_values(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.size() {
            return Err(NetworkError::ShapeMismatch {
                what: "layer values",
                got: values.len(),
                expected: self.size(),
            });
        }
        for (neuron, &value) in self.neurons.iter_mut().zip(values) {
            neuron.set_a(value);
        }
        Ok(())
    }

    /// Fully connects this layer to the non-bias neurons of `next`.
    ///
    /// Weights are drawn with this layer's neuron count as fan-in.
    pub(crate) fn link_to<R: Rng + ?Sized>(&self, next: &Layer, rng: &mut R) -> SynapseLayer {
        let fan_in = self.len();
        let synapses = (0..fan_in * next.size())
            .map(|_| Synapse::random(fan_in, rng))
            .collect();
        SynapseLayer::new(self.id, next.id, fan_in, next.size(), synapses)
    }

    /// Forward step: activates every neuron from `previous` through `synapses`.
    ///
    /// `synapses` must link `previous` (bias included) to this layer's non-bias neurons.
    pub fn activate(&mut self, previous: &Layer, synapses: &SynapseLayer, activation: &Activation) -> Result<()> {
        if self.kind == LayerKind::Input {
            return Err(NetworkError::UnsupportedOperation(
                "the input layer could not propagate using a previous layer",
            ));
        }
        if synapses.inputs() != previous.len() {
            return Err(NetworkError::ShapeMismatch {
                what: "synapse layer inputs",
                got: synapses.inputs(),
                expected: previous.len(),
            });
        }
        if synapses.outputs() != self.size() {
            return Err(NetworkError::ShapeMismatch {
                what: "synapse layer outputs",
                got: synapses.outputs(),
                expected: self.size(),
            });
        }
        for neuron in &mut self.neurons {
            neuron.activate(&previous.neurons, synapses, activation);
        }
        Ok(())
    }

    /// Output errors from the per-neuron `predicted − expected` seeds.
    pub fn seed_errors(&mut self, seeds: &[f64], cost: CostStrategy, activation: &Activation) -> Result<()> {
        if seeds.len() != self.size() {
            return Err(NetworkError::ShapeMismatch {
                what: "error seeds",
                got: seeds.len(),
                expected: self.size(),
            });
        }
        for (neuron, &seed) in self.neurons.iter_mut().zip(seeds) {
            neuron.seed_error(seed, cost, activation);
        }
        Ok(())
    }

    /// Hidden errors, read from the already computed errors of `next`.
    pub(crate) fn compute_errors(&mut self, next: &Layer, synapses: &SynapseLayer, activation: &Activation) {
        for neuron in &mut self.neurons {
            neuron.compute_error(&next.neurons, synapses, activation);
        }
    }

    /// Accumulates the gradients of the synapses leaving this layer.
    pub(crate) fn compute_gradients(&self, next: &Layer, synapses: &mut SynapseLayer) {
        for neuron in &self.neurons {
            neuron.back_propagate(&next.neurons, synapses);
        }
    }
}
