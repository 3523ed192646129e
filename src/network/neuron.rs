use crate::activation::Activation;
use crate::cost::CostStrategy;
use crate::network::id::NeuronId;
use crate::network::synapse::SynapseLayer;

/// A computational unit: pre-activation `Z`, activation `A` and error `δ`.
///
/// Neurons do not hold their synapses. The owning network passes the
/// neighbouring layer and the synapse layer between them to each operation,
/// and the neuron's position selects its row (outbound) or column (inbound).
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    id: NeuronId,
    bias: bool,
    activated: f64,
    pre_activated: f64,
    error: f64,
}

impl Neuron {
    pub fn new(id: NeuronId) -> Neuron {
        Neuron {
            id,
            bias: false,
            activated: 0.0,
            pre_activated: 0.0,
            error: 0.0,
        }
    }

    /// A bias neuron: its activation is pinned to 1 and it has no inputs.
    pub fn bias(id: NeuronId) -> Neuron {
        Neuron {
            activated: 1.0,
            bias: true,
            ..Neuron::new(id)
        }
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    pub fn is_bias(&self) -> bool {
        self.bias
    }

    pub fn a(&self) -> f64 {
        self.activated
    }

    /// Assigns the activation. A bias neuron ignores the value and stays at 1.
    pub fn set_a(&mut self, value: f64) {
        self.activated = if self.bias { 1.0 } else { value };
    }

    pub fn z(&self) -> f64 {
        self.pre_activated
    }

    pub fn delta(&self) -> f64 {
        self.error
    }

    pub fn set_delta(&mut self, value: f64) {
        self.error = value;
    }

    /// `Z = Σᵢ w(i, self) · Aᵢ` over the upstream layer, then `A = f(Z)`.
    pub(crate) fn activate(&mut self, inputs: &[Neuron], synapses: &SynapseLayer, activation: &Activation) {
        if self.bias {
            return;
        }
        let position = self.id.position;
        let sum: f64 = inputs
            .iter()
            .enumerate()
            .map(|(i, input)| synapses.get(i, position).weight * input.a())
            .sum();
        self.pre_activated = sum;
        self.activated = activation.function(sum);
    }

    /// Output-layer error, from the seeded `predicted − expected` value.
    pub fn seed_error(&mut self, seed: f64, cost: CostStrategy, activation: &Activation) {
        self.error = cost.delta(seed, self.pre_activated, activation);
    }

    /// Hidden-layer error: `δ = (Σⱼ w(self, j) · δⱼ) · f'(Z)` over the downstream layer.
    pub(crate) fn compute_error(&mut self, outputs: &[Neuron], synapses: &SynapseLayer, activation: &Activation) {
        if self.bias {
            return;
        }
        let position = self.id.position;
        let sum: f64 = outputs[..synapses.outputs()]
            .iter()
            .enumerate()
            .map(|(j, output)| synapses.get(position, j).weight * output.delta())
            .sum();
        self.error = sum * activation.derivative(self.pre_activated);
    }

    /// Accumulates `A · δⱼ` into the gradient of every outbound synapse.
    pub(crate) fn back_propagate(&self, outputs: &[Neuron], synapses: &mut SynapseLayer) {
        let position = self.id.position;
        for (j, output) in outputs[..synapses.outputs()].iter().enumerate() {
            synapses.get_mut(position, j).gradient += self.activated * output.delta();
        }
    }
}
