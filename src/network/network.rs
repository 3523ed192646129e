use log::debug;
use rand::Rng;

use crate::activation::Activation;
use crate::cost::CostStrategy;
use crate::error::{NetworkError, Result};
use crate::math::vector::sub;
use crate::network::config::NetworkConfig;
use crate::network::id::{LayerId, LayerIdGen};
use crate::network::layer::{Layer, LayerKind};
use crate::network::synapse::{Synapse, SynapseLayer};
use crate::train::options::TrainingOptions;
use crate::train::sample::Sample;

/// A fully connected feed-forward network of sigmoid neurons.
///
/// Layers and synapse layers are stored side by side: synapse layer `i` links
/// layer `i` to layer `i + 1`. Neuron state (activations, errors) lives in the
/// layers and is overwritten by every pass, so operations on one network must
/// not be interleaved.
#[derive(Debug, Clone)]
pub struct Network {
    options: TrainingOptions,
    cost_strategy: CostStrategy,
    activation: Activation,
    layers: Vec<Layer>,
    synapse_layers: Vec<SynapseLayer>,
    synapse_count: usize,
}

impl Network {
    /// Builds a network with weights drawn from the thread-local RNG.
    pub fn new(config: NetworkConfig) -> Result<Network> {
        Network::with_rng(config, &mut rand::thread_rng())
    }

    /// Builds a network with weights drawn from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: NetworkConfig, rng: &mut R) -> Result<Network> {
        config.validate()?;
        let mut options = TrainingOptions::default();
        options.merge(&config.training_options);
        options.validate()?;

        let mut ids = LayerIdGen::new();
        let hidden = config.resolved_hidden_layers();
        let mut layers = Vec::with_capacity(hidden.len() + 2);
        layers.push(Layer::new(LayerKind::Input, config.input_layer_size, &mut ids));
        for &size in &hidden {
            layers.push(Layer::new(LayerKind::Hidden, size, &mut ids));
        }
        layers.push(Layer::new(LayerKind::Output, config.output_layer_size, &mut ids));

        let mut synapse_layers = Vec::with_capacity(layers.len() - 1);
        for pair in layers.windows(2) {
            synapse_layers.push(pair[0].link_to(&pair[1], &mut *rng));
        }
        let synapse_count = synapse_layers.iter().map(SynapseLayer::len).sum();
        for synapses in &synapse_layers {
            debug!(
                "linked {} .. {}",
                synapses.id(0, 0),
                synapses.id(synapses.inputs() - 1, synapses.outputs() - 1)
            );
        }

        debug!(
            "built network: layers {:?}, {synapse_count} synapses, {:?} cost",
            config.layer_sizes(),
            config.cost_strategy
        );

        Ok(Network {
            options,
            cost_strategy: config.cost_strategy,
            activation: Activation::sigmoid(),
            layers,
            synapse_layers,
            synapse_count,
        })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(Layer::id).collect()
    }

    pub fn synapse_layers(&self) -> &[SynapseLayer] {
        &self.synapse_layers
    }

    pub fn synapse_count(&self) -> usize {
        self.synapse_count
    }

    pub fn training_options(&self) -> &TrainingOptions {
        &self.options
    }

    pub(crate) fn options_mut(&mut self) -> &mut TrainingOptions {
        &mut self.options
    }

    pub fn cost_strategy(&self) -> CostStrategy {
        self.cost_strategy
    }

    /// Visits every synapse with its synapse-layer index and its index inside
    /// that layer, in weight-vector order.
    pub fn for_each_synapse<F>(&self, mut visit: F)
    where
        F: FnMut(&Synapse, usize, usize),
    {
        for (i, layer) in self.synapse_layers.iter().enumerate() {
            for (j, synapse) in layer.synapses().iter().enumerate() {
                visit(synapse, i, j);
            }
        }
    }

    /// Every weight, flattened by synapse layer, then input neuron, then output neuron.
    pub fn weights(&self) -> Vec<f64> {
        let mut weights = Vec::with_capacity(self.synapse_count);
        self.for_each_synapse(|s, _, _| weights.push(s.weight));
        weights
    }

    /// Restores a weight vector in the order produced by `weights()`.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        if weights.len() != self.synapse_count {
            return Err(NetworkError::ShapeMismatch {
                what: "weights",
                got: weights.len(),
                expected: self.synapse_count,
            });
        }
        self.write_weights(weights);
        Ok(())
    }

    /// Writes weights without checking the length; callers guarantee it.
    pub(crate) fn write_weights(&mut self, weights: &[f64]) {
        let synapses = self.synapse_layers.iter_mut().flat_map(|l| l.synapses_mut().iter_mut());
        for (synapse, &weight) in synapses.zip(weights) {
            synapse.weight = weight;
        }
    }

    /// Propagates one input through the network and returns the output activations.
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.layers[0].set_values(input)?;
        for i in 1..self.layers.len() {
            let (before, after) = self.layers.split_at_mut(i);
            after[0].activate(&before[i - 1], &self.synapse_layers[i - 1], &self.activation)?;
        }
        Ok(self.output_layer().values())
    }

    /// One prediction per sample, in input order. Synapses are left untouched.
    pub fn forward(&mut self, data: &[Sample]) -> Result<Vec<Vec<f64>>> {
        data.iter().map(|sample| self.predict(&sample.input)).collect()
    }

    /// Mean cost over `data` plus the L2 penalty `λ / 2n · Σ w²`.
    pub fn cost(&mut self, data: &[Sample]) -> Result<f64> {
        if data.is_empty() {
            return Err(NetworkError::EmptyDataset);
        }
        let predictions = self.forward(data)?;
        let mut total = 0.0;
        for (sample, prediction) in data.iter().zip(predictions.iter()) {
            self.check_target(&sample.output)?;
            total += self.cost_strategy.cost(&sample.output, prediction);
        }
        let n = data.len() as f64;
        let weights_sum: f64 = self.weights().iter().map(|w| w * w).sum();
        Ok(total / n + self.options.regularization / (2.0 * n) * weights_sum)
    }

    /// Accumulates the gradient of every synapse over `data`.
    ///
    /// Gradients add up across examples and across calls; they are cleared by
    /// `adjust_weights` or `gradients`. The L2 term is not part of the
    /// accumulated value, it is applied as decay by the weight update.
    pub fn backward(&mut self, data: &[Sample]) -> Result<&[SynapseLayer]> {
        // A bad sample must not leave a partial sum in the accumulators.
        for sample in data {
            self.check_input(&sample.input)?;
            self.check_target(&sample.output)?;
        }
        for sample in data {
            let prediction = self.predict(&sample.input)?;
            self.seed_output_errors(&prediction, &sample.output)?;
            self.propagate_errors();
            self.accumulate_gradients();
        }
        Ok(&self.synapse_layers)
    }

    /// Output error of the current example, from `predicted − expected`.
    pub fn seed_output_errors(&mut self, prediction: &[f64], target: &[f64]) -> Result<()> {
        self.check_target(target)?;
        if prediction.len() != target.len() {
            return Err(NetworkError::ShapeMismatch {
                what: "prediction",
                got: prediction.len(),
                expected: target.len(),
            });
        }
        let seeds = sub(prediction, target);
        let (cost, activation) = (self.cost_strategy, self.activation);
        self.output_layer_mut().seed_errors(&seeds, cost, &activation)
    }

    /// Hidden errors, from the last hidden layer down to the first.
    fn propagate_errors(&mut self) {
        for i in (1..self.layers.len() - 1).rev() {
            let (head, tail) = self.layers.split_at_mut(i + 1);
            head[i].compute_errors(&tail[0], &self.synapse_layers[i], &self.activation);
        }
    }

    fn accumulate_gradients(&mut self) {
        for i in 0..self.synapse_layers.len() {
            self.layers[i].compute_gradients(&self.layers[i + 1], &mut self.synapse_layers[i]);
        }
    }

    /// Applies one gradient-descent step using the gradients held by
    /// `synapse_layers`, then clears the network's accumulators:
    ///
    /// `w ← (1 − η·λ / dataset_size) · w − η / batch_size · g`
    ///
    /// `synapse_layers` must have the network's shape. To step on the
    /// network's own gradients, pass a copy of what `backward` returned.
    pub fn adjust_weights(
        &mut self,
        synapse_layers: &[SynapseLayer],
        batch_size: usize,
        dataset_size: usize,
    ) -> Result<()> {
        if synapse_layers.len() != self.synapse_layers.len() {
            return Err(NetworkError::ShapeMismatch {
                what: "synapse layers",
                got: synapse_layers.len(),
                expected: self.synapse_layers.len(),
            });
        }
        for (layer, (given, own)) in synapse_layers.iter().zip(&self.synapse_layers).enumerate() {
            if given.len() != own.len() {
                return Err(NetworkError::SynapseLayerMismatch {
                    layer,
                    got: given.len(),
                    expected: own.len(),
                });
            }
        }
        if batch_size == 0 || dataset_size == 0 {
            return Err(NetworkError::EmptyDataset);
        }
        self.descend(Some(synapse_layers), batch_size, dataset_size);
        Ok(())
    }

    /// Gradient-descent step on the network's own accumulated gradients.
    pub(crate) fn step(&mut self, batch_size: usize, dataset_size: usize) {
        self.descend(None, batch_size, dataset_size);
    }

    fn descend(&mut self, source: Option<&[SynapseLayer]>, batch_size: usize, dataset_size: usize) {
        let rate = self.options.learning_rate;
        let decay = 1.0 - rate * self.options.regularization / dataset_size as f64;
        let scale = rate / batch_size as f64;
        for (i, layer) in self.synapse_layers.iter_mut().enumerate() {
            for (j, synapse) in layer.synapses_mut().iter_mut().enumerate() {
                let gradient = match source {
                    Some(layers) => layers[i].synapses()[j].gradient,
                    None => synapse.gradient,
                };
                synapse.weight = decay * synapse.weight - scale * gradient;
                synapse.gradient = 0.0;
            }
        }
    }

    /// Flattened gradient of `data.len() · cost(data)` with respect to every
    /// weight, in `weights()` order. Accumulators are cleared afterwards.
    pub fn gradients(&mut self, data: &[Sample]) -> Result<Vec<f64>> {
        if data.is_empty() {
            return Err(NetworkError::EmptyDataset);
        }
        self.backward(data)?;
        let regularization = self.options.regularization;
        let mut gradients = Vec::with_capacity(self.synapse_count);
        for synapse in self.synapse_layers.iter_mut().flat_map(|l| l.synapses_mut().iter_mut()) {
            gradients.push(synapse.gradient + regularization * synapse.weight);
            synapse.gradient = 0.0;
        }
        Ok(gradients)
    }

    fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    fn output_layer_mut(&mut self) -> &mut Layer {
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        let expected = self.layers[0].size();
        if input.len() != expected {
            return Err(NetworkError::ShapeMismatch {
                what: "input",
                got: input.len(),
                expected,
            });
        }
        Ok(())
    }

    fn check_target(&self, target: &[f64]) -> Result<()> {
        let expected = self.output_layer().size();
        if target.len() != expected {
            return Err(NetworkError::ShapeMismatch {
                what: "target output",
                got: target.len(),
                expected,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::options::TrainingOverrides;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn data() -> Vec<Sample> {
        vec![
            Sample::new(vec![0.3, 0.5], vec![0.75]),
            Sample::new(vec![0.5, 0.1], vec![0.82]),
            Sample::new(vec![1.0, 0.2], vec![0.93]),
            Sample::new(vec![0.6, 0.3], vec![0.81]),
        ]
    }

    fn network() -> Network {
        let config = NetworkConfig::new(2, 1)
            .hidden_layers(vec![3])
            .training_options(TrainingOverrides {
                regularization: Some(0.0),
                iterations: Some(10),
                learning_rate: Some(1.0),
                batch_size: Some(2),
                ..Default::default()
            });
        Network::with_rng(config, &mut StdRng::seed_from_u64(42)).unwrap()
    }

    #[test]
    fn counts_synapses_without_downstream_bias() {
        let net = network();
        // (2 + 1) * 3 + (3 + 1) * 1
        assert_eq!(net.synapse_count(), 13);
        assert_eq!(net.weights().len(), 13);
        let shapes: Vec<usize> = net.synapse_layers().iter().map(SynapseLayer::len).collect();
        assert_eq!(shapes, vec![9, 4]);
    }

    #[test]
    fn layer_ids_are_per_network() {
        let a = network();
        let b = network();
        assert_eq!(a.layer_ids(), vec![LayerId(0), LayerId(1), LayerId(2)]);
        assert_eq!(a.layer_ids(), b.layer_ids());
    }

    #[test]
    fn weights_round_trip() {
        let mut net = network();
        let weights: Vec<f64> = (0..13).map(|i| i as f64).collect();
        net.set_weights(&weights).unwrap();
        assert_eq!(net.weights(), weights);
        assert_eq!(net.synapse_layers()[0].get(1, 2).weight, 5.0);
        assert_eq!(net.synapse_layers()[1].get(3, 0).weight, 12.0);
    }

    #[test]
    fn weights_of_wrong_length_are_rejected() {
        let mut net = network();
        let before = net.weights();
        let err = net.set_weights(&[0.0; 12]).unwrap_err();
        assert!(matches!(err, NetworkError::ShapeMismatch { what: "weights", got: 12, expected: 13 }));
        assert_eq!(net.weights(), before);
    }

    #[test]
    fn forward_returns_one_prediction_per_sample() {
        let mut net = network();
        let predictions = net.forward(&data()).unwrap();
        assert_eq!(predictions.len(), 4);
        assert!(predictions.iter().all(|p| p.len() == 1));
        assert!(predictions.iter().flatten().all(|&p| p > 0.0 && p < 1.0));
    }

    #[test]
    fn forward_is_deterministic() {
        let mut net = network();
        let first = net.forward(&data()).unwrap();
        let weights = net.weights();
        let second = net.forward(&data()).unwrap();
        assert_eq!(first, second);
        assert_eq!(net.weights(), weights);
        net.for_each_synapse(|s, _, _| assert_eq!(s.gradient, 0.0));
    }

    #[test]
    fn forward_rejects_wrong_input_width() {
        let mut net = network();
        let err = net.forward(&[Sample::unlabeled(vec![1.0])]).unwrap_err();
        assert!(matches!(err, NetworkError::ShapeMismatch { got: 1, expected: 2, .. }));
    }

    #[test]
    fn cost_is_mean_plus_penalty() {
        let mut net = network();
        net.set_weights(&[0.0; 13]).unwrap();
        // every output is sigmoid(0) = 0.5
        let expected: f64 = data()
            .iter()
            .map(|s| 0.5 * (0.5 - s.output[0]).powi(2))
            .sum::<f64>()
            / 4.0;
        assert_relative_eq!(net.cost(&data()).unwrap(), expected, epsilon = 1e-12);

        net.options_mut().regularization = 0.5;
        net.set_weights(&[1.0; 13]).unwrap();
        let unregularized = {
            let predictions = net.forward(&data()).unwrap();
            data()
                .iter()
                .zip(predictions)
                .map(|(s, p)| 0.5 * (p[0] - s.output[0]).powi(2))
                .sum::<f64>()
                / 4.0
        };
        // 0.5 / (2 * 4) * 13
        assert_relative_eq!(net.cost(&data()).unwrap(), unregularized + 0.8125, epsilon = 1e-12);
    }

    #[test]
    fn cost_rejects_bad_data() {
        let mut net = network();
        assert!(matches!(net.cost(&[]), Err(NetworkError::EmptyDataset)));
        let bad = [Sample::new(vec![0.1, 0.2], vec![0.5, 0.5])];
        assert!(matches!(net.cost(&bad), Err(NetworkError::ShapeMismatch { what: "target output", .. })));
    }

    #[test]
    fn backward_accumulates_across_calls() {
        let mut net = network();
        let data = data();
        let sample = &data[..1];
        let once: Vec<f64> = net.backward(sample).unwrap()[1].synapses().iter().map(|s| s.gradient).collect();
        let twice: Vec<f64> = net.backward(sample).unwrap()[1].synapses().iter().map(|s| s.gradient).collect();
        assert!(once.iter().any(|&g| g != 0.0));
        for (a, b) in once.iter().zip(&twice) {
            assert_relative_eq!(2.0 * a, *b, epsilon = 1e-15);
        }
    }

    #[test]
    fn failed_backward_leaves_no_partial_gradients() {
        let mut clean = network();
        let mut net = clean.clone();
        let good = Sample::new(vec![0.3, 0.5], vec![0.75]);
        let wide_target = Sample::new(vec![0.5, 0.1], vec![0.82, 0.1]);
        let wide_input = Sample::new(vec![0.5, 0.1, 0.2], vec![0.82]);

        let err = net.gradients(&[good.clone(), wide_target]).unwrap_err();
        assert!(matches!(err, NetworkError::ShapeMismatch { what: "target output", .. }));
        let err = net.backward(&[good.clone(), wide_input]).unwrap_err();
        assert!(matches!(err, NetworkError::ShapeMismatch { what: "input", got: 3, expected: 2 }));
        net.for_each_synapse(|s, _, _| assert_eq!(s.gradient, 0.0));

        let expected = clean.gradients(&[good.clone()]).unwrap();
        assert_eq!(net.gradients(&[good]).unwrap(), expected);
    }

    #[test]
    fn backward_shape_matches_network() {
        let mut net = network();
        let layers = net.backward(&data()).unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].len(), 9);
        assert_eq!(layers[1].len(), 4);
    }

    #[test]
    fn output_error_is_seeded_from_prediction_minus_target() {
        let mut net = network();
        let prediction = net.predict(&[0.3, 0.5]).unwrap();
        net.seed_output_errors(&prediction, &[0.75]).unwrap();
        let output = &net.layers()[2].neurons()[0];
        let expected = (prediction[0] - 0.75) * crate::activation::sigmoid_prime(output.z());
        assert_relative_eq!(output.delta(), expected, epsilon = 1e-15);
    }

    #[test]
    fn adjust_weights_applies_decay_and_clears_gradients() {
        let mut net = network();
        net.options_mut().regularization = 0.1;
        net.set_weights(&[1.0; 13]).unwrap();
        net.backward(&data()).unwrap();
        let mut given = net.synapse_layers().to_vec();
        for layer in &mut given {
            for synapse in layer.synapses_mut() {
                synapse.gradient = 1.0;
            }
        }
        net.adjust_weights(&given, 2, 4).unwrap();
        // (1 - 1.0 * 0.1 / 4) * 1 - 1.0 / 2 * 1
        for &w in &net.weights() {
            assert_relative_eq!(w, 0.475, epsilon = 1e-15);
        }
        net.for_each_synapse(|s, _, _| assert_eq!(s.gradient, 0.0));
    }

    #[test]
    fn adjust_weights_checks_shape() {
        let mut net = network();
        let mut rng = StdRng::seed_from_u64(0);
        let mut ids = LayerIdGen::new();
        let small = Layer::new(LayerKind::Output, 1, &mut ids);

        let too_many = vec![small.link_to(&small, &mut rng); 4];
        assert!(matches!(
            net.adjust_weights(&too_many, 1, 1),
            Err(NetworkError::ShapeMismatch { what: "synapse layers", got: 4, expected: 2 })
        ));

        let mut wrong_second = net.synapse_layers().to_vec();
        wrong_second[1] = small.link_to(&small, &mut rng);
        assert!(matches!(
            net.adjust_weights(&wrong_second, 1, 1),
            Err(NetworkError::SynapseLayerMismatch { layer: 1, got: 1, expected: 4 })
        ));

        let own = net.synapse_layers().to_vec();
        assert!(matches!(net.adjust_weights(&own, 0, 1), Err(NetworkError::EmptyDataset)));
    }

    #[test]
    fn gradients_are_flattened_and_cleared() {
        let mut net = network();
        let gradients = net.gradients(&data()).unwrap();
        assert_eq!(gradients.len(), 13);
        net.for_each_synapse(|s, _, _| assert_eq!(s.gradient, 0.0));
        assert_eq!(net.gradients(&data()).unwrap(), gradients);
    }

    #[test]
    fn for_each_synapse_visits_in_order() {
        let net = network();
        let mut visited = Vec::new();
        net.for_each_synapse(|_, i, j| visited.push((i, j)));
        assert_eq!(visited.len(), 13);
        assert_eq!(visited[0], (0, 0));
        assert_eq!(visited[8], (0, 8));
        assert_eq!(visited[9], (1, 0));
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(matches!(Network::new(NetworkConfig::new(0, 1)), Err(NetworkError::InvalidConfig(_))));
        let config = NetworkConfig::new(2, 1).training_options(TrainingOverrides {
            learning_rate: Some(-1.0),
            ..Default::default()
        });
        assert!(matches!(Network::new(config), Err(NetworkError::InvalidConfig(_))));
    }
}
