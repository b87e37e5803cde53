use log::debug;
use rand::Rng;

use crate::{
    activation::Tanh,
    error::{NetError, Result},
    formula::{ClosedForm, Style},
    layers::Layer,
    loss::MseLoss,
    math::Matrix,
    optim::Sgd,
    store::ParameterStore,
};

/// A fully connected tanh network trained one sample at a time.
///
/// `layers[l - 1]` holds the incoming weights and biases of activation layer
/// `l`; the input layer (activation layer 0) has neither. Training and
/// inference share `activations` as scratch space, so they take `&mut self`.
#[derive(Debug, Clone)]
pub struct Network {
    id: u32,
    layer_sizes: Vec<usize>,
    activations: Vec<Vec<f64>>,
    layers: Vec<Layer>,
    optimizer: Sgd,
}

impl Network {
    /// Builds a randomly initialised network using the thread-local RNG.
    pub fn new(id: u32, layer_sizes: &[usize]) -> Result<Network> {
        Network::with_rng(id, layer_sizes, &mut rand::thread_rng())
    }

    /// Builds a randomly initialised network; parameters are drawn from
    /// U[-0.5, 0.5].
    pub fn with_rng<R: Rng + ?Sized>(
        id: u32,
        layer_sizes: &[usize],
        rng: &mut R,
    ) -> Result<Network> {
        validate_sizes(layer_sizes)?;

        let layers = layer_sizes
            .windows(2)
            .map(|pair| Layer::new(pair[1], pair[0], &mut *rng))
            .collect();

        Ok(Network::assemble(id, layer_sizes, layers))
    }

    /// Builds a network from explicit parameters. `biases[l]` and `weights[l]`
    /// belong to activation layer `l + 1`.
    pub fn from_parameters(
        id: u32,
        layer_sizes: &[usize],
        biases: Vec<Vec<f64>>,
        weights: Vec<Vec<Vec<f64>>>,
    ) -> Result<Network> {
        validate_sizes(layer_sizes)?;
        let expected_layers = layer_sizes.len() - 1;
        if biases.len() != expected_layers || weights.len() != expected_layers {
            return Err(NetError::InvalidArchitecture(format!(
                "{} layer sizes need {} bias and weight sets, got {} and {}",
                layer_sizes.len(),
                expected_layers,
                biases.len(),
                weights.len()
            )));
        }

        let mut layers = Vec::with_capacity(expected_layers);
        for (l, (b, w)) in biases.into_iter().zip(weights).enumerate() {
            let (input_size, size) = (layer_sizes[l], layer_sizes[l + 1]);
            let weights = Matrix::from_data(w)
                .filter(|m| m.rows == size && m.cols == input_size)
                .ok_or_else(|| {
                    NetError::InvalidArchitecture(format!(
                        "weights[{l}] must be {size}x{input_size}"
                    ))
                })?;
            if b.len() != size {
                return Err(NetError::InvalidArchitecture(format!(
                    "biases[{l}] must have {size} entries, got {}",
                    b.len()
                )));
            }
            layers.push(Layer { weights, biases: b });
        }

        Ok(Network::assemble(id, layer_sizes, layers))
    }

    fn assemble(id: u32, layer_sizes: &[usize], layers: Vec<Layer>) -> Network {
        let activations = layer_sizes.iter().map(|&size| vec![0.0; size]).collect();
        Network {
            id,
            layer_sizes: layer_sizes.to_vec(),
            activations,
            layers,
            optimizer: Sgd::default(),
        }
    }

    /// Replaces the default learning rate (0.05). Meant for construction time;
    /// the rate stays fixed while training.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Network {
        self.optimizer = Sgd::new(learning_rate);
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn input_size(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate
    }

    /// Incoming parameters of every non-input layer, input-adjacent first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Biases of activation layer `layer + 1`.
    pub fn biases(&self, layer: usize) -> &[f64] {
        &self.layers[layer].biases
    }

    /// Weights into activation layer `layer + 1`.
    pub fn weights(&self, layer: usize) -> &Matrix {
        &self.layers[layer].weights
    }

    /// Layer sizes joined with dashes, e.g. `1-3-2-1`.
    pub fn architecture(&self) -> String {
        self.layer_sizes
            .iter()
            .map(|size| size.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Forward pass. Overwrites the scratch activations and returns a copy of
    /// the output layer.
    ///
    /// # Panics
    /// If `input.len()` differs from the input layer width.
    pub fn predict(&mut self, input: &[f64]) -> Vec<f64> {
        assert_eq!(
            input.len(),
            self.input_size(),
            "network {}: input has {} values, input layer has {}",
            self.id,
            input.len(),
            self.input_size()
        );

        self.activations[0].copy_from_slice(input);

        for (l, layer) in self.layers.iter().enumerate() {
            let (previous, next) = self.activations.split_at_mut(l + 1);
            layer.feed_from(&previous[l], &mut next[0]);
        }

        self.activations[self.layer_sizes.len() - 1].clone()
    }

    /// One online gradient-descent step on a single (input, expected) pair.
    ///
    /// # Panics
    /// If either vector does not match its endpoint layer width.
    pub fn train_one(&mut self, input: &[f64], expected: &[f64]) {
        self.backpropagate(input, expected);
    }

    /// Runs the training step and returns the output computed before the
    /// parameters moved.
    pub(crate) fn backpropagate(&mut self, input: &[f64], expected: &[f64]) -> Vec<f64> {
        let output = self.predict(input);
        assert_eq!(
            expected.len(),
            output.len(),
            "network {}: expected has {} values, output layer has {}",
            self.id,
            expected.len(),
            output.len()
        );

        // δ_out = (output - expected) * tanh'(z). tanh' is taken from the
        // activation itself: 1 - output², not 1 - tanh(z)² recomputed from z.
        let mut delta: Vec<f64> = MseLoss::derivative(&output, expected)
            .iter()
            .zip(&output)
            .map(|(error, &y)| error * Tanh::derivative_from_output(y))
            .collect();

        // Output layer first, then hidden layers from the output side down.
        // Each layer is updated before the deltas below it are computed from
        // its (now updated) weights.
        for l in (0..self.layers.len()).rev() {
            self.layers[l].apply_delta(&delta, &self.activations[l], &self.optimizer);
            if l > 0 {
                delta = self.layers[l].backpropagate(&delta, &self.activations[l]);
            }
        }

        output
    }

    /// Total number of persisted scalars (all biases plus all weights).
    pub fn parameter_count(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| layer.biases.len() + layer.weights.len())
            .sum()
    }

    /// Flat parameter sequence: every bias (layer, then neuron), followed by
    /// every weight (layer, then neuron, then neuron in the previous layer).
    pub fn parameters(&self) -> Vec<f64> {
        let mut values = Vec::with_capacity(self.parameter_count());
        for layer in &self.layers {
            values.extend_from_slice(&layer.biases);
        }
        for layer in &self.layers {
            values.extend(layer.weights.values());
        }
        values
    }

    /// Overwrites biases and weights from a sequence laid out as
    /// [`Network::parameters`] returns it. The length is checked first, so a
    /// mismatch leaves the network untouched.
    pub fn set_parameters(&mut self, values: &[f64]) -> Result<()> {
        let expected = self.parameter_count();
        if values.len() != expected {
            return Err(NetError::ParameterCountMismatch {
                id: self.id,
                expected,
                found: values.len(),
            });
        }

        let bias_count: usize = self.layers.iter().map(|layer| layer.biases.len()).sum();
        let (bias_values, weight_values) = values.split_at(bias_count);

        let biases = self.layers.iter_mut().flat_map(|layer| layer.biases.iter_mut());
        for (slot, &value) in biases.zip(bias_values) {
            *slot = value;
        }
        let weights = self.layers.iter_mut().flat_map(|layer| layer.weights.values_mut());
        for (slot, &value) in weights.zip(weight_values) {
            *slot = value;
        }

        Ok(())
    }

    /// Writes the parameters to this network's slot in `store`.
    pub fn save<S: ParameterStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.write(self.id, &self.parameters())?;
        debug!(
            "network {} ({}): saved {} parameters",
            self.id,
            self.architecture(),
            self.parameter_count()
        );
        Ok(())
    }

    /// Reads this network's slot from `store`.
    ///
    /// Returns `Ok(false)` without touching anything when the slot is absent,
    /// and `ParameterCountMismatch` when it was written by a different shape.
    pub fn load<S: ParameterStore + ?Sized>(&mut self, store: &S) -> Result<bool> {
        match store.read(self.id)? {
            None => {
                debug!("network {}: no saved parameters", self.id);
                Ok(false)
            }
            Some(values) => {
                self.set_parameters(&values)?;
                debug!(
                    "network {} ({}): loaded {} parameters",
                    self.id,
                    self.architecture(),
                    values.len()
                );
                Ok(true)
            }
        }
    }

    /// The network as a single expression, `y = tanh(...)`.
    ///
    /// Fails with `UnsupportedShape` unless the network has exactly one
    /// input and one output.
    pub fn to_closed_form(&self) -> Result<String> {
        ClosedForm::new(Style::Math).equation(self)
    }
}

fn validate_sizes(layer_sizes: &[usize]) -> Result<()> {
    if layer_sizes.len() < 2 {
        return Err(NetError::InvalidArchitecture(format!(
            "need at least an input and an output layer, got {} layer(s)",
            layer_sizes.len()
        )));
    }
    if let Some(l) = layer_sizes.iter().position(|&size| size == 0) {
        return Err(NetError::InvalidArchitecture(format!("layer {l} has no neurons")));
    }
    Ok(())
}
