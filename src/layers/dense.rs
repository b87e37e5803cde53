use rand::Rng;

use crate::{activation::Tanh, math::Matrix, optim::Sgd};

/// Half-width of the uniform range parameters are drawn from.
pub const INIT_HALF_RANGE: f64 = 0.5;

/// A fully connected tanh layer: the incoming weights and biases of one
/// non-input layer of the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// `size` rows of `input_size` columns.
    pub weights: Matrix,
    pub biases: Vec<f64>,
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> Layer {
        let biases = (0..size)
            .map(|_| rng.gen_range(-INIT_HALF_RANGE..=INIT_HALF_RANGE))
            .collect();
        let weights = Matrix::uniform(size, input_size, INIT_HALF_RANGE, rng);

        Layer { weights, biases }
    }

    pub fn size(&self) -> usize {
        self.biases.len()
    }

    /// `output[j] = tanh(Σ_k w[j][k] * input[k] + b[j])`
    pub fn feed_from(&self, input: &[f64], output: &mut [f64]) {
        for (j, out) in output.iter_mut().enumerate() {
            let mut value = 0.0;
            for (w, a) in self.weights.row(j).iter().zip(input) {
                value += w * a;
            }
            *out = Tanh::function(value + self.biases[j]);
        }
    }

    /// Applies one SGD update given this layer's deltas and the activations
    /// that fed it.
    pub fn apply_delta(&mut self, delta: &[f64], inputs: &[f64], optimizer: &Sgd) {
        for (j, &d) in delta.iter().enumerate() {
            optimizer.step(&mut self.biases[j], d);
            for (w, &a) in self.weights.data[j].iter_mut().zip(inputs) {
                optimizer.step(w, d * a);
            }
        }
    }

    /// Deltas for the layer feeding this one:
    /// `δ_prev[k] = (Σ_j δ[j] * w[j][k]) * (1 - a_prev[k]²)`.
    ///
    /// Reads the weights as they are at call time, so calling it after
    /// `apply_delta` propagates through the updated weights.
    pub fn backpropagate(&self, delta: &[f64], inputs: &[f64]) -> Vec<f64> {
        inputs
            .iter()
            .enumerate()
            .map(|(k, &a)| {
                let mut sum = 0.0;
                for (j, &d) in delta.iter().enumerate() {
                    sum += d * self.weights.data[j][k];
                }
                sum * Tanh::derivative_from_output(a)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(weights: Vec<Vec<f64>>, biases: Vec<f64>) -> Layer {
        Layer { weights: Matrix::from_data(weights).unwrap(), biases }
    }

    #[test]
    fn feed_from_applies_weights_then_tanh() {
        let l = layer(vec![vec![0.5, -1.0], vec![2.0, 0.0]], vec![0.1, -0.3]);
        let mut out = [0.0; 2];
        l.feed_from(&[1.0, 0.5], &mut out);
        assert_eq!(out[0], (0.5 * 1.0 + -1.0 * 0.5 + 0.1f64).tanh());
        assert_eq!(out[1], (2.0 * 1.0 + 0.0 * 0.5 + -0.3f64).tanh());
    }

    #[test]
    fn apply_delta_moves_against_gradient() {
        let mut l = layer(vec![vec![1.0, 1.0]], vec![0.0]);
        l.apply_delta(&[2.0], &[0.5, -1.0], &Sgd::new(0.1));
        assert!((l.biases[0] - -0.2).abs() < 1e-12);
        assert!((l.weights.data[0][0] - 0.9).abs() < 1e-12);
        assert!((l.weights.data[0][1] - 1.2).abs() < 1e-12);
    }

    #[test]
    fn backpropagate_scales_by_tanh_derivative_of_input_activation() {
        let l = layer(vec![vec![0.5, 2.0], vec![-1.0, 1.0]], vec![0.0, 0.0]);
        let prev = l.backpropagate(&[1.0, 0.5], &[0.0, 0.5]);
        assert!((prev[0] - (1.0 * 0.5 + 0.5 * -1.0) * 1.0).abs() < 1e-12);
        assert!((prev[1] - (1.0 * 2.0 + 0.5 * 1.0) * 0.75).abs() < 1e-12);
    }
}
