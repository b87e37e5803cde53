use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::network::network::Network;
use crate::optim::Sgd;

/// A serializable description of one network: its id, its layer widths
/// (input first, output last) and its learning rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub id: u32,
    pub layers: Vec<usize>,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

fn default_learning_rate() -> f64 {
    Sgd::DEFAULT_LEARNING_RATE
}

impl NetworkSpec {
    pub fn new(id: u32, layers: &[usize]) -> NetworkSpec {
        NetworkSpec {
            id,
            layers: layers.to_vec(),
            learning_rate: default_learning_rate(),
        }
    }

    /// The side-by-side comparison of single-input, single-output shapes:
    /// no hidden layer, a one-neuron bottleneck, widening single hidden
    /// layers, and deeper nets with a squeeze in the middle.
    pub fn comparison_set() -> Vec<NetworkSpec> {
        let shapes: [&[usize]; 9] = [
            &[1, 1],
            &[1, 1, 1],
            &[1, 2, 1],
            &[1, 3, 1],
            &[1, 4, 1],
            &[1, 2, 2, 1],
            &[1, 3, 2, 1],
            &[1, 3, 3, 1],
            &[1, 3, 2, 3, 1],
        ];
        shapes
            .iter()
            .enumerate()
            .map(|(id, layers)| NetworkSpec::new(id as u32, layers))
            .collect()
    }

    /// Builds a freshly initialised network of this shape.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network> {
        Ok(Network::with_rng(self.id, &self.layers, rng)?.with_learning_rate(self.learning_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn learning_rate_defaults_when_omitted() {
        let spec: NetworkSpec =
            serde_json::from_str(r#"{ "id": 3, "layers": [1, 3, 1] }"#).unwrap();
        assert_eq!(spec, NetworkSpec::new(3, &[1, 3, 1]));
        assert_eq!(spec.learning_rate, 0.05);
    }

    #[test]
    fn comparison_set_ids_are_sequential() {
        let specs = NetworkSpec::comparison_set();
        assert_eq!(specs.len(), 9);
        for (i, spec) in specs.iter().enumerate() {
            assert_eq!(spec.id, i as u32);
            assert_eq!((spec.layers[0], *spec.layers.last().unwrap()), (1, 1));
        }
        assert_eq!(specs[8].layers, vec![1, 3, 2, 3, 1]);
    }

    #[test]
    fn build_applies_learning_rate() {
        let spec = NetworkSpec { id: 1, layers: vec![1, 2, 1], learning_rate: 0.01 };
        let net = spec.build(&mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!((net.id(), net.learning_rate()), (1, 0.01));
        assert_eq!(net.layer_sizes(), &[1, 2, 1]);
    }
}
