use std::collections::HashMap;

use crate::error::{NetError, Result};
use crate::network::Network;

/// How a tanh node and its constants are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// `tanh(0.5*x-0.25)`, for reading or pasting into a CAS.
    Math,
    /// `(0.5*x-0.25).tanh()` with `f64` literals, valid Rust.
    Rust,
}

/// Expands a single-input, single-output network into one nested tanh
/// expression in `x`. Nothing is simplified; the expression for each neuron
/// embeds the full expressions of the layer before it.
#[derive(Debug, Clone, Copy)]
pub struct ClosedForm {
    style: Style,
}

impl ClosedForm {
    pub fn new(style: Style) -> ClosedForm {
        ClosedForm { style }
    }

    /// `y = <expression>`
    pub fn equation(&self, network: &Network) -> Result<String> {
        Ok(format!("y = {}", self.expression(network)?))
    }

    /// The right-hand side only.
    pub fn expression(&self, network: &Network) -> Result<String> {
        let sizes = network.layer_sizes();
        let (input, output) = (network.input_size(), network.output_size());
        if input != 1 || output != 1 {
            return Err(NetError::UnsupportedShape { input, output });
        }

        // "layer-neuron" -> expression for that neuron's activation.
        let mut values: HashMap<String, String> = HashMap::new();
        values.insert("0-0".to_string(), "x".to_string());

        for (l, layer) in network.layers().iter().enumerate() {
            let mut superseded = Vec::with_capacity(sizes[l]);
            for j in 0..layer.size() {
                let mut terms = Vec::with_capacity(sizes[l] + 1);
                for (k, weight) in layer.weights.row(j).iter().enumerate() {
                    let key = format!("{l}-{k}");
                    terms.push(format!("{}*{}", self.number(*weight), values[&key]));
                    if !superseded.contains(&key) {
                        superseded.push(key);
                    }
                }
                terms.push(self.number(layer.biases[j]));
                values.insert(format!("{}-{}", l + 1, j), self.tanh(&terms.join("+")));
            }
            for key in superseded {
                values.remove(&key);
            }
        }

        let last = format!("{}-0", sizes.len() - 1);
        let expression = values.remove(&last).unwrap_or_default();
        Ok(expression.replace("+-", "-").replace("++", "+"))
    }

    fn number(&self, value: f64) -> String {
        match self.style {
            Style::Math => format!("{value}"),
            // Debug keeps the decimal point, so `3` becomes `3.0` and stays an f64.
            Style::Rust => format!("{value:?}"),
        }
    }

    fn tanh(&self, inner: &str) -> String {
        match self.style {
            Style::Math => format!("tanh({inner})"),
            Style::Rust => format!("({inner}).tanh()"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    /// Evaluates the `Style::Math` grammar: numbers, `x`, `+ - *`, `tanh(..)`.
    struct Eval<'a> {
        src: &'a [u8],
        pos: usize,
        x: f64,
    }

    impl<'a> Eval<'a> {
        fn run(src: &'a str, x: f64) -> f64 {
            let mut e = Eval { src: src.as_bytes(), pos: 0, x };
            let value = e.sum();
            assert_eq!(e.pos, e.src.len(), "trailing input in {src}");
            value
        }

        fn peek(&self) -> Option<u8> {
            self.src.get(self.pos).copied()
        }

        fn sum(&mut self) -> f64 {
            let mut value = self.product();
            while let Some(op @ (b'+' | b'-')) = self.peek() {
                self.pos += 1;
                let rhs = self.product();
                value = if op == b'+' { value + rhs } else { value - rhs };
            }
            value
        }

        fn product(&mut self) -> f64 {
            let mut value = self.factor();
            while self.peek() == Some(b'*') {
                self.pos += 1;
                value *= self.factor();
            }
            value
        }

        fn factor(&mut self) -> f64 {
            match self.peek() {
                Some(b'-') => {
                    self.pos += 1;
                    -self.factor()
                }
                Some(b'x') => {
                    self.pos += 1;
                    self.x
                }
                Some(b't') => {
                    assert!(self.src[self.pos..].starts_with(b"tanh("));
                    self.pos += 5;
                    let inner = self.sum();
                    assert_eq!(self.peek(), Some(b')'));
                    self.pos += 1;
                    inner.tanh()
                }
                _ => {
                    let start = self.pos;
                    while matches!(self.peek(), Some(b'0'..=b'9' | b'.')) {
                        self.pos += 1;
                    }
                    std::str::from_utf8(&self.src[start..self.pos]).unwrap().parse().unwrap()
                }
            }
        }
    }

    fn rhs(equation: &str) -> &str {
        equation.strip_prefix("y = ").unwrap()
    }

    #[test]
    fn single_layer_formula_matches_predict() {
        let mut net = Network::with_rng(0, &[1, 1], &mut StdRng::seed_from_u64(4)).unwrap();
        let formula = net.to_closed_form().unwrap();
        for x in [-1.0, -0.32, 0.0, 0.5, 1.0] {
            let expected = net.predict(&[x])[0];
            assert!((Eval::run(rhs(&formula), x) - expected).abs() < 1e-12, "{formula} at {x}");
        }
    }

    #[test]
    fn deep_formula_matches_predict() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut net = Network::with_rng(8, &[1, 3, 2, 3, 1], &mut rng).unwrap();
        let formula = net.to_closed_form().unwrap();
        for x in [-0.9, 0.1, 0.75] {
            let expected = net.predict(&[x])[0];
            assert!((Eval::run(rhs(&formula), x) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn writes_weights_then_bias_and_folds_signs() {
        let net = Network::from_parameters(
            0,
            &[1, 2, 1],
            vec![vec![0.5, -0.25], vec![0.0]],
            vec![vec![vec![2.0], vec![-1.5]], vec![vec![0.3, -0.4]]],
        )
        .unwrap();

        assert_eq!(
            net.to_closed_form().unwrap(),
            "y = tanh(0.3*tanh(2*x+0.5)-0.4*tanh(-1.5*x-0.25)+0)"
        );
        assert_eq!(
            ClosedForm::new(Style::Rust).expression(&net).unwrap(),
            "(0.3*(2.0*x+0.5).tanh()-0.4*(-1.5*x-0.25).tanh()+0.0).tanh()"
        );
    }

    #[test]
    fn needs_one_input_and_one_output() {
        let net = Network::with_rng(1, &[2, 3, 1], &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(matches!(
            net.to_closed_form(),
            Err(NetError::UnsupportedShape { input: 2, output: 1 })
        ));
        let net = Network::with_rng(1, &[1, 2], &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(matches!(net.to_closed_form(), Err(NetError::UnsupportedShape { .. })));
    }
}
