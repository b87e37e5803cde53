/// Hyperbolic tangent, the activation of every non-input neuron.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tanh;

impl Tanh {
    pub fn function(x: f64) -> f64 {
        x.tanh()
    }

    /// Derivative written in terms of the activation's own output.
    ///
    /// With `y = tanh(z)`, `dy/dz = 1 - y²`. Backprop passes the stored
    /// activation `y` here, never the pre-activation sum `z`; feeding `z`
    /// would compute `1 - z²`, which is wrong.
    pub fn derivative_from_output(y: f64) -> f64 {
        1.0 - y * y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivative_matches_finite_difference() {
        for &z in &[-2.0, -0.3, 0.0, 0.7, 1.5] {
            let h = 1e-6;
            let numeric = (Tanh::function(z + h) - Tanh::function(z - h)) / (2.0 * h);
            let analytic = Tanh::derivative_from_output(Tanh::function(z));
            assert!((numeric - analytic).abs() < 1e-8, "z={z}: {numeric} vs {analytic}");
        }
    }
}
