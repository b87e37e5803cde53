/// Plain stochastic gradient descent with a fixed step size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub const DEFAULT_LEARNING_RATE: f64 = 0.05;

    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// `param -= grad * learning_rate`
    pub fn step(&self, param: &mut f64, grad: f64) {
        *param -= grad * self.learning_rate;
    }
}

impl Default for Sgd {
    fn default() -> Self {
        Sgd::new(Sgd::DEFAULT_LEARNING_RATE)
    }
}
