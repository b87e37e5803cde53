use serde::{Serialize, Deserialize};

/// Per-network statistics emitted by `train_loop` after every pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassStats {
    /// 1-based pass number.
    pub pass: usize,
    pub network_id: u32,
    pub layer_sizes: Vec<usize>,
    /// Mean squared error over the samples of this pass.
    pub mse: f64,
    /// Sampled (x, y) curve; only present on render passes.
    pub curve: Option<Vec<(f64, f64)>>,
    /// Wall-clock duration of the whole pass (all networks) in milliseconds.
    pub elapsed_ms: u64,
}
