use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};
use crate::network::Network;

/// Evenly spaced x positions over `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleGrid {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for SampleGrid {
    fn default() -> Self {
        SampleGrid { start: -1.0, end: 1.0, step: 0.05 }
    }
}

impl SampleGrid {
    /// x values, computed from the index rather than accumulated so the grid
    /// does not drift.
    pub fn xs(&self) -> Vec<f64> {
        if !(self.step > 0.0) || !(self.end > self.start) {
            return Vec::new();
        }
        // Tolerance keeps `end` itself out when it lands a rounding error short.
        let limit = self.end - self.step * 1e-9;
        (0..)
            .map(|i| self.start + self.step * i as f64)
            .take_while(|&x| x < limit)
            .collect()
    }
}

/// The network's first output at every grid position, as plottable points.
pub fn sample_curve(network: &mut Network, grid: &SampleGrid) -> Result<Vec<(f64, f64)>> {
    if network.input_size() != 1 {
        return Err(NetError::UnsupportedShape {
            input: network.input_size(),
            output: network.output_size(),
        });
    }
    Ok(grid
        .xs()
        .into_iter()
        .map(|x| (x, network.predict(&[x])[0]))
        .collect())
}
