use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use crate::curve::SampleGrid;
use crate::train::pass_stats::PassStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `passes`      : number of full passes over the training set; `None`
///                    trains until stopped
/// - `render_every`: every this many passes, each network's curve is
///                    sampled on `grid` and attached to its `PassStats`;
///                    `0` never samples
/// - `grid`        : x positions the curve is sampled at
/// - `progress_tx` : optional channel sender; one `PassStats` per network
///                    per pass. If the receiver is dropped the loop stops.
/// - `stop_flag`   : optional atomic flag; when set to `true` from another
///                    thread the loop stops after the current pass.
pub struct TrainConfig {
    pub passes: Option<usize>,
    pub render_every: usize,
    pub grid: SampleGrid,
    pub progress_tx: Option<mpsc::Sender<PassStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` on the default grid with no progress channel
    /// and no stop flag.
    pub fn new(passes: Option<usize>, render_every: usize) -> Self {
        TrainConfig {
            passes,
            render_every,
            grid: SampleGrid::default(),
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub(crate) fn renders_on(&self, pass: usize) -> bool {
        self.render_every > 0 && pass % self.render_every == 0
    }
}
