use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{debug, info};

use crate::curve::sample_curve;
use crate::dataset::TrainingSet;
use crate::registry::Registry;
use crate::train::pass_stats::PassStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Repeatedly trains every network in `registry` on `set` and returns the
/// number of completed passes.
///
/// Each pass gives every network (in id order) one `train_one` step per
/// sample (in set order). Passes run back to back on the calling thread.
///
/// # Early termination
/// The loop stops before `config.passes` is reached if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_loop(registry: &mut Registry, set: &TrainingSet, config: &TrainConfig) -> usize {
    train_loop_with(registry, set, config, |_, _| {})
}

/// Like [`train_loop`], but calls `after_pass(pass, registry)` once every
/// network has finished each pass. The binary uses it to checkpoint.
pub fn train_loop_with<F>(
    registry: &mut Registry,
    set: &TrainingSet,
    config: &TrainConfig,
    mut after_pass: F,
) -> usize
where
    F: FnMut(usize, &Registry),
{
    let mut completed = 0;

    loop {
        if config.passes.is_some_and(|limit| completed >= limit) || stop_requested(config) {
            break;
        }

        let pass = completed + 1;
        let t_start = Instant::now();

        let losses = registry.train_pass(set);
        completed = pass;

        let elapsed_ms = t_start.elapsed().as_millis() as u64;
        let render = config.renders_on(pass);

        debug!("pass {pass}: {} networks in {elapsed_ms} ms", losses.len());
        if render {
            info!("pass {pass}: {}", summarize(registry, &losses));
        }

        after_pass(pass, &*registry);

        // ── Emit progress ─────────────────────────────────────────────────
        if let Some(ref tx) = config.progress_tx {
            for (id, mse) in losses {
                let Some(network) = registry.get_mut(id) else { continue };
                let curve = if render {
                    sample_curve(network, &config.grid).ok()
                } else {
                    None
                };
                let stats = PassStats {
                    pass,
                    network_id: id,
                    layer_sizes: network.layer_sizes().to_vec(),
                    mse,
                    curve,
                    elapsed_ms,
                };
                // If the receiver has been dropped, stop training.
                if tx.send(stats).is_err() {
                    debug!("progress receiver dropped after pass {pass}");
                    return completed;
                }
            }
        }
    }

    completed
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// `1-1 mse=0.3120, 1-2-1 mse=0.0815, ...`
fn summarize(registry: &Registry, losses: &[(u32, f64)]) -> String {
    losses
        .iter()
        .filter_map(|&(id, mse)| {
            registry
                .get(id)
                .map(|network| format!("{} mse={mse:.4}", network.architecture()))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
