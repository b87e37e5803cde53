use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};

use crate::error::Result;
use crate::formula::export_all;
use crate::registry::Registry;
use crate::store::ParameterStore;

/// Saves (and optionally exports) a registry while a run is still going:
/// every `save_every` passes, and whenever another thread raises
/// `save_requested` or `export_requested`.
///
/// Meant to be called from the `after_pass` hook of
/// [`train_loop_with`](crate::train::train_loop_with).
#[derive(Debug, Clone, Default)]
pub struct Checkpoint {
    /// `0` saves only on request.
    pub save_every: usize,
    /// Where formulas go. Saving also exports when this is set.
    pub export_dir: Option<PathBuf>,
    pub save_requested: Arc<AtomicBool>,
    pub export_requested: Arc<AtomicBool>,
}

impl Checkpoint {
    pub fn new(save_every: usize) -> Self {
        Checkpoint { save_every, ..Checkpoint::default() }
    }

    pub fn with_exports(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = Some(dir.into());
        self
    }

    /// Saves and exports whatever is due after `pass`. Pending requests are
    /// cleared even when the save fails. Returns whether the registry was
    /// saved.
    pub fn after_pass<S: ParameterStore + ?Sized>(
        &self,
        pass: usize,
        registry: &Registry,
        store: &mut S,
    ) -> Result<bool> {
        let requested = self.save_requested.swap(false, Ordering::Relaxed);
        let save = requested || (self.save_every > 0 && pass % self.save_every == 0);
        let export_requested = self.export_requested.swap(false, Ordering::Relaxed);

        if export_requested || (save && self.export_dir.is_some()) {
            match &self.export_dir {
                Some(dir) => {
                    export_all(registry, dir);
                }
                None => warn!("pass {pass}: formula export requested but no export directory set"),
            }
        }

        if save {
            registry.save_all(store)?;
            info!("pass {pass}: checkpoint saved");
        }
        Ok(save)
    }
}
