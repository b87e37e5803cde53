//! Persistent slots for network parameters, keyed by network id.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Somewhere a flat parameter sequence can be written to and read back from.
pub trait ParameterStore {
    /// Replaces whatever the slot for `id` held.
    fn write(&mut self, id: u32, values: &[f64]) -> Result<()>;

    /// Reads the slot for `id`; `Ok(None)` when nothing was ever written.
    fn read(&self, id: u32) -> Result<Option<Vec<f64>>>;
}
