use std::collections::HashMap;

use crate::error::Result;
use crate::store::ParameterStore;

/// Keeps parameter slots in memory. Handy for tests and for snapshotting a
/// registry without touching disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<u32, Vec<f64>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl ParameterStore for MemoryStore {
    fn write(&mut self, id: u32, values: &[f64]) -> Result<()> {
        self.slots.insert(id, values.to_vec());
        Ok(())
    }

    fn read(&self, id: u32) -> Result<Option<Vec<f64>>> {
        Ok(self.slots.get(&id).cloned())
    }
}
