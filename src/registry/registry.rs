use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use log::{debug, info, warn};
use rand::Rng;

use crate::dataset::TrainingSet;
use crate::error::Result;
use crate::network::{Network, NetworkSpec};
use crate::store::ParameterStore;
use crate::train::trainer::train_pass;

/// Networks of different shapes trained side by side on the same data,
/// kept and visited in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    networks: BTreeMap<u32, Network>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// One network per spec. A later spec with a repeated id replaces the
    /// earlier one.
    pub fn from_specs<R: Rng + ?Sized>(specs: &[NetworkSpec], rng: &mut R) -> Result<Registry> {
        let mut registry = Registry::new();
        for spec in specs {
            registry.insert(spec.build(rng)?);
        }
        Ok(registry)
    }

    /// The nine shapes of [`NetworkSpec::comparison_set`].
    pub fn comparison_set<R: Rng + ?Sized>(rng: &mut R) -> Result<Registry> {
        Registry::from_specs(&NetworkSpec::comparison_set(), rng)
    }

    /// Builds a network from `rng` and registers it under `id`, replacing any
    /// previous entry.
    pub fn create<R: Rng + ?Sized>(
        &mut self,
        id: u32,
        layer_sizes: &[usize],
        rng: &mut R,
    ) -> Result<&mut Network> {
        let network = Network::with_rng(id, layer_sizes, rng)?;
        match self.networks.entry(id) {
            Entry::Occupied(mut slot) => {
                slot.insert(network);
                Ok(slot.into_mut())
            }
            Entry::Vacant(slot) => Ok(slot.insert(network)),
        }
    }

    /// Registers `network` under its own id; returns the network it replaced.
    pub fn insert(&mut self, network: Network) -> Option<Network> {
        let replaced = self.networks.insert(network.id(), network);
        if let Some(old) = &replaced {
            debug!("network {} ({}) replaced", old.id(), old.architecture());
        }
        replaced
    }

    pub fn get(&self, id: u32) -> Option<&Network> {
        self.networks.get(&id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Network> {
        self.networks.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.networks.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Network)> + '_ {
        self.networks.iter().map(|(&id, network)| (id, network))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u32, &mut Network)> + '_ {
        self.networks.iter_mut().map(|(&id, network)| (id, network))
    }

    /// Feeds every sample, in order, to every network, in id order. Returns
    /// each network's mean squared error over the pass.
    pub fn train_pass(&mut self, set: &TrainingSet) -> Vec<(u32, f64)> {
        self.iter_mut()
            .map(|(id, network)| (id, train_pass(network, set)))
            .collect()
    }

    /// Saves every network. Stops at the first store error.
    pub fn save_all<S: ParameterStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        for network in self.networks.values() {
            network.save(store)?;
        }
        info!("saved {} networks", self.len());
        Ok(())
    }

    /// Loads every network independently; one network failing (for example
    /// a slot written by another shape) does not stop the rest.
    pub fn load_all<S: ParameterStore + ?Sized>(&mut self, store: &S) -> Vec<(u32, Result<bool>)> {
        let results: Vec<(u32, Result<bool>)> = self
            .iter_mut()
            .map(|(id, network)| (id, network.load(store)))
            .collect();

        for (id, result) in &results {
            if let Err(e) = result {
                warn!("network {id}: keeping current parameters: {e}");
            }
        }
        let loaded = results.iter().filter(|(_, r)| matches!(r, Ok(true))).count();
        info!("loaded {loaded} of {} networks", self.len());
        results
    }

    /// Closed form of every network (or why it has none).
    pub fn formulas(&self) -> Vec<(u32, Result<String>)> {
        self.iter()
            .map(|(id, network)| (id, network.to_closed_form()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::anchors::STEP_PATH;
    use crate::error::NetError;
    use crate::store::MemoryStore;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2023)
    }

    #[test]
    fn comparison_set_is_ordered_by_id() {
        let registry = Registry::comparison_set(&mut rng()).unwrap();
        assert_eq!(registry.ids().collect::<Vec<_>>(), (0..9).collect::<Vec<_>>());
        assert_eq!(registry.get(6).unwrap().architecture(), "1-3-2-1");
    }

    #[test]
    fn iterates_in_id_order_regardless_of_insertion() {
        let mut registry = Registry::new();
        for id in [5, 1, 3] {
            registry.create(id, &[1, 2, 1], &mut rng()).unwrap();
        }
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn create_replaces_existing_id() {
        let mut registry = Registry::new();
        registry.create(2, &[1, 1], &mut rng()).unwrap();
        let net = registry.create(2, &[1, 4, 1], &mut rng()).unwrap();
        assert_eq!(net.layer_sizes(), &[1, 4, 1]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(2).unwrap().architecture(), "1-4-1");
    }

    #[test]
    fn create_rejects_bad_shape_and_keeps_old_entry() {
        let mut registry = Registry::new();
        registry.create(0, &[1, 2, 1], &mut rng()).unwrap();
        assert!(matches!(
            registry.create(0, &[1], &mut rng()),
            Err(NetError::InvalidArchitecture(_))
        ));
        assert_eq!(registry.get(0).unwrap().architecture(), "1-2-1");
    }

    #[test]
    fn create_follows_the_seed() {
        let mut a = Registry::new();
        let mut b = Registry::new();
        a.create(4, &[1, 3, 2, 1], &mut StdRng::seed_from_u64(8)).unwrap();
        b.create(4, &[1, 3, 2, 1], &mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(a.get(4).unwrap().parameters(), b.get(4).unwrap().parameters());

        let specs = [NetworkSpec::new(4, &[1, 3, 2, 1])];
        let from_spec = Registry::from_specs(&specs, &mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(a.get(4).unwrap().parameters(), from_spec.get(4).unwrap().parameters());
    }

    #[test]
    fn insert_returns_replaced_network() {
        let mut registry = Registry::new();
        assert!(registry.insert(Network::new(1, &[1, 1]).unwrap()).is_none());
        let old = registry.insert(Network::new(1, &[1, 2, 1]).unwrap()).unwrap();
        assert_eq!(old.architecture(), "1-1");
    }

    #[test]
    fn training_passes_reduce_error_for_hidden_layer_nets() {
        let set = TrainingSet::from_anchors(STEP_PATH, 51);
        let mut registry = Registry::comparison_set(&mut rng()).unwrap();

        let first = registry.train_pass(&set);
        let mut last = first.clone();
        for _ in 0..200 {
            last = registry.train_pass(&set);
        }

        assert_eq!(last.len(), 9);
        // [1, 3, 1] has room for the step; it should clearly improve.
        assert!(last[3].1 < first[3].1, "{:?} -> {:?}", first[3], last[3]);
    }

    #[test]
    fn load_all_continues_past_mismatches() {
        let mut source = Registry::new();
        source.insert(Network::new(0, &[1, 2, 1]).unwrap());
        source.insert(Network::new(1, &[1, 5, 1]).unwrap());
        let mut store = MemoryStore::new();
        source.save_all(&mut store).unwrap();

        let mut target = Registry::new();
        target.insert(Network::new(0, &[1, 2, 1]).unwrap());
        target.insert(Network::new(1, &[1, 3, 1]).unwrap());
        target.insert(Network::new(2, &[1, 1]).unwrap());

        let results = target.load_all(&store);
        assert!(matches!(results[0], (0, Ok(true))));
        assert!(matches!(results[1], (1, Err(NetError::ParameterCountMismatch { .. }))));
        assert!(matches!(results[2], (2, Ok(false))));
        assert_eq!(
            target.get(0).unwrap().parameters(),
            source.get(0).unwrap().parameters()
        );
    }

    #[test]
    fn formulas_cover_every_network() {
        let mut registry = Registry::comparison_set(&mut rng()).unwrap();
        registry.create(9, &[2, 1], &mut rng()).unwrap();
        let formulas = registry.formulas();
        assert_eq!(formulas.len(), 10);
        assert!(formulas[..9]
            .iter()
            .all(|(_, f)| f.as_ref().map_or(false, |f| f.starts_with("y = tanh("))));
        assert!(matches!(formulas[9], (9, Err(NetError::UnsupportedShape { .. }))));
    }
}
